//! Price feed interface

use async_trait::async_trait;
use crate::shared::errors::ExtractionError;
use super::ProductSnapshot;

/// Source of product price/title readings
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Read the current price and title from the product page at `url`
    async fn fetch(&self, url: &str) -> Result<ProductSnapshot, ExtractionError>;
}
