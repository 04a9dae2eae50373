use async_trait::async_trait;
use std::time::Duration;
use crate::shared::errors::ExtractionError;

/// One open browser page. Locators are XPath expressions.
#[async_trait]
pub trait PageSession: Send + Sync {
    /// Navigate and wait for the load to finish, failing after `timeout`
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), ExtractionError>;

    /// PNG capture of the current viewport
    async fn screenshot(&self) -> Result<Vec<u8>, ExtractionError>;

    /// Whether a displayed element matches within `wait`. Absence is `Ok(false)`.
    async fn is_visible_within(&self, xpath: &str, wait: Duration) -> Result<bool, ExtractionError>;

    async fn click(&self, xpath: &str) -> Result<(), ExtractionError>;

    /// Rendered text of the first match, waiting up to `wait` for it to attach
    async fn inner_text(&self, xpath: &str, wait: Duration) -> Result<String, ExtractionError>;

    /// End the session and release the browser
    async fn close(&self) -> Result<(), ExtractionError>;
}

/// Opens a fresh, isolated browser session per call
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn PageSession>, ExtractionError>;
}
