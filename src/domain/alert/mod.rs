//! Alert domain - price drop messages and their delivery interface

use async_trait::async_trait;
use crate::shared::errors::NotifyError;

/// A price reading at or below the configured threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceAlert {
    pub url: String,
    pub price: u64,
    pub title: String,
}

impl PriceAlert {
    pub fn new(url: impl Into<String>, price: u64, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            price,
            title: title.into(),
        }
    }

    pub fn subject(&self) -> String {
        format!("Price Drop Alert: ₹{}", self.price)
    }

    pub fn body(&self) -> String {
        format!(
            "The price for {} has dropped below your threshold!\nCheck the product: {}",
            self.title, self.url
        )
    }
}

/// Delivers price alerts to the user
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, alert: &PriceAlert) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_template() {
        let alert = PriceAlert::new("https://shop.example/item", 49999, "Steel Kettle 1.5L");
        assert_eq!(alert.subject(), "Price Drop Alert: ₹49999");
        assert_eq!(
            alert.body(),
            "The price for Steel Kettle 1.5L has dropped below your threshold!\n\
             Check the product: https://shop.example/item"
        );
    }
}
