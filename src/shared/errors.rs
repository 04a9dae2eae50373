//! Error handling for the application

use std::time::Duration;
use thiserror::Error;
use crate::shared::types::PageField;

/// Errors raised while driving the browser through a product page.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Navigation timed out after {}s", .0.as_secs())]
    NavigationTimeout(Duration),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Browser session error: {0}")]
    Session(String),

    #[error("Element lookup failed: {0}")]
    Lookup(String),

    #[error("{field} element not found: {detail}")]
    ElementNotFound { field: PageField, detail: String },

    #[error("Interstitial handling failed: {0}")]
    InterstitialError(String),
}

impl ExtractionError {
    /// Which page field the page loaded without. A blocking interstitial
    /// counts against the price, since the price lookup never runs.
    pub fn missing_field(&self) -> Option<PageField> {
        match self {
            ExtractionError::ElementNotFound { field, .. } => Some(*field),
            ExtractionError::InterstitialError(_) => Some(PageField::Price),
            _ => None,
        }
    }
}

/// Price text that does not normalize to a non-negative integer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid literal for price: '{raw}'")]
pub struct PriceParseError {
    pub raw: String,
}

/// Alert delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Sender credentials are not configured (USER_EMAIL / APP_PASSWORD)")]
    MissingCredentials,

    #[error("Recipient address is not configured (TO_EMAIL)")]
    MissingRecipient,

    #[error("Invalid mail address {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// History file errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
