//! Price domain - observations, parsing and threshold checks

mod price_feed;
mod price_parser;
mod price_analyzer;

pub use price_feed::PriceFeed;
pub use price_parser::{normalize_price_text, parse_price};
pub use price_analyzer::PriceAnalyzer;

use std::fmt;
use crate::shared::types::PageField;

/// Raw fields read from the product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub raw_price: String,
    pub title: String,
}

impl ProductSnapshot {
    pub fn new(raw_price: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            raw_price: raw_price.into(),
            title: title.into(),
        }
    }

    /// Page rendered the price element but it held no text
    pub fn has_price(&self) -> bool {
        !self.raw_price.trim().is_empty()
    }
}

/// One successfully parsed price reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: String,
    pub raw_price: String,
    pub price: u64,
    pub title: String,
}

/// Result of a single check, rendered as the text-log message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Price(u64),
    PriceMissing,
    NothingRetrieved,
    Exception(String),
}

impl CheckOutcome {
    /// Log outcome for a page that loaded without `field`. A missing title
    /// rejects the whole reading so no partial row is stored.
    pub fn missing(field: PageField) -> Self {
        match field {
            PageField::Price => CheckOutcome::PriceMissing,
            PageField::Title => CheckOutcome::NothingRetrieved,
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Price(price) => write!(f, "Price: ₹{}", price),
            CheckOutcome::PriceMissing => write!(f, "❌ Failed to retrieve price."),
            CheckOutcome::NothingRetrieved => write!(f, "❌ Failed to retrieve price and title."),
            CheckOutcome::Exception(description) => {
                write!(f, "❌ Exception occurred: {}", description)
            }
        }
    }
}
