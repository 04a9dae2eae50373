//! Common types used across the application

use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_THRESHOLD_PRICE: u64 = 50_000;
pub const DEFAULT_LOG_FILE: &str = "price_log.txt";
pub const DEFAULT_CSV_FILE: &str = "price_log.csv";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";
pub const DEFAULT_SCREENSHOT_FILE: &str = "debug.png";

/// Product page fields read on every check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageField {
    Price,
    Title,
}

impl fmt::Display for PageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageField::Price => write!(f, "price"),
            PageField::Title => write!(f, "title"),
        }
    }
}

/// Mail account used to send alerts
#[derive(Clone, PartialEq, Eq)]
pub struct SenderCredentials {
    pub email: String,
    pub app_password: String,
}

impl fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("email", &self.email)
            .field("app_password", &"********")
            .finish()
    }
}

/// Process-wide settings, built once at startup and never mutated
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub product_url: String,
    pub threshold_price: u64,
    pub sender: Option<SenderCredentials>,
    pub recipient: Option<String>,
    pub log_file: PathBuf,
    pub csv_file: PathBuf,

    // Browser
    pub webdriver_url: String,
    pub screenshot_file: PathBuf,
    pub headless: bool,
}

impl Settings {
    /// Settings for `product_url` with every other field at its default.
    pub fn new(product_url: impl Into<String>) -> Self {
        Self {
            product_url: product_url.into(),
            threshold_price: DEFAULT_THRESHOLD_PRICE,
            sender: None,
            recipient: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            csv_file: PathBuf::from(DEFAULT_CSV_FILE),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            screenshot_file: PathBuf::from(DEFAULT_SCREENSHOT_FILE),
            headless: true,
        }
    }
}
