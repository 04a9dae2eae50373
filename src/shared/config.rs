use std::path::PathBuf;
use tracing::{debug, warn};
use crate::shared::types::{
    Settings, SenderCredentials, DEFAULT_CSV_FILE, DEFAULT_LOG_FILE, DEFAULT_SCREENSHOT_FILE,
    DEFAULT_THRESHOLD_PRICE, DEFAULT_WEBDRIVER_URL,
};
use crate::shared::errors::AppError;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from the process environment, after merging a `.env` file if one exists
    pub fn load() -> Result<Settings, AppError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file found, using process environment"),
            Err(e) => {
                return Err(AppError::ConfigError(format!("Failed to read .env file: {}", e)));
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let product_url = get("PRODUCT_URL")
            .ok_or_else(|| AppError::ConfigError("PRODUCT_URL is required".to_string()))?;

        let threshold_price = match get("THRESHOLD_PRICE") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::ConfigError(format!(
                    "THRESHOLD_PRICE must be a non-negative integer, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_THRESHOLD_PRICE,
        };

        let sender = match (get("USER_EMAIL"), get("APP_PASSWORD")) {
            (Some(email), Some(app_password)) => Some(SenderCredentials { email, app_password }),
            (None, None) => None,
            _ => {
                warn!("Only one of USER_EMAIL / APP_PASSWORD is set, alerts cannot be sent");
                None
            }
        };

        let headless = match get("HEADLESS") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::ConfigError(format!("HEADLESS must be true or false, got '{}'", raw))
            })?,
            None => true,
        };

        Ok(Settings {
            product_url,
            threshold_price,
            sender,
            recipient: get("TO_EMAIL"),
            log_file: PathBuf::from(get("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())),
            csv_file: PathBuf::from(get("CSV_FILE").unwrap_or_else(|| DEFAULT_CSV_FILE.to_string())),
            webdriver_url: get("WEBDRIVER_URL").unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string()),
            screenshot_file: PathBuf::from(
                get("SCREENSHOT_FILE").unwrap_or_else(|| DEFAULT_SCREENSHOT_FILE.to_string()),
            ),
            headless,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Settings, AppError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigLoader::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = load(&[("PRODUCT_URL", "https://www.amazon.in/dp/B0TEST")]).unwrap();
        assert_eq!(settings, Settings::new("https://www.amazon.in/dp/B0TEST"));
        assert_eq!(settings.threshold_price, 50_000);
        assert_eq!(settings.log_file, PathBuf::from("price_log.txt"));
        assert_eq!(settings.csv_file, PathBuf::from("price_log.csv"));
        assert!(settings.sender.is_none());
        assert!(settings.headless);
    }

    #[test]
    fn test_missing_product_url() {
        let err = load(&[("THRESHOLD_PRICE", "100")]).unwrap_err();
        assert!(err.to_string().contains("PRODUCT_URL"));

        assert!(load(&[("PRODUCT_URL", "   ")]).is_err());
    }

    #[test]
    fn test_full_environment() {
        let settings = load(&[
            ("PRODUCT_URL", "https://shop.example/item"),
            ("THRESHOLD_PRICE", " 42000 "),
            ("USER_EMAIL", "me@example.com"),
            ("APP_PASSWORD", "abcd efgh"),
            ("TO_EMAIL", "you@example.com"),
            ("LOG_FILE", "logs/run.txt"),
            ("CSV_FILE", "logs/run.csv"),
            ("WEBDRIVER_URL", "http://127.0.0.1:9515"),
            ("HEADLESS", "false"),
        ])
        .unwrap();

        assert_eq!(settings.threshold_price, 42_000);
        assert_eq!(
            settings.sender,
            Some(SenderCredentials {
                email: "me@example.com".to_string(),
                app_password: "abcd efgh".to_string(),
            })
        );
        assert_eq!(settings.recipient.as_deref(), Some("you@example.com"));
        assert_eq!(settings.log_file, PathBuf::from("logs/run.txt"));
        assert_eq!(settings.csv_file, PathBuf::from("logs/run.csv"));
        assert_eq!(settings.webdriver_url, "http://127.0.0.1:9515");
        assert!(!settings.headless);
    }

    #[test]
    fn test_invalid_threshold() {
        for bad in ["abc", "-5", "12.5"] {
            let result = load(&[("PRODUCT_URL", "https://x.example"), ("THRESHOLD_PRICE", bad)]);
            assert!(result.is_err(), "threshold {bad} should be rejected");
        }
    }

    #[test]
    fn test_partial_credentials_are_dropped() {
        let settings = load(&[
            ("PRODUCT_URL", "https://x.example"),
            ("USER_EMAIL", "me@example.com"),
        ])
        .unwrap();
        assert!(settings.sender.is_none());
    }
}
