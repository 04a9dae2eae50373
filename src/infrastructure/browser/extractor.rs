//! Product page extraction: navigate, dismiss the shopping gate, read price and title

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::domain::price::{PriceFeed, ProductSnapshot};
use crate::shared::errors::ExtractionError;
use crate::shared::types::PageField;
use super::traits::{PageSession, SessionFactory};

pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
pub const INTERSTITIAL_WAIT: Duration = Duration::from_secs(5);
pub const LOOKUP_WAIT: Duration = Duration::from_secs(10);

pub const CONTINUE_SHOPPING_XPATH: &str = "//*[self::button or self::a or @role='button'][contains(normalize-space(.), 'Continue shopping')]";
pub const PRICE_XPATH: &str = "//div[@id='corePriceDisplay_desktop_feature_div']//span[@class='a-price-whole']";
pub const TITLE_XPATH: &str = "//span[@id='productTitle']";

/// Reads price and title from a product page, one isolated session per call
pub struct ProductExtractor<S: SessionFactory> {
    sessions: S,
    screenshot_path: PathBuf,
}

impl<S: SessionFactory> ProductExtractor<S> {
    pub fn new(sessions: S, screenshot_path: impl Into<PathBuf>) -> Self {
        Self {
            sessions,
            screenshot_path: screenshot_path.into(),
        }
    }

    /// Open a session, scrape, and release the session on every path
    pub async fn extract(&self, url: &str) -> Result<ProductSnapshot, ExtractionError> {
        let page = self.sessions.open().await?;
        let result = self.scrape(page.as_ref(), url).await;

        if let Err(e) = page.close().await {
            warn!("⚠️ Failed to close browser session: {}", e);
        }

        result
    }

    async fn scrape(&self, page: &dyn PageSession, url: &str) -> Result<ProductSnapshot, ExtractionError> {
        info!("Navigating to {}", url);
        page.goto(url, NAVIGATION_TIMEOUT).await?;

        save_screenshot(page, &self.screenshot_path).await;
        dismiss_interstitial(page).await?;

        let raw_price = page
            .inner_text(PRICE_XPATH, LOOKUP_WAIT)
            .await
            .map_err(|e| not_found(PageField::Price, e))?;
        let title = page
            .inner_text(TITLE_XPATH, LOOKUP_WAIT)
            .await
            .map_err(|e| not_found(PageField::Title, e))?;
        let title = title.trim().to_string();
        info!("Product Title: {}", title);

        Ok(ProductSnapshot { raw_price, title })
    }
}

#[async_trait]
impl<S: SessionFactory> PriceFeed for ProductExtractor<S> {
    async fn fetch(&self, url: &str) -> Result<ProductSnapshot, ExtractionError> {
        self.extract(url).await
    }
}

/// Click through the "Continue shopping" gate when it shows up
async fn dismiss_interstitial(page: &dyn PageSession) -> Result<(), ExtractionError> {
    let visible = page
        .is_visible_within(CONTINUE_SHOPPING_XPATH, INTERSTITIAL_WAIT)
        .await
        .map_err(as_interstitial)?;

    if visible {
        info!("Continue button is visible, clicking it...");
        page.click(CONTINUE_SHOPPING_XPATH).await.map_err(as_interstitial)?;
    }
    Ok(())
}

/// Any failure while reading a field (absent, detached, page error) is a miss on that field
fn not_found(field: PageField, err: ExtractionError) -> ExtractionError {
    ExtractionError::ElementNotFound {
        field,
        detail: err.to_string(),
    }
}

fn as_interstitial(err: ExtractionError) -> ExtractionError {
    match err {
        ExtractionError::InterstitialError(_) => err,
        other => ExtractionError::InterstitialError(other.to_string()),
    }
}

/// Best-effort diagnostic capture; never affects the extraction result
async fn save_screenshot(page: &dyn PageSession, path: &Path) {
    let png = match page.screenshot().await {
        Ok(png) => png,
        Err(e) => {
            warn!("⚠️ Screenshot failed: {}", e);
            return;
        }
    };
    if let Err(e) = tokio::fs::write(path, png).await {
        warn!("⚠️ Could not write screenshot to {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct PageScript {
        navigation_fails: bool,
        screenshot_fails: bool,
        interstitial_visible: bool,
        price: Option<&'static str>,
        title: Option<&'static str>,
    }

    struct FakePage {
        script: PageScript,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakePage {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }
    }

    #[async_trait]
    impl PageSession for FakePage {
        async fn goto(&self, _url: &str, timeout: Duration) -> Result<(), ExtractionError> {
            self.record("goto");
            if self.script.navigation_fails {
                return Err(ExtractionError::NavigationTimeout(timeout));
            }
            Ok(())
        }

        async fn screenshot(&self) -> Result<Vec<u8>, ExtractionError> {
            self.record("screenshot");
            if self.script.screenshot_fails {
                return Err(ExtractionError::Session("capture failed".into()));
            }
            Ok(b"\x89PNG".to_vec())
        }

        async fn is_visible_within(&self, _xpath: &str, wait: Duration) -> Result<bool, ExtractionError> {
            assert_eq!(wait, INTERSTITIAL_WAIT);
            self.record("interstitial?");
            Ok(self.script.interstitial_visible)
        }

        async fn click(&self, xpath: &str) -> Result<(), ExtractionError> {
            assert_eq!(xpath, CONTINUE_SHOPPING_XPATH);
            self.record("click");
            Ok(())
        }

        async fn inner_text(&self, xpath: &str, _wait: Duration) -> Result<String, ExtractionError> {
            let (name, value) = if xpath == PRICE_XPATH {
                ("price", self.script.price)
            } else {
                ("title", self.script.title)
            };
            self.record(name);
            value
                .map(str::to_string)
                .ok_or_else(|| ExtractionError::Lookup(xpath.to_string()))
        }

        async fn close(&self) -> Result<(), ExtractionError> {
            self.record("close");
            Ok(())
        }
    }

    struct FakeSessions {
        script: PageScript,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl SessionFactory for FakeSessions {
        async fn open(&self) -> Result<Box<dyn PageSession>, ExtractionError> {
            self.calls.lock().unwrap().push("open".to_string());
            Ok(Box::new(FakePage {
                script: self.script.clone(),
                calls: Arc::clone(&self.calls),
            }))
        }
    }

    fn extractor(script: PageScript) -> (ProductExtractor<FakeSessions>, Arc<Mutex<Vec<String>>>, PathBuf) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let screenshot = std::env::temp_dir().join(format!("pricewatch-{}.png", uuid::Uuid::new_v4()));
        let sessions = FakeSessions { script, calls: Arc::clone(&calls) };
        (ProductExtractor::new(sessions, screenshot.clone()), calls, screenshot)
    }

    fn calls(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_extract_without_interstitial() {
        let (extractor, log, screenshot) = extractor(PageScript {
            price: Some("49,999"),
            title: Some("  Steel Kettle 1.5L \n"),
            ..Default::default()
        });

        let snapshot = extractor.extract("https://shop.example/item").await.unwrap();
        assert_eq!(snapshot, ProductSnapshot::new("49,999", "Steel Kettle 1.5L"));
        assert_eq!(
            calls(&log),
            vec!["open", "goto", "screenshot", "interstitial?", "price", "title", "close"]
        );
        assert!(screenshot.exists());
        let _ = std::fs::remove_file(screenshot);
    }

    #[tokio::test]
    async fn test_interstitial_clicked_before_lookup() {
        let (extractor, log, screenshot) = extractor(PageScript {
            interstitial_visible: true,
            price: Some("1,23,456"),
            title: Some("Laptop"),
            ..Default::default()
        });

        extractor.extract("https://shop.example/item").await.unwrap();
        assert_eq!(
            calls(&log),
            vec!["open", "goto", "screenshot", "interstitial?", "click", "price", "title", "close"]
        );
        let _ = std::fs::remove_file(screenshot);
    }

    #[tokio::test]
    async fn test_missing_title_is_total_failure() {
        let (extractor, log, screenshot) = extractor(PageScript {
            price: Some("999"),
            title: None,
            ..Default::default()
        });

        let err = extractor.extract("https://shop.example/item").await.unwrap_err();
        assert_eq!(err.missing_field(), Some(PageField::Title));
        assert_eq!(calls(&log).last().map(String::as_str), Some("close"));
        let _ = std::fs::remove_file(screenshot);
    }

    #[tokio::test]
    async fn test_missing_price_names_price_field() {
        let (extractor, log, screenshot) = extractor(PageScript {
            price: None,
            title: Some("Kettle"),
            ..Default::default()
        });

        let err = extractor.extract("https://shop.example/item").await.unwrap_err();
        assert!(matches!(err, ExtractionError::ElementNotFound { field: PageField::Price, .. }));
        assert_eq!(
            calls(&log),
            vec!["open", "goto", "screenshot", "interstitial?", "price", "close"]
        );
        let _ = std::fs::remove_file(screenshot);
    }

    #[tokio::test]
    async fn test_navigation_timeout_still_releases_session() {
        let (extractor, log, screenshot) = extractor(PageScript {
            navigation_fails: true,
            ..Default::default()
        });

        let err = extractor.extract("https://shop.example/item").await.unwrap_err();
        assert!(matches!(err, ExtractionError::NavigationTimeout(t) if t == NAVIGATION_TIMEOUT));
        assert_eq!(calls(&log), vec!["open", "goto", "close"]);
        assert!(!screenshot.exists());
    }

    #[tokio::test]
    async fn test_screenshot_failure_is_ignored() {
        let (extractor, _log, screenshot) = extractor(PageScript {
            screenshot_fails: true,
            price: Some("100"),
            title: Some("Cable"),
            ..Default::default()
        });

        let snapshot = extractor.extract("https://shop.example/item").await.unwrap();
        assert_eq!(snapshot.raw_price, "100");
        assert!(!screenshot.exists());
    }

    #[test]
    fn test_interstitial_error_wrapping() {
        let wrapped = as_interstitial(ExtractionError::Lookup("gone".into()));
        assert!(matches!(wrapped, ExtractionError::InterstitialError(_)));
    }
}
