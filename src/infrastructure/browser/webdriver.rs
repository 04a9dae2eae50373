//! WebDriver-backed page sessions (chromedriver)

use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::wd::{TimeoutConfiguration, WebDriverCompatibleCommand};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::shared::errors::ExtractionError;
use super::profile::BrowserProfile;
use super::traits::{PageSession, SessionFactory};

/// Extra page-load budget given to the driver so the local timeout fires first
const DRIVER_TIMEOUT_SLACK: Duration = Duration::from_secs(5);
const SCRIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Chromedriver's DevTools passthrough endpoint
#[derive(Debug)]
struct DevToolsCommand {
    method: &'static str,
    params: Value,
}

impl WebDriverCompatibleCommand for DevToolsCommand {
    fn endpoint(
        &self,
        base_url: &url::Url,
        session_id: Option<&str>,
    ) -> Result<url::Url, url::ParseError> {
        let session_id = session_id.unwrap_or_default();
        base_url.join(&format!("session/{}/goog/cdp/execute", session_id))
    }

    fn method_and_body(&self, _request_url: &url::Url) -> (http::Method, Option<String>) {
        let body = json!({ "cmd": self.method, "params": self.params });
        (http::Method::POST, Some(body.to_string()))
    }
}

/// Creates one WebDriver session per extraction; each gets a fresh browser profile
pub struct WebDriverSessionFactory {
    webdriver_url: String,
    profile: BrowserProfile,
}

impl WebDriverSessionFactory {
    pub fn new(webdriver_url: impl Into<String>, profile: BrowserProfile) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            profile,
        }
    }
}

#[async_trait]
impl SessionFactory for WebDriverSessionFactory {
    async fn open(&self) -> Result<Box<dyn PageSession>, ExtractionError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.profile.capabilities());
        let client = builder.connect(&self.webdriver_url).await.map_err(|e| {
            ExtractionError::Session(format!("connect to {}: {}", self.webdriver_url, e))
        })?;

        let session = WebDriverSession { client };
        session.apply_overrides(&self.profile).await;
        Ok(Box::new(session))
    }
}

pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Non-chromium drivers reject these; the page still loads without them
    async fn apply_overrides(&self, profile: &BrowserProfile) {
        for (method, params) in profile.devtools_overrides() {
            match self.client.issue_cmd(DevToolsCommand { method, params }).await {
                Ok(_) => debug!("Applied {}", method),
                Err(e) => warn!("⚠️ Could not apply {}: {}", method, e),
            }
        }
    }
}

#[async_trait]
impl PageSession for WebDriverSession {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), ExtractionError> {
        let timeouts = TimeoutConfiguration::new(
            Some(SCRIPT_TIMEOUT),
            Some(timeout + DRIVER_TIMEOUT_SLACK),
            Some(Duration::ZERO),
        );
        self.client
            .update_timeouts(timeouts)
            .await
            .map_err(|e| ExtractionError::Session(e.to_string()))?;

        match tokio::time::timeout(timeout, self.client.goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ExtractionError::Navigation(e.to_string())),
            Err(_) => Err(ExtractionError::NavigationTimeout(timeout)),
        }
    }

    async fn screenshot(&self) -> Result<Vec<u8>, ExtractionError> {
        self.client
            .screenshot()
            .await
            .map_err(|e| ExtractionError::Session(e.to_string()))
    }

    async fn is_visible_within(&self, xpath: &str, wait: Duration) -> Result<bool, ExtractionError> {
        match self.client.wait().at_most(wait).for_element(Locator::XPath(xpath)).await {
            Ok(element) => element
                .is_displayed()
                .await
                .map_err(|e| ExtractionError::InterstitialError(e.to_string())),
            Err(CmdError::WaitTimeout) => Ok(false),
            Err(e) => Err(ExtractionError::InterstitialError(e.to_string())),
        }
    }

    async fn click(&self, xpath: &str) -> Result<(), ExtractionError> {
        let element = self
            .client
            .find(Locator::XPath(xpath))
            .await
            .map_err(|e| ExtractionError::Lookup(format!("{}: {}", xpath, e)))?;
        element
            .click()
            .await
            .map_err(|e| ExtractionError::InterstitialError(format!("click {}: {}", xpath, e)))
    }

    async fn inner_text(&self, xpath: &str, wait: Duration) -> Result<String, ExtractionError> {
        let element = self
            .client
            .wait()
            .at_most(wait)
            .for_element(Locator::XPath(xpath))
            .await
            .map_err(|e| ExtractionError::Lookup(format!("{}: {}", xpath, e)))?;
        element
            .text()
            .await
            .map_err(|e| ExtractionError::Lookup(format!("{}: {}", xpath, e)))
    }

    async fn close(&self) -> Result<(), ExtractionError> {
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| ExtractionError::Session(e.to_string()))
    }
}
