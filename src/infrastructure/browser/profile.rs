//! Browser identity presented to the product site

use serde_json::{json, Map, Value};

pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

/// Fixed desktop identity: user agent, locale, timezone and geolocation
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserProfile {
    pub user_agent: String,
    pub locale: String,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub headless: bool,
}

impl BrowserProfile {
    /// English (India), Asia/Kolkata, New Delhi
    pub fn desktop_india(headless: bool) -> Self {
        Self {
            user_agent: DESKTOP_USER_AGENT.to_string(),
            locale: "en-IN".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            latitude: 28.6139,
            longitude: 77.2090,
            headless,
        }
    }

    /// W3C capabilities for a chromedriver session.
    ///
    /// Geolocation permission is granted through the content-settings pref;
    /// timezone and coordinates need DevTools overrides once the session is up.
    pub fn capabilities(&self) -> Map<String, Value> {
        let mut args = vec![
            format!("--user-agent={}", self.user_agent),
            format!("--lang={}", self.locale),
            "--window-size=1366,768".to_string(),
            "--disable-blink-features=AutomationControlled".to_string(),
        ];
        if self.headless {
            args.push("--headless=new".to_string());
        }

        let mut caps = Map::new();
        caps.insert("browserName".to_string(), json!("chrome"));
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": args,
                "prefs": {
                    "intl.accept_languages": self.locale,
                    "profile.default_content_setting_values.geolocation": 1,
                },
            }),
        );
        caps
    }

    /// DevTools commands applied to every new session
    pub fn devtools_overrides(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("Emulation.setTimezoneOverride", json!({ "timezoneId": self.timezone })),
            ("Emulation.setLocaleOverride", json!({ "locale": self.locale })),
            (
                "Emulation.setGeolocationOverride",
                json!({
                    "latitude": self.latitude,
                    "longitude": self.longitude,
                    "accuracy": 100,
                }),
            ),
            ("Browser.grantPermissions", json!({ "permissions": ["geolocation"] })),
        ]
    }
}
