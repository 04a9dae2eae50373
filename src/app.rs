// src/app.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use pricewatch::application::{PriceCheck, RunMode, Scheduler};
use pricewatch::infrastructure::browser::{BrowserProfile, ProductExtractor, WebDriverSessionFactory};
use pricewatch::infrastructure::mail::SmtpNotifier;
use pricewatch::shared::types::Settings;

pub async fn run(settings: Settings, mode: RunMode) -> Result<()> {
    info!("Starting price tracker for {}", settings.product_url);
    info!("Configuration: {:?}", settings);

    if settings.sender.is_none() || settings.recipient.is_none() {
        warn!("⚠️ Mail settings incomplete (USER_EMAIL / APP_PASSWORD / TO_EMAIL); alerts will fail");
    }

    let settings = Arc::new(settings);

    let sessions = WebDriverSessionFactory::new(
        settings.webdriver_url.clone(),
        BrowserProfile::desktop_india(settings.headless),
    );
    let extractor = ProductExtractor::new(sessions, settings.screenshot_file.clone());
    let notifier = SmtpNotifier::from_settings(&settings);

    let check = PriceCheck::new(Arc::clone(&settings), extractor, notifier);
    let runs = Scheduler::new(check).start(mode).await;

    info!("Completed {} price check(s)", runs);
    Ok(())
}
