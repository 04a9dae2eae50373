//! The price check: extract, parse, persist, and alert when the price is low enough

use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, info_span, warn, Instrument};

use crate::application::scheduler::ScheduledJob;
use crate::domain::alert::{AlertNotifier, PriceAlert};
use crate::domain::price::{parse_price, CheckOutcome, Observation, PriceAnalyzer, PriceFeed};
use crate::infrastructure::storage::HistoryStore;
use crate::shared::errors::{ExtractionError, NotifyError, PriceParseError, StoreError};
use crate::shared::types::Settings;
use crate::shared::utils::{format_timestamp, generate_id};

/// Anything that ends a check early and lands in the log as an exception
#[derive(Error, Debug)]
enum CheckError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Parse(#[from] PriceParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Runs one self-contained price check per call
pub struct PriceCheck<F: PriceFeed, N: AlertNotifier> {
    settings: Arc<Settings>,
    feed: F,
    notifier: N,
    store: HistoryStore,
    analyzer: PriceAnalyzer,
}

impl<F: PriceFeed, N: AlertNotifier> PriceCheck<F, N> {
    pub fn new(settings: Arc<Settings>, feed: F, notifier: N) -> Self {
        let store = HistoryStore::new(settings.log_file.clone(), settings.csv_file.clone());
        let analyzer = PriceAnalyzer::new(settings.threshold_price);
        Self {
            settings,
            feed,
            notifier,
            store,
            analyzer,
        }
    }

    /// Never fails: every error is written to the text log and swallowed
    pub async fn run_check(&self) {
        let check_id = generate_id();
        let span = info_span!("price_check", %check_id);

        async {
            let timestamp = format_timestamp(&Local::now());
            if let Err(e) = self.check(&timestamp).await {
                self.record(&timestamp, &CheckOutcome::Exception(e.to_string()));
            }
        }
        .instrument(span)
        .await
    }

    async fn check(&self, timestamp: &str) -> Result<(), CheckError> {
        let url = self.settings.product_url.as_str();

        let snapshot = match self.feed.fetch(url).await {
            Ok(snapshot) => snapshot,
            Err(e) => match e.missing_field() {
                Some(field) => {
                    warn!("Error extracting price: {}", e);
                    self.write(timestamp, &CheckOutcome::missing(field))?;
                    return Ok(());
                }
                None => return Err(e.into()),
            },
        };

        if !snapshot.has_price() {
            self.write(timestamp, &CheckOutcome::PriceMissing)?;
            return Ok(());
        }

        let price = parse_price(&snapshot.raw_price)?;
        let observation = Observation {
            timestamp: timestamp.to_string(),
            raw_price: snapshot.raw_price,
            price,
            title: snapshot.title.trim().to_string(),
        };

        self.write(timestamp, &CheckOutcome::Price(price))?;
        self.store.append_observation(&observation)?;

        if self.analyzer.should_alert(price) {
            info!("✅ Price is below threshold! Sending email...");
            let alert = PriceAlert::new(url, price, observation.title);
            self.notifier.notify(&alert).await?;
        } else {
            info!("ℹ️ Price is still above threshold ({}).", self.analyzer.threshold());
        }

        Ok(())
    }

    fn write(&self, timestamp: &str, outcome: &CheckOutcome) -> Result<(), StoreError> {
        match outcome {
            CheckOutcome::Price(_) => info!("{} | {}", timestamp, outcome),
            _ => error!("{} | {}", timestamp, outcome),
        }
        self.store.append_log_line(timestamp, outcome)
    }

    /// Last-resort logging; a broken log file must not escape the check
    fn record(&self, timestamp: &str, outcome: &CheckOutcome) {
        if let Err(e) = self.write(timestamp, outcome) {
            error!("Failed to write {}: {}", self.store.log_path().display(), e);
        }
    }
}

#[async_trait]
impl<F: PriceFeed, N: AlertNotifier> ScheduledJob for PriceCheck<F, N> {
    async fn run(&self) {
        self.run_check().await;
    }
}
