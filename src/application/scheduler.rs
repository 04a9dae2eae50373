//! Once / recurring execution of the price check

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{error, info, warn};

pub const CHECK_INTERVAL: Duration = Duration::from_secs(120);

/// Work invoked by the scheduler on each firing
#[async_trait]
pub trait ScheduledJob: Send + Sync {
    async fn run(&self);
}

/// Source of firings for recurring mode
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self);
}

/// Fixed-interval ticker. The first firing comes one period after start, and
/// firings missed while a check is still running are skipped rather than queued.
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// How the process runs the check, chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Once,
    Recurring { period: Duration },
}

impl RunMode {
    pub fn from_flag(once: bool) -> Self {
        if once {
            RunMode::Once
        } else {
            RunMode::Recurring { period: CHECK_INTERVAL }
        }
    }
}

pub struct Scheduler<J: ScheduledJob> {
    job: J,
}

impl<J: ScheduledJob> Scheduler<J> {
    pub fn new(job: J) -> Self {
        Self { job }
    }

    /// Run according to `mode`; recurring mode blocks until Ctrl-C / SIGTERM
    pub async fn start(&self, mode: RunMode) -> usize {
        match mode {
            RunMode::Once => {
                info!("Running price check once...");
                self.run_once().await;
                1
            }
            RunMode::Recurring { period } => {
                info!(
                    "Scheduler started. Checking price every {} minutes...",
                    period.as_secs() / 60
                );
                self.run_recurring(IntervalTicker::new(period), shutdown_signal()).await
            }
        }
    }

    pub async fn run_once(&self) {
        self.job.run().await;
    }

    /// Run the job on every tick until `shutdown` resolves. A check already in
    /// progress is allowed to finish; only further firings stop. Returns the run count.
    pub async fn run_recurring<T, S>(&self, mut ticker: T, shutdown: S) -> usize
    where
        T: Ticker,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut runs = 0;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }
            self.job.run().await;
            runs += 1;
        }

        info!("Scheduler stopped.");
        runs
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Interrupt received, stopping scheduler"),
        _ = terminate => info!("Termination requested, stopping scheduler"),
    }
}
