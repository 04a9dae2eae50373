//! Application layer - use cases and services

pub mod price_check;
pub mod scheduler;

pub use price_check::PriceCheck;
pub use scheduler::{IntervalTicker, RunMode, ScheduledJob, Scheduler, Ticker, CHECK_INTERVAL};
