//! Pricewatch - product price tracker
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use application::{PriceCheck, RunMode, Scheduler};
pub use infrastructure::browser::ProductExtractor;
pub use infrastructure::mail::SmtpNotifier;
pub use shared::config::ConfigLoader;
pub use shared::types::Settings;
