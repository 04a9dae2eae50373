//! Outbound mail for price alerts

mod smtp_notifier;

pub use smtp_notifier::{SmtpNotifier, SMTP_HOST, SMTP_PORT};
