//! Utility functions and helpers

use chrono::{DateTime, Local};

/// Local wall-clock timestamp with second precision, as written to both history files
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
