//! Append-only price history files

mod history_store;

pub use history_store::HistoryStore;
