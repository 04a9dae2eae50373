use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::price::{CheckOutcome, Observation};
use crate::shared::errors::StoreError;

/// One csv row; field names double as the header
#[derive(Debug, Serialize)]
struct PriceRow<'a> {
    datetime: &'a str,
    price: u64,
    product_name: &'a str,
}

/// Text log plus csv history. Both files are only ever appended to.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    log_path: PathBuf,
    csv_path: PathBuf,
}

impl HistoryStore {
    pub fn new(log_path: impl Into<PathBuf>, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            csv_path: csv_path.into(),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    #[cfg(test)]
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Append `"{timestamp} | {outcome}"` to the text log
    pub fn append_log_line(&self, timestamp: &str, outcome: &CheckOutcome) -> Result<(), StoreError> {
        let mut file = open_append(&self.log_path)?;
        writeln!(file, "{} | {}", timestamp, outcome).map_err(|e| io_error(&self.log_path, e))
    }

    /// Append one row, writing the header first when the file is new
    pub fn append_observation(&self, observation: &Observation) -> Result<(), StoreError> {
        let write_header = !self.csv_path.exists();
        let file = open_append(&self.csv_path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(PriceRow {
            datetime: &observation.timestamp,
            price: observation.price,
            product_name: &observation.title,
        })?;
        writer.flush().map_err(|e| io_error(&self.csv_path, e))
    }
}

fn open_append(path: &Path) -> Result<File, StoreError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
