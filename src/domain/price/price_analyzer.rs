//! Threshold checks

/// Decides whether a reading is low enough to alert on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceAnalyzer {
    threshold: u64,
}

impl PriceAnalyzer {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Inclusive: a price equal to the threshold triggers an alert
    pub fn should_alert(&self, price: u64) -> bool {
        price <= self.threshold
    }
}
