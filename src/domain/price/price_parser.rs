//! Price text normalization

use crate::shared::errors::PriceParseError;

/// Strip thousands separators and surrounding whitespace.
///
/// The whole-part price element renders its decimal point, so a single
/// trailing `.` is dropped as well.
pub fn normalize_price_text(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let trimmed = cleaned.trim();
    trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end().to_string()
}

/// Parse page price text into a whole number of currency units
pub fn parse_price(raw: &str) -> Result<u64, PriceParseError> {
    let normalized = normalize_price_text(raw);
    if normalized.is_empty() || !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PriceParseError { raw: raw.to_string() });
    }
    normalized
        .parse::<u64>()
        .map_err(|_| PriceParseError { raw: raw.to_string() })
}
