//! Holding validation: the sole gatekeeper in front of the store.
//!
//! Rules are checked independently per row and accumulated; nothing
//! short-circuits. An empty result means every row may be inserted.

use crate::domain::holding::Holding;
use chrono::NaiveDate;

/// Validate a batch of candidates, returning one message per violated
/// rule per row. Row indices are 1-based.
pub fn validate_holdings(holdings: &[Holding]) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, holding) in holdings.iter().enumerate() {
        let row = i + 1;

        if holding.ticker.trim().is_empty() {
            errors.push(format!("Row {row}: Missing ticker symbol"));
        }

        if !holding.quantity.is_finite() || holding.quantity <= 0.0 {
            errors.push(format!("Row {row}: Invalid quantity"));
        }

        if !holding.purchase_price.is_finite() || holding.purchase_price <= 0.0 {
            errors.push(format!("Row {row}: Invalid purchase price"));
        }

        if !is_valid_date(&holding.purchase_date) {
            errors.push(format!("Row {row}: Invalid purchase date"));
        }
    }

    errors
}

/// A purchase date is valid iff it parses as a real YYYY-MM-DD calendar date.
pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok()
}
