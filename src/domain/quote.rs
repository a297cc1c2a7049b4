//! Live market data models: quotes and news.
//!
//! Quotes are session-scoped. The map handed to the valuation engine is
//! rebuilt on every refresh cycle and never persisted.

use serde::{Deserialize, Serialize};

/// Snapshot of live price data for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub previous_close: f64,
    /// Unix timestamp of the quote, as reported by the provider.
    pub timestamp: i64,
    pub monthly_change_percent: f64,
    pub yearly_change_percent: f64,
}

/// One market news article from the news feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub source: String,
    pub date: String,
    pub url: String,
    pub summary: String,
}

/// Percentage change from `previous` to `current`, 0 when the base is
/// missing or zero.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 || !previous.is_finite() {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}
