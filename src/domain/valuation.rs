//! Valuation engine: pure functions over holdings and live quotes.
//!
//! Every division is guarded; no NaN or infinity ever escapes.

use std::collections::HashMap;

use crate::domain::holding::Holding;
use crate::domain::quote::Quote;

/// Upper bound on ranked gainers and losers.
pub const MAX_RANKED: usize = 3;

/// One slice of the allocation breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSlice {
    pub ticker: String,
    pub value: f64,
    pub percentage: f64,
    /// Deterministic HSL color keyed by ticker, for chart rendering.
    pub color: String,
}

/// Per-holding performance snapshot used for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingPerformance {
    pub ticker: String,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub return_pct: f64,
    pub gain_loss: f64,
    pub current_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GainersLosers {
    pub gainers: Vec<HoldingPerformance>,
    pub losers: Vec<HoldingPerformance>,
}

/// Live price for a holding, falling back to the purchase price when
/// no quote has been fetched for its ticker.
pub fn effective_price(holding: &Holding, quotes: &HashMap<String, Quote>) -> f64 {
    quotes
        .get(&holding.ticker)
        .map(|quote| quote.current_price)
        .unwrap_or(holding.purchase_price)
}

/// Aggregate percentage return from cost basis to current value.
/// Returns 0 for an empty portfolio or a zero cost basis.
pub fn total_return(holdings: &[Holding], quotes: &HashMap<String, Quote>) -> f64 {
    if holdings.is_empty() {
        return 0.0;
    }

    let mut total_cost = 0.0;
    let mut total_current = 0.0;
    for holding in holdings {
        total_cost += holding.cost_basis();
        total_current += holding.quantity * effective_price(holding, quotes);
    }

    if total_cost <= 0.0 {
        return 0.0;
    }
    (total_current - total_cost) / total_cost * 100.0
}

/// Allocation breakdown: each holding's current value as a percentage
/// of the total. Empty when there are no holdings or the total value
/// is zero, so percentages are always finite.
pub fn allocation(holdings: &[Holding], quotes: &HashMap<String, Quote>) -> Vec<AllocationSlice> {
    if holdings.is_empty() {
        return Vec::new();
    }

    let total: f64 = holdings
        .iter()
        .map(|h| h.quantity * effective_price(h, quotes))
        .sum();
    if total <= 0.0 {
        return Vec::new();
    }

    holdings
        .iter()
        .map(|holding| {
            let value = holding.quantity * effective_price(holding, quotes);
            AllocationSlice {
                ticker: holding.ticker.clone(),
                value,
                percentage: value / total * 100.0,
                color: palette_color(&holding.ticker),
            }
        })
        .collect()
}

/// Rank holdings by percentage return: at most [`MAX_RANKED`] gainers
/// (best first) and losers (worst first). Ties keep insertion order.
pub fn gainers_and_losers(
    holdings: &[Holding],
    quotes: &HashMap<String, Quote>,
) -> GainersLosers {
    if holdings.is_empty() {
        return GainersLosers::default();
    }

    let mut performance: Vec<HoldingPerformance> = holdings
        .iter()
        .map(|holding| {
            let current_price = effective_price(holding, quotes);
            let return_pct = if holding.purchase_price > 0.0 {
                (current_price - holding.purchase_price) / holding.purchase_price * 100.0
            } else {
                0.0
            };
            HoldingPerformance {
                ticker: holding.ticker.clone(),
                quantity: holding.quantity,
                purchase_price: holding.purchase_price,
                current_price,
                return_pct,
                gain_loss: holding.quantity * (current_price - holding.purchase_price),
                current_value: holding.quantity * current_price,
            }
        })
        .collect();

    // Each side gets its own stable sort from insertion order, so ties
    // come out in insertion order for losers as well as gainers.
    let mut descending = performance.clone();
    descending.sort_by(|a, b| b.return_pct.total_cmp(&a.return_pct));
    let gainers = descending
        .into_iter()
        .filter(|p| p.return_pct > 0.0)
        .take(MAX_RANKED)
        .collect();

    performance.sort_by(|a, b| a.return_pct.total_cmp(&b.return_pct));
    let losers = performance
        .into_iter()
        .filter(|p| p.return_pct < 0.0)
        .take(MAX_RANKED)
        .collect();

    GainersLosers { gainers, losers }
}

/// Deterministic chart color for a ticker: a stable hue derived from
/// the symbol's bytes, so the same ticker always gets the same slice
/// color.
pub fn palette_color(ticker: &str) -> String {
    let hue: u32 = ticker.bytes().fold(0u32, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(u32::from(b))
    }) % 360;
    format!("hsl({hue}, 70%, 50%)")
}
