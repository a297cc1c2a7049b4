//! Portfolio aggregate: the authoritative holdings list plus totals.
//!
//! All mutations go through the operations here; each one recomputes
//! `total_value` and stamps `last_updated` before returning, so no
//! caller can observe a mutated list with stale totals.

use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::StockfolioError;
use crate::domain::holding::Holding;
use crate::ports::storage_port::StoragePort;

/// Key the serialized snapshot lives under in the key-value store.
pub const STORAGE_KEY: &str = "portfolio";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub stocks: Vec<Holding>,
    pub total_value: f64,
    pub last_updated: Option<String>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Portfolio {
            stocks: Vec::new(),
            total_value: 0.0,
            last_updated: None,
        }
    }
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pre-validated holding.
    pub fn add(&mut self, holding: Holding) {
        self.stocks.push(holding);
        self.recompute();
    }

    /// Remove the holding with the given id. A missing id is a no-op,
    /// not an error.
    pub fn remove(&mut self, id: Uuid) {
        self.stocks.retain(|stock| stock.id != id);
        self.recompute();
    }

    /// Replace the holding matching `holding.id` in place; no-op when
    /// the id is not present.
    pub fn update(&mut self, holding: Holding) {
        if let Some(existing) = self.stocks.iter_mut().find(|s| s.id == holding.id) {
            *existing = holding;
            self.recompute();
        }
    }

    /// Empty the portfolio.
    pub fn clear(&mut self) {
        self.stocks.clear();
        self.recompute();
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn get(&self, id: Uuid) -> Option<&Holding> {
        self.stocks.iter().find(|stock| stock.id == id)
    }

    /// Load the persisted snapshot. An absent or unreadable snapshot
    /// degrades to the empty portfolio; it never fails the caller.
    pub fn load(storage: &dyn StoragePort) -> Portfolio {
        match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(portfolio) => portfolio,
                Err(e) => {
                    warn!("discarding unreadable portfolio snapshot: {e}");
                    Portfolio::new()
                }
            },
            Ok(None) => Portfolio::new(),
            Err(e) => {
                warn!("failed to read portfolio snapshot: {e}");
                Portfolio::new()
            }
        }
    }

    /// Persist the current snapshot. Unlike [`Portfolio::load`], write
    /// failures propagate to the caller.
    pub fn save(&self, storage: &dyn StoragePort) -> Result<(), StockfolioError> {
        let raw = serde_json::to_string(self).map_err(|e| StockfolioError::Persistence {
            reason: format!("failed to serialize portfolio: {e}"),
        })?;
        storage.set(STORAGE_KEY, &raw)
    }

    fn recompute(&mut self) {
        self.total_value = self
            .stocks
            .iter()
            .map(|stock| {
                let price = if stock.current_price > 0.0 {
                    stock.current_price
                } else {
                    stock.purchase_price
                };
                stock.quantity * price
            })
            .sum();
        self.last_updated = Some(Utc::now().to_rfc3339());
    }
}
