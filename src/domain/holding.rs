//! Holding model: a single portfolio position.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One portfolio position as entered by the user.
///
/// `current_price` defaults to 0 and is only ever enriched from live
/// quotes at display time; the persisted value is not authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: Uuid,
    pub ticker: String,
    pub quantity: f64,
    pub purchase_price: f64,
    /// Raw date token, validated as YYYY-MM-DD by the validator.
    pub purchase_date: String,
    #[serde(default)]
    pub current_price: f64,
}

impl Holding {
    /// Build a new candidate with a freshly generated id.
    ///
    /// Upper-cases the ticker; all other checks are the validator's job.
    pub fn new(ticker: &str, quantity: f64, purchase_price: f64, purchase_date: &str) -> Self {
        Holding {
            id: Uuid::new_v4(),
            ticker: ticker.trim().to_uppercase(),
            quantity,
            purchase_price,
            purchase_date: purchase_date.trim().to_string(),
            current_price: 0.0,
        }
    }

    /// Original invested amount for this position.
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.purchase_price
    }
}
