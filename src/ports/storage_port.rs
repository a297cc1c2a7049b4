//! Key-value persistence port trait.

use crate::domain::error::StockfolioError;

/// Single-key atomic get/set storage, last write wins.
pub trait StoragePort {
    fn get(&self, key: &str) -> Result<Option<String>, StockfolioError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StockfolioError>;
}
