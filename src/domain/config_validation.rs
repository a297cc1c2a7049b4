//! Configuration validation.
//!
//! Checks the app config before any command touches storage or the
//! network.

use crate::domain::error::StockfolioError;
use crate::ports::config_port::ConfigPort;

pub fn validate_app_config(config: &dyn ConfigPort) -> Result<(), StockfolioError> {
    validate_storage_path(config)?;
    validate_market_section(config)?;
    Ok(())
}

fn validate_storage_path(config: &dyn ConfigPort) -> Result<(), StockfolioError> {
    match config.get_string("storage", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(StockfolioError::ConfigMissing {
            section: "storage".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_market_section(config: &dyn ConfigPort) -> Result<(), StockfolioError> {
    // The api_key is optional; mock data is used when it is absent.
    // A configured base_url must not be blank, though.
    if let Some(base_url) = config.get_string("market", "base_url") {
        if base_url.trim().is_empty() {
            return Err(StockfolioError::ConfigMissing {
                section: "market".to_string(),
                key: "base_url".to_string(),
            });
        }
    }
    Ok(())
}
