//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod file_storage_adapter;
pub mod finnhub_adapter;
pub mod mock_quote_adapter;
