//! Port traits decoupling the domain from storage, network and config.

pub mod config_port;
pub mod quote_port;
pub mod storage_port;
