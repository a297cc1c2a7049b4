//! Core domain types and logic.

pub mod error;
pub mod holding;
pub mod quote;
pub mod record_parser;
pub mod validation;
pub mod portfolio;
pub mod valuation;
pub mod refresh;
pub mod insights;
pub mod config_validation;
