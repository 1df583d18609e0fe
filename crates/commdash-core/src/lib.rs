//! Core domain types for the commission dashboard client.
//!
//! This crate provides the types shared by every other commdash crate:
//! - `Severity`, `ConnectionStatus`: visual states with their style/icon pairs
//! - `Page`: dashboard pages and their URL paths
//! - `format`: en-ZA currency/number/percentage formatters
//! - `chart`: default chart options with currency-aware labels
//! - `models`: commission API response types

pub mod chart;
pub mod error;
pub mod format;
pub mod models;
pub mod page;
pub mod types;

pub use chart::ChartDefaults;
pub use error::{CoreError, Result};
pub use format::{
    format_currency, format_currency_value, format_number, format_number_value,
    format_percentage, format_percentage_value, parse_amount,
};
pub use models::{ApiEnvelope, CommissionRecord, CommissionSummary, EnvelopeStatus};
pub use page::Page;
pub use types::{ConnectionStatus, Severity};
