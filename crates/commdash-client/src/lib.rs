//! commdash-client - backend access for the commission dashboard.
//!
//! [`ApiClient::call`] wraps every request with the dashboard's side
//! effects: the loading overlay is held for the duration of the call, the
//! connection badge follows the outcome, and any failure raises exactly one
//! `Connection error: ...` notification before being returned.
//!
//! [`ConnectionMonitor`] probes the health path on a fixed interval and only
//! touches the connection badge.

mod client;
mod config;
mod error;
mod monitor;

pub use client::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use monitor::ConnectionMonitor;
