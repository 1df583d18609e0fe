//! Headless runner for the commission dashboard client.
//!
//! Wires the dashboard components over a terminal surface:
//! - connection monitor and gated auto refresh timers
//! - one handler per commission page, backed by the API client
//! - CSV exports written to a local directory
//! - shortcuts and navigation read from stdin

pub mod app;
pub mod config;
pub mod error;
pub mod pages;
pub mod terminal;

pub use app::{Application, Command};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use pages::{amount_totals, Breakdown, CommissionPage};
pub use terminal::TerminalSurface;
