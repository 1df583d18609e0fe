//! Prometheus metrics and structured logging for commdash.
//!
//! - Structured logging with tracing (JSON in production, pretty otherwise)
//! - Prometheus counters/gauges for API calls, connectivity, notifications,
//!   page refreshes, exports and reported errors

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
