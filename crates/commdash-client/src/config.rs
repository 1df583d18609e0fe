//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin; relative request paths are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path probed by the connection monitor.
    #[serde(default = "default_health_path")]
    pub health_path: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Seconds between health checks. 0 disables the monitor.
    #[serde(default = "default_connection_check_interval_secs")]
    pub connection_check_interval_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_health_path() -> String {
    "/api/commission-summary".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_connection_check_interval_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_path: default_health_path(),
            request_timeout_ms: default_request_timeout_ms(),
            connection_check_interval_secs: default_connection_check_interval_secs(),
        }
    }
}

impl ClientConfig {
    /// Config pointed at another origin, other fields default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.connection_check_interval_secs)
    }
}
