//! Periodic backend health probe.

use std::time::Duration;

use commdash_core::ConnectionStatus;
use commdash_telemetry::Metrics;
use commdash_ui::ConnectionIndicator;
use reqwest::Client;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::config::ClientConfig;

/// Probes the health path and updates the connection badge.
///
/// Probes do not show the loading overlay or raise notifications.
#[derive(Clone)]
pub struct ConnectionMonitor {
    http: Client,
    health_url: String,
    indicator: ConnectionIndicator,
    interval: Duration,
}

impl ConnectionMonitor {
    pub fn new(client: &ApiClient, config: &ClientConfig) -> Self {
        Self {
            http: client.http().clone(),
            health_url: client.resolve(&config.health_path),
            indicator: client.indicator().clone(),
            interval: config.check_interval(),
        }
    }

    /// Override the probe interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Probe once. Any 2xx counts as connected; other statuses and transport
    /// failures count as disconnected.
    pub async fn check_connection(&self) -> ConnectionStatus {
        let status = match self.http.get(&self.health_url).send().await {
            Ok(response) if response.status().is_success() => ConnectionStatus::Connected,
            Ok(response) => {
                debug!(status = %response.status(), "Health probe rejected");
                ConnectionStatus::Disconnected
            }
            Err(e) => {
                debug!(error = %e, "Health probe failed");
                ConnectionStatus::Disconnected
            }
        };
        Metrics::health_check(status.is_connected());
        self.indicator.set(status);
        status
    }

    /// Probe every interval, first probe one interval from now.
    ///
    /// Each probe runs in its own task, so a slow probe may overlap the next;
    /// whichever settles last sets the badge. A zero interval disables
    /// monitoring and returns immediately.
    pub async fn run(self) {
        if self.interval.is_zero() {
            warn!(url = %self.health_url, "Connection monitor disabled (zero interval)");
            return;
        }
        info!(url = %self.health_url, interval_secs = self.interval.as_secs(), "Connection monitor started");
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        loop {
            ticker.tick().await;
            let monitor = self.clone();
            tokio::spawn(async move {
                monitor.check_connection().await;
            });
        }
    }
}

impl std::fmt::Debug for ConnectionMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionMonitor")
            .field("health_url", &self.health_url)
            .field("interval", &self.interval)
            .finish()
    }
}
