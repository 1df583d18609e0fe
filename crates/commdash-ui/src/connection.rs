//! Connection status badge.

use std::sync::Arc;

use commdash_core::ConnectionStatus;
use commdash_telemetry::Metrics;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::surface::Surface;

/// Last known backend reachability, mirrored onto the surface.
///
/// Setting the same status twice is a no-op, so callers may report every
/// probe result without flicker.
#[derive(Clone)]
pub struct ConnectionIndicator {
    surface: Arc<dyn Surface>,
    status: Arc<Mutex<Option<ConnectionStatus>>>,
}

impl ConnectionIndicator {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self {
            surface,
            status: Arc::new(Mutex::new(None)),
        }
    }

    /// Record a new status. Returns true if the badge changed.
    pub fn set(&self, status: ConnectionStatus) -> bool {
        Metrics::backend_connected(status.is_connected());

        let mut current = self.status.lock();
        if *current == Some(status) {
            return false;
        }
        let previous = current.replace(status);
        self.surface.render_connection(status);
        drop(current);

        match (previous, status) {
            (Some(_), ConnectionStatus::Disconnected) => warn!("Backend connection lost"),
            (Some(_), ConnectionStatus::Connected) => info!("Backend connection restored"),
            (None, status) => info!(%status, "Backend status initialised"),
        }
        true
    }

    pub fn set_connected(&self, connected: bool) -> bool {
        self.set(ConnectionStatus::from_connected(connected))
    }

    /// `None` until the first request or probe settles.
    pub fn status(&self) -> Option<ConnectionStatus> {
        *self.status.lock()
    }
}

impl std::fmt::Debug for ConnectionIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionIndicator")
            .field("status", &self.status())
            .finish()
    }
}
