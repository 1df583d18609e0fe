//! UI configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Notification and refresh timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Delay before a notification removes itself (0 = never).
    #[serde(default = "default_notification_dismiss_ms")]
    pub notification_dismiss_ms: u64,
    /// Fade-out duration handed to the surface on removal.
    #[serde(default = "default_notification_fade_ms")]
    pub notification_fade_ms: u64,
    /// Maximum simultaneously visible notifications; the oldest is dropped
    /// beyond it (0 = unbounded).
    #[serde(default = "default_max_notifications")]
    pub max_notifications: usize,
    /// Auto-refresh interval for the current page. 0 disables it.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_notification_dismiss_ms() -> u64 {
    5_000
}

fn default_notification_fade_ms() -> u64 {
    300
}

fn default_max_notifications() -> usize {
    5
}

fn default_refresh_interval_secs() -> u64 {
    300
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_dismiss_ms: default_notification_dismiss_ms(),
            notification_fade_ms: default_notification_fade_ms(),
            max_notifications: default_max_notifications(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl UiConfig {
    pub fn dismiss_after(&self) -> Option<Duration> {
        (self.notification_dismiss_ms > 0).then(|| Duration::from_millis(self.notification_dismiss_ms))
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.notification_fade_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
