//! Transient notification banners.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use commdash_core::Severity;
use commdash_telemetry::Metrics;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::UiConfig;
use crate::surface::Surface;

/// Identifier of a shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

/// A banner as handed to the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

struct NotifierInner {
    surface: Arc<dyn Surface>,
    dismiss_after: Option<Duration>,
    fade: Duration,
    max_visible: usize,
    visible: Mutex<VecDeque<NotificationId>>,
    next_id: AtomicU64,
}

/// Shows notifications and removes them again.
///
/// Banners stack newest last. Past `max_notifications` the oldest visible
/// banner is removed first. Each banner removes itself after the configured
/// delay unless dismissed earlier.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

impl Notifier {
    pub fn new(surface: Arc<dyn Surface>, config: &UiConfig) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                surface,
                dismiss_after: config.dismiss_after(),
                fade: config.fade(),
                max_visible: config.max_notifications,
                visible: Mutex::new(VecDeque::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Show `message` with the given severity and return its id.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let notification = Notification {
            id: NotificationId(self.inner.next_id.fetch_add(1, Ordering::Relaxed)),
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        let id = notification.id;

        match severity {
            Severity::Error => error!(%id, message = %notification.message, "Notification"),
            Severity::Warning => warn!(%id, message = %notification.message, "Notification"),
            Severity::Info | Severity::Success => {
                info!(%id, %severity, message = %notification.message, "Notification")
            }
        }
        Metrics::notification(severity.as_str());

        {
            let mut visible = self.inner.visible.lock();
            self.inner.surface.append_notification(&notification);
            visible.push_back(id);

            if self.inner.max_visible > 0 {
                while visible.len() > self.inner.max_visible {
                    if let Some(oldest) = visible.pop_front() {
                        debug!(id = %oldest, "Dropping oldest notification");
                        self.inner.surface.remove_notification(oldest, self.inner.fade);
                        Metrics::notification_dropped();
                    }
                }
            }
        }

        if let Some(delay) = self.inner.dismiss_after {
            self.schedule_dismiss(id, delay);
        }
        id
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Success)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Warning)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, Severity::Error)
    }

    /// Remove a banner. Returns false if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut visible = self.inner.visible.lock();
        let Some(pos) = visible.iter().position(|v| *v == id) else {
            return false;
        };
        visible.remove(pos);
        self.inner.surface.remove_notification(id, self.inner.fade);
        true
    }

    /// Ids of the banners currently shown, oldest first.
    pub fn visible(&self) -> Vec<NotificationId> {
        self.inner.visible.lock().iter().copied().collect()
    }

    fn schedule_dismiss(&self, id: NotificationId, delay: Duration) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(%id, "No runtime available, notification will not auto-dismiss");
            return;
        };
        let notifier = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if notifier.dismiss(id) {
                debug!(%id, "Notification auto-dismissed");
            }
        });
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("visible", &self.visible())
            .field("max_visible", &self.inner.max_visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn notifier(config: UiConfig) -> (Arc<RecordingSurface>, Notifier) {
        let surface = Arc::new(RecordingSurface::default());
        let notifier = Notifier::new(surface.clone(), &config);
        (surface, notifier)
    }

    fn no_timer() -> UiConfig {
        UiConfig {
            notification_dismiss_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_notifications_stack_in_order() {
        let (surface, notifier) = notifier(no_timer());
        let a = notifier.info("first");
        let b = notifier.error("second");

        assert_eq!(notifier.visible(), vec![a, b]);
        let shown = surface.visible_notifications();
        assert_eq!(shown[0].message, "first");
        assert_eq!(shown[1].severity, Severity::Error);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let (surface, notifier) = notifier(UiConfig {
            max_notifications: 2,
            ..no_timer()
        });
        let a = notifier.info("a");
        let b = notifier.info("b");
        let c = notifier.info("c");

        assert_eq!(notifier.visible(), vec![b, c]);
        let messages: Vec<_> = surface
            .visible_notifications()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["b", "c"]);
        assert!(!notifier.dismiss(a));
    }

    #[test]
    fn test_zero_cap_is_unbounded() {
        let (_surface, notifier) = notifier(UiConfig {
            max_notifications: 0,
            ..no_timer()
        });
        for i in 0..20 {
            notifier.warning(format!("w{i}"));
        }
        assert_eq!(notifier.visible().len(), 20);
    }

    #[test]
    fn test_manual_dismiss() {
        let (surface, notifier) = notifier(no_timer());
        let id = notifier.success("saved");
        assert!(notifier.dismiss(id));
        assert!(!notifier.dismiss(id));
        assert!(surface.visible_notifications().is_empty());
    }

    #[test]
    fn test_without_runtime_does_not_panic() {
        let (_surface, notifier) = notifier(UiConfig::default());
        let id = notifier.info("no runtime");
        assert_eq!(notifier.visible(), vec![id]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_after_delay() {
        let (surface, notifier) = notifier(UiConfig::default());
        notifier.info("transient");

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(surface.visible_notifications().len(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(surface.visible_notifications().is_empty());
        assert!(notifier.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismissed_before_timer_is_not_removed_twice() {
        let (surface, notifier) = notifier(UiConfig::default());
        let id = notifier.info("x");
        assert!(notifier.dismiss(id));

        tokio::time::sleep(Duration::from_secs(6)).await;
        let removals = surface
            .events()
            .into_iter()
            .filter(|e| matches!(e, crate::surface::SurfaceEvent::NotificationRemoved(_)))
            .count();
        assert_eq!(removals, 1);
    }
}
