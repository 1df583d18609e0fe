//! The rendering surface and an in-memory recording implementation.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use commdash_core::ConnectionStatus;
use parking_lot::{Mutex, RwLock};

use crate::error::UiResult;
use crate::notify::{Notification, NotificationId};

/// A file handed to the surface for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime: String,
    pub contents: String,
}

/// The page a dashboard renders into.
///
/// Implementations must be cheap and non-blocking; callers may invoke them
/// while holding short-lived locks.
pub trait Surface: Send + Sync {
    /// Show or hide the loading overlay.
    fn set_loading_visible(&self, visible: bool);

    /// Render the connection badge.
    fn render_connection(&self, status: ConnectionStatus);

    /// Append a dismissible notification banner.
    fn append_notification(&self, notification: &Notification);

    /// Remove a banner, fading it out over `fade`.
    fn remove_notification(&self, id: NotificationId, fade: Duration);

    /// Whether the page contains a refreshable content region.
    fn has_page_content(&self) -> bool;

    /// Path of the page currently shown (e.g. `/trends`).
    fn current_path(&self) -> String;

    /// Deliver a file to the user.
    fn download(&self, file: &Download) -> UiResult<()>;

    /// Open the print dialog.
    fn print(&self);
}

/// Side effects observed by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    LoadingVisible(bool),
    Connection(ConnectionStatus),
    NotificationShown(Notification),
    NotificationRemoved(NotificationId),
    Download(Download),
    Print,
}

/// Surface that records every side effect in memory.
///
/// Used by tests and by headless runs that only need the resulting state.
#[derive(Debug)]
pub struct RecordingSurface {
    path: RwLock<String>,
    page_content: AtomicBool,
    events: Mutex<Vec<SurfaceEvent>>,
    visible: Mutex<Vec<Notification>>,
    loading_visible: AtomicBool,
    connection: RwLock<Option<ConnectionStatus>>,
    prints: AtomicUsize,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new("/")
    }
}

impl RecordingSurface {
    /// Create a surface showing `path` with page content present.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: RwLock::new(path.into()),
            page_content: AtomicBool::new(true),
            events: Mutex::new(Vec::new()),
            visible: Mutex::new(Vec::new()),
            loading_visible: AtomicBool::new(false),
            connection: RwLock::new(None),
            prints: AtomicUsize::new(0),
        }
    }

    /// Navigate to another path.
    pub fn set_path(&self, path: impl Into<String>) {
        *self.path.write() = path.into();
    }

    pub fn set_page_content(&self, present: bool) {
        self.page_content.store(present, Ordering::SeqCst);
    }

    /// All recorded events in order.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().clone()
    }

    /// Banners currently on screen, oldest first.
    pub fn visible_notifications(&self) -> Vec<Notification> {
        self.visible.lock().clone()
    }

    /// Every banner ever shown, oldest first.
    pub fn shown_notifications(&self) -> Vec<Notification> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::NotificationShown(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn downloads(&self) -> Vec<Download> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Download(d) => Some(d.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible.load(Ordering::SeqCst)
    }

    pub fn connection(&self) -> Option<ConnectionStatus> {
        *self.connection.read()
    }

    pub fn print_count(&self) -> usize {
        self.prints.load(Ordering::SeqCst)
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.lock().push(event);
    }
}

impl Surface for RecordingSurface {
    fn set_loading_visible(&self, visible: bool) {
        self.loading_visible.store(visible, Ordering::SeqCst);
        self.record(SurfaceEvent::LoadingVisible(visible));
    }

    fn render_connection(&self, status: ConnectionStatus) {
        *self.connection.write() = Some(status);
        self.record(SurfaceEvent::Connection(status));
    }

    fn append_notification(&self, notification: &Notification) {
        self.visible.lock().push(notification.clone());
        self.record(SurfaceEvent::NotificationShown(notification.clone()));
    }

    fn remove_notification(&self, id: NotificationId, _fade: Duration) {
        self.visible.lock().retain(|n| n.id != id);
        self.record(SurfaceEvent::NotificationRemoved(id));
    }

    fn has_page_content(&self) -> bool {
        self.page_content.load(Ordering::SeqCst)
    }

    fn current_path(&self) -> String {
        self.path.read().clone()
    }

    fn download(&self, file: &Download) -> UiResult<()> {
        self.record(SurfaceEvent::Download(file.clone()));
        Ok(())
    }

    fn print(&self) {
        self.prints.fetch_add(1, Ordering::SeqCst);
        self.record(SurfaceEvent::Print);
    }
}
