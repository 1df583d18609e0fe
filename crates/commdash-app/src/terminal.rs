//! Surface that renders to the log and writes downloads to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use commdash_core::{ConnectionStatus, Page, Severity};
use commdash_ui::{Download, Notification, NotificationId, Surface, UiResult};
use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

/// Headless surface.
///
/// Banners and badge changes become log lines, downloads become files under
/// the export directory. Any known page path counts as having content.
#[derive(Debug)]
pub struct TerminalSurface {
    path: RwLock<String>,
    export_dir: PathBuf,
}

impl TerminalSurface {
    pub fn new(path: impl Into<String>, export_dir: impl AsRef<Path>) -> Self {
        Self {
            path: RwLock::new(path.into()),
            export_dir: export_dir.as_ref().to_path_buf(),
        }
    }

    /// Switch to another page path.
    pub fn navigate(&self, path: impl Into<String>) {
        let path = path.into();
        match Page::from_path(&path) {
            Some(page) => info!(%path, %page, "Navigated"),
            None => warn!(%path, "Navigated to a path without a dashboard page"),
        }
        *self.path.write() = path;
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

impl Surface for TerminalSurface {
    fn set_loading_visible(&self, visible: bool) {
        debug!(visible, "Loading overlay");
    }

    fn render_connection(&self, status: ConnectionStatus) {
        info!(status = status.label(), icon = status.icon(), "Connection");
    }

    fn append_notification(&self, notification: &Notification) {
        let icon = notification.severity.icon();
        match notification.severity {
            Severity::Error => error!(id = %notification.id, icon, "{}", notification.message),
            Severity::Warning => warn!(id = %notification.id, icon, "{}", notification.message),
            Severity::Info | Severity::Success => {
                info!(id = %notification.id, icon, "{}", notification.message)
            }
        }
    }

    fn remove_notification(&self, id: NotificationId, fade: Duration) {
        debug!(%id, fade_ms = fade.as_millis() as u64, "Notification removed");
    }

    fn has_page_content(&self) -> bool {
        Page::from_path(&self.path.read()).is_some()
    }

    fn current_path(&self) -> String {
        self.path.read().clone()
    }

    fn download(&self, file: &Download) -> UiResult<()> {
        std::fs::create_dir_all(&self.export_dir)?;
        let target = self.export_dir.join(&file.filename);
        std::fs::write(&target, file.contents.as_bytes())?;
        info!(path = %target.display(), mime = %file.mime, bytes = file.contents.len(), "File downloaded");
        Ok(())
    }

    fn print(&self) {
        info!(path = %self.current_path(), "Print requested");
    }
}
