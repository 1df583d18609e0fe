//! In-flight request tracking behind the loading overlay.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::surface::Surface;

struct LoadingInner {
    surface: Arc<dyn Surface>,
    in_flight: Mutex<usize>,
}

/// Counts wrapped operations in flight.
///
/// The overlay is shown when the count leaves zero and hidden when it
/// returns to zero, so overlapping calls never hide it early.
#[derive(Clone)]
pub struct LoadingTracker {
    inner: Arc<LoadingInner>,
}

impl LoadingTracker {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self {
            inner: Arc::new(LoadingInner {
                surface,
                in_flight: Mutex::new(0),
            }),
        }
    }

    /// Mark one operation as started. Dropping the guard ends it.
    pub fn begin(&self) -> LoadingGuard {
        let mut count = self.inner.in_flight.lock();
        *count += 1;
        if *count == 1 {
            self.inner.surface.set_loading_visible(true);
        }
        trace!(in_flight = *count, "Loading started");
        LoadingGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.inner.in_flight.lock() > 0
    }

    pub fn in_flight(&self) -> usize {
        *self.inner.in_flight.lock()
    }
}

impl std::fmt::Debug for LoadingTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingTracker")
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// RAII guard for one in-flight operation.
#[must_use = "loading ends as soon as the guard is dropped"]
pub struct LoadingGuard {
    inner: Arc<LoadingInner>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut count = self.inner.in_flight.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.inner.surface.set_loading_visible(false);
        }
        trace!(in_flight = *count, "Loading finished");
    }
}
