//! Page registry and the refresh/export dispatcher.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use commdash_core::Page;
use commdash_telemetry::Metrics;
use parking_lot::RwLock;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::loading::LoadingTracker;
use crate::reporter::ErrorReporter;
use crate::surface::Surface;

/// Boxed future returned by page handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Data hooks a page registers at start-up.
pub trait PageHandler: Send + Sync {
    /// Reload the page's data.
    fn refresh(&self) -> BoxFuture<'_, anyhow::Result<()>>;

    /// Export the page's data. Pages without an export do nothing.
    fn export(&self) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin(async { Ok::<(), anyhow::Error>(()) })
    }
}

/// Handlers keyed by page.
#[derive(Default)]
pub struct PageRegistry {
    handlers: RwLock<HashMap<Page, Arc<dyn PageHandler>>>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `page`, replacing any previous one.
    pub fn register(&self, page: Page, handler: Arc<dyn PageHandler>) {
        debug!(%page, "Page handler registered");
        self.handlers.write().insert(page, handler);
    }

    pub fn unregister(&self, page: Page) -> bool {
        self.handlers.write().remove(&page).is_some()
    }

    pub fn get(&self, page: Page) -> Option<Arc<dyn PageHandler>> {
        self.handlers.read().get(&page).cloned()
    }

    pub fn is_registered(&self, page: Page) -> bool {
        self.handlers.read().contains_key(&page)
    }
}

impl std::fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pages: Vec<Page> = self.handlers.read().keys().copied().collect();
        f.debug_struct("PageRegistry").field("pages", &pages).finish()
    }
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran and succeeded.
    Invoked(Page),
    /// The handler ran and failed; the error was reported.
    Failed(Page),
    /// Unknown path or no handler registered.
    Unhandled,
    /// Auto refresh skipped because a request was in flight or the page has
    /// no content region.
    Gated,
}

impl DispatchOutcome {
    /// Whether a handler was invoked.
    pub fn invoked(&self) -> bool {
        matches!(self, Self::Invoked(_) | Self::Failed(_))
    }
}

#[derive(Clone, Copy)]
enum Action {
    Refresh,
    Export,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::Export => "export",
        }
    }
}

/// Routes refresh and export requests to the handler of the current page.
#[derive(Clone)]
pub struct RefreshDispatcher {
    registry: Arc<PageRegistry>,
    surface: Arc<dyn Surface>,
    loading: LoadingTracker,
    reporter: ErrorReporter,
}

impl RefreshDispatcher {
    pub fn new(
        registry: Arc<PageRegistry>,
        surface: Arc<dyn Surface>,
        loading: LoadingTracker,
        reporter: ErrorReporter,
    ) -> Self {
        Self {
            registry,
            surface,
            loading,
            reporter,
        }
    }

    pub fn registry(&self) -> &Arc<PageRegistry> {
        &self.registry
    }

    /// Refresh whatever page the surface is showing.
    pub async fn refresh_current_page(&self) -> DispatchOutcome {
        self.dispatch(Action::Refresh).await
    }

    /// Export whatever page the surface is showing.
    pub async fn export_current_page(&self) -> DispatchOutcome {
        self.dispatch(Action::Export).await
    }

    /// One auto-refresh tick: refreshes only when no request is in flight and
    /// the page has a content region.
    pub async fn auto_refresh_tick(&self) -> DispatchOutcome {
        if self.loading.is_loading() || !self.surface.has_page_content() {
            debug!(
                loading = self.loading.is_loading(),
                "Auto refresh skipped"
            );
            Metrics::page_refresh("any", "skipped");
            return DispatchOutcome::Gated;
        }
        self.refresh_current_page().await
    }

    /// Tick every `period`, starting one period from now. Runs until the
    /// task is aborted. A zero period disables auto refresh and returns
    /// immediately.
    pub async fn run_auto_refresh(self, period: Duration) {
        if period.is_zero() {
            warn!("Auto refresh disabled (zero interval)");
            return;
        }
        info!(period_secs = period.as_secs(), "Auto refresh started");
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.auto_refresh_tick().await;
        }
    }

    async fn dispatch(&self, action: Action) -> DispatchOutcome {
        let path = self.surface.current_path();
        let Some(page) = Page::from_path(&path) else {
            debug!(%path, action = action.as_str(), "No page for path");
            return DispatchOutcome::Unhandled;
        };
        let Some(handler) = self.registry.get(page) else {
            debug!(%page, action = action.as_str(), "No handler registered");
            return DispatchOutcome::Unhandled;
        };

        let result = match action {
            Action::Refresh => handler.refresh().await,
            Action::Export => handler.export().await,
        };

        match result {
            Ok(()) => {
                debug!(%page, action = action.as_str(), "Page handler completed");
                if let Action::Refresh = action {
                    Metrics::page_refresh(page.as_str(), "ok");
                }
                DispatchOutcome::Invoked(page)
            }
            Err(e) => {
                warn!(%page, action = action.as_str(), error = %e, "Page handler failed");
                if let Action::Refresh = action {
                    Metrics::page_refresh(page.as_str(), "error");
                }
                self.reporter.report_unhandled_rejection(format!("{page} {}: {e:#}", action.as_str()));
                DispatchOutcome::Failed(page)
            }
        }
    }
}

impl std::fmt::Debug for RefreshDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshDispatcher")
            .field("registry", &self.registry)
            .field("loading", &self.loading)
            .finish()
    }
}
