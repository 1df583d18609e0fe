//! Wiring of the shared UI state.

use std::sync::Arc;

use crate::config::UiConfig;
use crate::connection::ConnectionIndicator;
use crate::input::InputHandler;
use crate::loading::LoadingTracker;
use crate::notify::Notifier;
use crate::refresh::{PageRegistry, RefreshDispatcher};
use crate::reporter::ErrorReporter;
use crate::surface::Surface;

/// Shared UI state built over one surface.
///
/// Cloning is cheap; every component is reference counted.
#[derive(Clone)]
pub struct UiContext {
    surface: Arc<dyn Surface>,
    notifier: Notifier,
    loading: LoadingTracker,
    indicator: ConnectionIndicator,
    reporter: ErrorReporter,
    config: UiConfig,
}

impl UiContext {
    pub fn new(surface: Arc<dyn Surface>, config: &UiConfig) -> Self {
        let notifier = Notifier::new(surface.clone(), config);
        Self {
            loading: LoadingTracker::new(surface.clone()),
            indicator: ConnectionIndicator::new(surface.clone()),
            reporter: ErrorReporter::new(notifier.clone()),
            notifier,
            surface,
            config: config.clone(),
        }
    }

    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    pub fn indicator(&self) -> &ConnectionIndicator {
        &self.indicator
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn dispatcher(&self, registry: Arc<PageRegistry>) -> RefreshDispatcher {
        RefreshDispatcher::new(
            registry,
            self.surface.clone(),
            self.loading.clone(),
            self.reporter.clone(),
        )
    }

    pub fn input_handler(&self, dispatcher: RefreshDispatcher) -> InputHandler {
        InputHandler::new(dispatcher, self.surface.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_components_share_the_surface() {
        let surface = Arc::new(RecordingSurface::default());
        let ui = UiContext::new(surface.clone(), &UiConfig::default());

        let _guard = ui.loading().begin();
        ui.indicator().set_connected(true);

        assert!(surface.is_loading_visible());
        assert!(surface.connection().is_some());
        assert_eq!(ui.config().max_notifications, 5);
    }
}
