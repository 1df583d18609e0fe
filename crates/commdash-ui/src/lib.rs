//! commdash-ui - presentation state for the commission dashboard.
//!
//! Every visual side effect goes through the [`Surface`] trait, which stands
//! in for the page: overlay visibility, notification banners, the connection
//! badge, file downloads and print requests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────── UiContext ─────────────────────────────┐
//! │                                                                     │
//! │  LoadingTracker   Notifier   ConnectionIndicator   ErrorReporter    │
//! │        │             │                │                  │          │
//! │        └─────────────┴───────┬────────┴──────────────────┘          │
//! │                              ▼                                      │
//! │                     Arc<dyn Surface>                                │
//! └─────────────────────────────────────────────────────────────────────┘
//!
//!   PageRegistry ──► RefreshDispatcher ◄── InputHandler (Ctrl+R/F5/E/P)
//!                        ▲
//!                        └── run_auto_refresh (every 5 min, gated)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use commdash_ui::{PageRegistry, UiConfig, UiContext};
//!
//! let ui = UiContext::new(surface, &UiConfig::default());
//! let registry = Arc::new(PageRegistry::new());
//! registry.register(Page::Summary, Arc::new(SummaryPage::new(client)));
//!
//! let dispatcher = ui.dispatcher(registry);
//! tokio::spawn(dispatcher.clone().run_auto_refresh(ui.config().refresh_interval()));
//! ```

mod config;
mod connection;
mod context;
mod error;
mod input;
mod loading;
mod notify;
mod refresh;
mod reporter;
mod surface;

pub use config::UiConfig;
pub use connection::ConnectionIndicator;
pub use context::UiContext;
pub use error::{UiError, UiResult};
pub use input::{InputHandler, Key, KeyEvent, Shortcut};
pub use loading::{LoadingGuard, LoadingTracker};
pub use notify::{Notification, NotificationId, Notifier};
pub use refresh::{BoxFuture, DispatchOutcome, PageHandler, PageRegistry, RefreshDispatcher};
pub use reporter::{ErrorReporter, ScriptError};
pub use surface::{Download, RecordingSurface, Surface, SurfaceEvent};
