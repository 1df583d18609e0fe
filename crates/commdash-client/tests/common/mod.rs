//! Mock commission backend for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use commdash_client::{ApiClient, ClientConfig};
use commdash_ui::{RecordingSurface, UiConfig, UiContext};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// An axum server bound to an ephemeral local port.
pub struct MockBackend {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self { addr, handle }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn shutdown(self) {
        self.handle.abort();
    }
}

/// UI state over a recording surface plus a client for `base_url`.
pub fn client_for(base_url: &str) -> (Arc<RecordingSurface>, UiContext, ApiClient) {
    let surface = Arc::new(RecordingSurface::default());
    let config = UiConfig {
        notification_dismiss_ms: 0,
        ..Default::default()
    };
    let ui = UiContext::new(surface.clone(), &config);
    let client = ApiClient::new(&ClientConfig::with_base_url(base_url), &ui).unwrap();
    (surface, ui, client)
}

/// A URL on which nothing is listening.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
