//! Health probe behavior.

mod common;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use commdash_client::{ClientConfig, ConnectionMonitor};
use commdash_core::ConnectionStatus;
use commdash_ui::SurfaceEvent;
use common::{client_for, closed_url, MockBackend};

fn toggling_backend(healthy: Arc<AtomicBool>) -> Router {
    Router::new().route(
        "/api/commission-summary",
        get(move || {
            let healthy = healthy.clone();
            async move {
                if healthy.load(Ordering::SeqCst) {
                    (StatusCode::OK, "{}")
                } else {
                    (StatusCode::SERVICE_UNAVAILABLE, "down")
                }
            }
        }),
    )
}

fn counting_backend(hits: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/api/commission-summary",
        get(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (StatusCode::OK, "{}")
            }
        }),
    )
}

#[tokio::test]
async fn test_probe_follows_backend_health() {
    let healthy = Arc::new(AtomicBool::new(true));
    let server = MockBackend::start(toggling_backend(healthy.clone())).await;
    let (surface, ui, client) = client_for(&server.url());
    let monitor = ConnectionMonitor::new(&client, &ClientConfig::with_base_url(server.url()));

    assert_eq!(monitor.check_connection().await, ConnectionStatus::Connected);
    assert_eq!(ui.indicator().status(), Some(ConnectionStatus::Connected));

    healthy.store(false, Ordering::SeqCst);
    assert_eq!(monitor.check_connection().await, ConnectionStatus::Disconnected);
    assert_eq!(ui.indicator().status(), Some(ConnectionStatus::Disconnected));

    // Probes bypass the overlay and notifications.
    assert!(surface
        .events()
        .iter()
        .all(|e| matches!(e, SurfaceEvent::Connection(_))));

    server.shutdown();
}

#[tokio::test]
async fn test_probe_unreachable_backend() {
    let url = closed_url().await;
    let (_surface, _ui, client) = client_for(&url);
    let monitor = ConnectionMonitor::new(&client, &ClientConfig::with_base_url(url));

    assert_eq!(monitor.check_connection().await, ConnectionStatus::Disconnected);
}

#[tokio::test]
async fn test_run_checks_on_each_interval() {
    let hits = Arc::new(AtomicUsize::new(0));
    let server = MockBackend::start(counting_backend(hits.clone())).await;
    let (_surface, ui, client) = client_for(&server.url());
    let monitor = ConnectionMonitor::new(&client, &ClientConfig::with_base_url(server.url()))
        .with_interval(Duration::from_millis(200));
    let task = tokio::spawn(monitor.run());

    // First check waits a full interval.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(ui.indicator().status(), None);

    tokio::time::sleep(Duration::from_millis(600)).await;
    let seen = hits.load(Ordering::SeqCst);
    assert!((2..=4).contains(&seen), "expected about 3 checks, saw {seen}");
    assert_eq!(ui.indicator().status(), Some(ConnectionStatus::Connected));

    task.abort();
    server.shutdown();
}

#[tokio::test]
async fn test_zero_interval_disables_monitor() {
    let hits = Arc::new(AtomicUsize::new(0));
    let server = MockBackend::start(counting_backend(hits.clone())).await;
    let (_surface, _ui, client) = client_for(&server.url());
    let monitor = ConnectionMonitor::new(&client, &ClientConfig::with_base_url(server.url()))
        .with_interval(Duration::ZERO);

    tokio_test::assert_ok!(tokio::time::timeout(Duration::from_secs(1), monitor.run()).await);
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    server.shutdown();
}
