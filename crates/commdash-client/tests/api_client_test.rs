//! Wrapped API call side effects against a mock backend.

mod common;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use commdash_client::{ApiError, RequestOptions};
use commdash_core::{ConnectionStatus, Severity};
use common::{client_for, closed_url, MockBackend};
use serde_json::{json, Value};

fn backend() -> Router {
    Router::new()
        .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/ok", get(|| async { Json(json!({"value": 42, "name": "gross"})) }))
        .route("/text", get(|| async { "not json" }))
        .route(
            "/headers",
            get(|headers: HeaderMap| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "content_type": content_type }))
            }),
        )
        .route("/echo", post(|Json(body): Json<Value>| async move { Json(body) }))
        .route(
            "/api/commission-summary",
            get(|| async {
                Json(json!({
                    "status": "success",
                    "summary": {
                        "total_amount": 1234.5,
                        "total_new_business_premium": 300.0,
                        "total_clients": 12,
                        "total_products": 15,
                        "product_categories_count": 4,
                        "personality_types_count": 2,
                        "total_records": 40
                    }
                }))
            }),
        )
        .route(
            "/api/commission-data",
            get(|| async {
                Json(json!({
                    "status": "error",
                    "message": "Failed to retrieve commission data"
                }))
            }),
        )
}

#[tokio::test]
async fn test_http_500_sets_disconnected_and_notifies_once() {
    let server = MockBackend::start(backend()).await;
    let (surface, ui, client) = client_for(&server.url());

    let result: Result<Value, ApiError> = client.get("/fail").await;

    let err = tokio_test::assert_err!(result);
    assert_eq!(err.status(), Some(500));
    assert!(!ui.loading().is_loading());
    assert!(!surface.is_loading_visible());
    assert_eq!(ui.indicator().status(), Some(ConnectionStatus::Disconnected));

    let shown = surface.shown_notifications();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].severity, Severity::Error);
    assert_eq!(shown[0].message, "Connection error: HTTP error! status: 500");

    server.shutdown();
}

#[tokio::test]
async fn test_http_200_sets_connected_and_returns_body() {
    let server = MockBackend::start(backend()).await;
    let (surface, ui, client) = client_for(&server.url());

    let body: Value = tokio_test::assert_ok!(client.get("/ok").await);

    assert_eq!(body, json!({"value": 42, "name": "gross"}));
    assert_eq!(ui.indicator().status(), Some(ConnectionStatus::Connected));
    assert!(!ui.loading().is_loading());
    assert!(surface.shown_notifications().is_empty());

    server.shutdown();
}

#[tokio::test]
async fn test_decode_failure_is_reported() {
    let server = MockBackend::start(backend()).await;
    let (surface, ui, client) = client_for(&server.url());

    let err = client.get::<Value>("/text").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(ui.indicator().status(), Some(ConnectionStatus::Disconnected));
    assert_eq!(surface.shown_notifications().len(), 1);
    assert!(!ui.loading().is_loading());

    server.shutdown();
}

#[tokio::test]
async fn test_transport_failure_is_reported() {
    let url = closed_url().await;
    let (surface, ui, client) = client_for(&url);

    let err = client.get::<Value>("/ok").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(ui.indicator().status(), Some(ConnectionStatus::Disconnected));
    assert!(surface.shown_notifications()[0]
        .message
        .starts_with("Connection error: "));
    assert!(!ui.loading().is_loading());
}

#[tokio::test]
async fn test_default_and_overridden_content_type() {
    let server = MockBackend::start(backend()).await;
    let (_surface, _ui, client) = client_for(&server.url());

    let default: Value = client.get("/headers").await.unwrap();
    assert_eq!(default["content_type"], "application/json");

    let overridden: Value = client
        .call(
            "/headers",
            RequestOptions::get().header("Content-Type", "text/plain"),
        )
        .await
        .unwrap();
    assert_eq!(overridden["content_type"], "text/plain");

    server.shutdown();
}

#[tokio::test]
async fn test_post_body_round_trip() {
    let server = MockBackend::start(backend()).await;
    let (_surface, _ui, client) = client_for(&server.url());

    let sent = json!({"year": 2024, "month": 3});
    let echoed: Value = client
        .call("/echo", RequestOptions::post(sent.clone()))
        .await
        .unwrap();
    assert_eq!(echoed, sent);

    server.shutdown();
}

#[tokio::test]
async fn test_commission_summary_envelope() {
    let server = MockBackend::start(backend()).await;
    let (_surface, _ui, client) = client_for(&server.url());

    let summary = client.commission_summary().await.unwrap();
    assert_eq!(summary.total_amount, 1234.5);
    assert_eq!(summary.total_clients, 12);

    server.shutdown();
}

#[tokio::test]
async fn test_error_envelope_is_returned_without_notification() {
    let server = MockBackend::start(backend()).await;
    let (surface, ui, client) = client_for(&server.url());

    let err = client.commission_data().await.unwrap_err();

    assert!(matches!(err, ApiError::Api(_)));
    assert!(err.to_string().contains("Failed to retrieve commission data"));
    assert_eq!(ui.indicator().status(), Some(ConnectionStatus::Connected));
    assert!(surface.shown_notifications().is_empty());

    server.shutdown();
}
