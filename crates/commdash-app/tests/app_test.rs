//! Runner commands against a mock commission backend.

use axum::routing::get;
use axum::{Json, Router};
use commdash_app::{AppConfig, Application, Command};
use commdash_client::ClientConfig;
use commdash_core::ConnectionStatus;
use commdash_ui::UiConfig;
use serde_json::json;
use tokio::net::TcpListener;

async fn start_backend() -> String {
    let router = Router::new()
        .route(
            "/api/commission-summary",
            get(|| async {
                Json(json!({
                    "status": "success",
                    "summary": {
                        "total_amount": 1500.0,
                        "total_new_business_premium": 250.5,
                        "total_clients": 3,
                        "total_products": 4,
                        "product_categories_count": 2,
                        "personality_types_count": 1,
                        "total_records": 2
                    }
                }))
            }),
        )
        .route(
            "/api/commission-data",
            get(|| async {
                Json(json!({
                    "status": "success",
                    "count": 2,
                    "data": [
                        {"Year": 2024, "Month": 1, "ProductCategoryDescription": "Life, Risk", "Amount": 1000.0},
                        {"Year": 2024, "Month": 2, "ProductCategoryDescription": "Funeral", "Amount": 500.0}
                    ]
                }))
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(base_url: String, export_dir: &std::path::Path) -> AppConfig {
    AppConfig {
        page: "/".to_string(),
        export_dir: export_dir.to_string_lossy().into_owned(),
        client: ClientConfig::with_base_url(base_url),
        ui: UiConfig {
            notification_dismiss_ms: 0,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_refresh_and_export_summary() {
    let base_url = start_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let app = tokio_test::assert_ok!(Application::new(config(base_url, dir.path())));

    assert!(app.handle_command(Command::parse("ctrl+r")).await);
    assert_eq!(
        app.ui().indicator().status(),
        Some(ConnectionStatus::Connected)
    );

    assert!(app.handle_command(Command::parse("ctrl+e")).await);
    let csv = std::fs::read_to_string(dir.path().join("summary.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("total_amount,total_new_business_premium,total_clients,total_products,product_categories_count,personality_types_count,total_records")
    );
    assert_eq!(lines.next(), Some("1500,250.5,3,4,2,1,2"));
}

#[tokio::test]
async fn test_goto_loads_rows_and_exports_in_server_order() {
    let base_url = start_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let app = Application::new(config(base_url, dir.path())).unwrap();

    assert!(app.handle_command(Command::parse("goto /trends")).await);
    assert!(app.handle_command(Command::parse("ctrl+e")).await);

    let csv = std::fs::read_to_string(dir.path().join("trends.csv")).unwrap();
    assert_eq!(
        csv,
        "Year,Month,ProductCategoryDescription,Amount\n2024,1,\"Life, Risk\",1000\n2024,2,Funeral,500"
    );
}

#[tokio::test]
async fn test_export_before_load_warns_without_file() {
    let base_url = start_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let app = Application::new(config(base_url, dir.path())).unwrap();

    assert!(app.handle_command(Command::parse("ctrl+e")).await);
    assert!(!dir.path().join("summary.csv").exists());
}

#[tokio::test]
async fn test_quit_stops() {
    let dir = tempfile::tempdir().unwrap();
    let app = Application::new(config("http://127.0.0.1:9".to_string(), dir.path())).unwrap();
    assert!(!app.handle_command(Command::Quit).await);
    assert!(app.handle_command(Command::parse("")).await);
}
