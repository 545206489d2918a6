//! In-process HTTP tests for the health routes.
//!
//! The router is driven with `tower::ServiceExt::oneshot`; the database
//! handle is built lazily so no Postgres instance is needed — the health
//! routes never touch it.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use database::{Database, DatabaseSettings};
use http_body_util::BodyExt;
use tower::ServiceExt;
use web_server::{AppState, app};

fn test_app() -> axum::Router {
    let db = Database::connect_lazy(&DatabaseSettings::default())
        .expect("lazy pool construction performs no I/O");
    app(AppState { db })
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&body).unwrap();
    (status, value)
}

#[tokio::test]
async fn root_returns_the_service_banner() {
    let (status, body) = get_json("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"status": "ok", "message": "Todo API is running"})
    );
}

#[tokio::test]
async fn health_returns_healthy() {
    let (status, body) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "healthy"}));
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/todos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
