//! Integration tests for service-level endpoints and middleware.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{get_request, TestApp};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["connected"], true);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_root_info() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["name"].is_string());
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "/users"));
    assert!(endpoints.iter().any(|e| e == "/boards/:board_id/export"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("x-request-id", "req-abc-123")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req-abc-123"
    );
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(get_request("/users"))
        .await
        .unwrap();

    let id = response.headers().get("x-request-id").unwrap();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(get_request("/projects"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
