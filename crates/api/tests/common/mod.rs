//! Common test utilities for integration tests.
//!
//! Every test gets its own in-memory SQLite database with migrations applied
//! and a temporary export directory.

// Not every integration test binary uses every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fake::{faker::name::en::Name, Fake};
use project_planner_api::{app::create_app, config::Config};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router wired to a fresh database, plus the export directory it writes to.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub export_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let export_dir = TempDir::new().expect("Failed to create export dir");
        let config = test_config(&export_dir);
        let pool = create_test_pool(&config).await;
        let router = create_app(config, pool.clone());
        Self {
            router,
            pool,
            export_dir,
        }
    }

    /// Send a request and return status plus parsed body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, parse_response_body(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(get_request(uri)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(Method::POST, uri, body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(Method::PUT, uri, body)).await
    }

    pub async fn delete(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(Method::DELETE, uri, body)).await
    }

    /// Create a user and return its id.
    pub async fn create_user(&self, name: &str) -> i64 {
        let display_name: String = Name().fake();
        let (status, body) = self
            .post("/users", json!({"name": name, "display_name": display_name}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create user failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    /// Create a team administered by `admin` and return its id.
    pub async fn create_team(&self, name: &str, admin: i64) -> i64 {
        let (status, body) = self
            .post("/teams", json!({"name": name, "description": "", "admin": admin}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create team failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    /// Create a board on `team` and return its id.
    pub async fn create_board(&self, team: i64, name: &str) -> i64 {
        let (status, body) = self
            .post(&format!("/teams/{}/boards", team), json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create board failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    /// Add a task assigned to `user` and return its id.
    pub async fn add_task(&self, board: i64, title: &str, user: i64) -> i64 {
        let (status, body) = self
            .post(
                &format!("/boards/{}/tasks", board),
                json!({"title": title, "user_id": user}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "add task failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn set_status(&self, task: i64, status: &str) -> (StatusCode, Value) {
        self.put(&format!("/tasks/{}/status", task), json!({ "status": status }))
            .await
    }
}

/// Configuration pointing at an in-memory database and `export_dir`.
pub fn test_config(export_dir: &TempDir) -> Config {
    let dir = export_dir.path().to_string_lossy().to_string();
    Config::load_for_test(&[
        ("database.url", "sqlite::memory:"),
        ("export.output_dir", dir.as_str()),
    ])
    .expect("Failed to load test config")
}

/// Create a migrated in-memory pool.
pub async fn create_test_pool(config: &Config) -> SqlitePool {
    let pool = persistence::db::create_pool(&config.database.pool_config())
        .await
        .expect("Failed to create test pool");
    persistence::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a request with a raw, possibly malformed, JSON body.
pub fn raw_json_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Build a GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Parse response body as JSON; non-JSON bodies become `Value::String`.
pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).to_string()))
}

/// Assert an error envelope with the given status and code.
pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, code: &str) {
    assert_eq!(status, expected, "unexpected status, body: {}", body);
    assert_eq!(body["error"], code, "unexpected error code, body: {}", body);
    assert!(body["message"].is_string());
}
