//! Common test utilities
//!
//! Repositories and the router are exercised against an in-memory SQLite
//! database. The pool is capped at one connection: every connection to
//! `sqlite::memory:` would otherwise get its own empty database.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use interntrack::config::DatabaseConfig;
use interntrack::db;
use interntrack::server::{build_router, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

fn test_database_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    }
}

/// Fresh migrated in-memory database
pub async fn test_pool() -> SqlitePool {
    let pool = db::init_pool(&test_database_config())
        .await
        .expect("failed to open in-memory database");
    db::run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

/// Application state over a fresh in-memory database
pub async fn test_state() -> AppState {
    AppState::new(test_pool().await)
}

/// Router over a fresh in-memory database
pub async fn test_app() -> Router {
    build_router(test_state().await)
}

/// Send a request without a body and return (status, parsed JSON body)
pub async fn request(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// Send a request with a JSON body and return (status, parsed JSON body)
pub async fn request_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
