//! Shared helpers for integration tests

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use folioqa::config::Config;
use folioqa::server::{build_router, AppState};

/// Gemini generateContent path for the default test model
pub fn generate_path() -> String {
    format!(
        "/v1beta/models/{}:generateContent",
        Config::default().provider.gemini.model
    )
}

/// Build a router whose provider points at the given mock server base
pub fn test_router(api_base: &str, max_retries: usize) -> Router {
    let mut config = Config::default();
    config.provider.gemini.api_base = api_base.to_string();
    config.provider.gemini.max_retries = max_retries;

    let state = AppState::from_config(&config, "test-key".to_string()).unwrap();
    build_router(Arc::new(state), &config.server.allowed_origins)
}

/// A well-formed Gemini generateContent response body
pub fn gemini_answer(text: &str) -> Value {
    json!({
        "candidates": [
            {"content": {"parts": [{"text": text}]}}
        ]
    })
}

/// Send a JSON POST through the router
pub async fn post_json(router: &Router, path: &str, body: Value) -> Response<Body> {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a GET through the router
pub async fn get(router: &Router, path: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON, asserting the expected status first
pub async fn json_body(response: Response<Body>, expected: StatusCode) -> Value {
    assert_eq!(response.status(), expected);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
