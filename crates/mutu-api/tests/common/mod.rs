//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mutu_core::clock::Clock;
use mutu_core::rng::DeterministicRng;
use mutu_core::store::StateStore;
use mutu_store::MemoryStore;
use mutu_test_support::{FixedClock, MockRng, at, fixture_content};
use tower::ServiceExt;

use mutu_api::routes;
use mutu_api::state::AppState;

/// Fixed instant used across all integration tests: Valentine's Day 2026.
pub fn fixed_clock() -> FixedClock {
    FixedClock(at(2026, 2, 14, 0, 0))
}

/// Build the full app over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with_store(Arc::new(MemoryStore::new()))
}

/// Build the full app over `store` with the fixture document, a fixed clock
/// and an order-preserving RNG. Uses the same router as `main.rs`.
pub fn build_test_app_with_store(store: Arc<dyn StateStore>) -> Router {
    build_test_app_at(store, fixed_clock())
}

/// Build the app over `store` with its clock frozen at `clock`. Two apps
/// sharing a store stand in for the same client at two moments.
pub fn build_test_app_at(store: Arc<dyn StateStore>, clock: FixedClock) -> Router {
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(clock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
    let app_state = AppState::new(Arc::new(fixture_content()), clock, rng, store);
    routes::app(app_state)
}

/// Build the app and pass the entry gate with a known phrase.
pub async fn build_unlocked_app() -> Router {
    let app = build_test_app();
    pass_gate(app.clone()).await;
    app
}

/// Pass the entry gate on `app`.
pub async fn pass_gate(app: Router) {
    let (status, _) = post_json(
        app,
        "/api/v1/unlocks/gate",
        &serde_json::json!({ "phrase": "mutu" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("POST", uri, body)).await
}

/// Send a POST request with an empty JSON object.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    post_json(app, uri, &serde_json::json!({})).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, json_request("PUT", uri, body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}
