//! Integration tests for overlapping requests against the file store.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use mutu_store::JsonFileStore;
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_taps_and_passcode_keep_every_flag() {
    for _ in 0..10 {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let app = common::build_test_app_with_store(Arc::new(store));
        common::pass_gate(app.clone()).await;

        // Act
        let mut requests = Vec::new();
        for _ in 0..7 {
            let app = app.clone();
            requests.push(tokio::spawn(async move {
                common::post_empty(app, "/api/v1/unlocks/vault/tap").await.0
            }));
        }
        let passcode_app = app.clone();
        requests.push(tokio::spawn(async move {
            common::post_json(passcode_app, "/api/v1/unlocks/future", &json!({ "code": "mutu" }))
                .await
                .0
        }));
        let mut statuses = Vec::new();
        for request in requests {
            statuses.push(request.await.unwrap());
        }
        let (_, unlocks) = common::get_json(app, "/api/v1/unlocks").await;

        // Assert
        assert!(statuses.iter().all(|status| *status == StatusCode::OK), "{statuses:?}");
        assert_eq!(unlocks["gate_passed"], true);
        assert_eq!(unlocks["vault_unlocked"], true);
        assert_eq!(unlocks["vault_taps"], 7);
        assert!(!unlocks["future_passcodes"].as_array().unwrap().is_empty());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_coupon_toggles_are_applied_in_turn() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).await.unwrap();
    let app = common::build_test_app_with_store(Arc::new(store));
    common::pass_gate(app.clone()).await;

    // Act
    let mut requests = Vec::new();
    for _ in 0..4 {
        let app = app.clone();
        requests.push(tokio::spawn(async move {
            common::post_json(
                app,
                "/api/v1/keepsakes/coupons/toggle",
                &json!({ "coupon_id": "c_listen_first" }),
            )
            .await
            .0
        }));
    }
    for request in requests {
        assert_eq!(request.await.unwrap(), StatusCode::OK);
    }
    let (_, coupons) = common::get_json(app, "/api/v1/keepsakes/coupons?filter=redeemed").await;

    // Assert
    assert_eq!(coupons["redeemed_count"], 0);
}
