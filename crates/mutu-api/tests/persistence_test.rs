//! Integration tests for state surviving a restart on the file store.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use mutu_core::store::StorageKey;
use mutu_store::JsonFileStore;
use serde_json::json;

#[tokio::test]
async fn test_progress_survives_restart_with_file_store() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).await.unwrap();
    let first = common::build_test_app_with_store(Arc::new(store));
    common::pass_gate(first.clone()).await;
    common::post_json(first.clone(), "/api/v1/journey/go-to", &json!({ "index": 3 })).await;
    common::put_json(
        first.clone(),
        "/api/v1/keepsakes/note",
        &json!({ "text": "until next time" }),
    )
    .await;
    common::post_json(
        first,
        "/api/v1/keepsakes/coupons/toggle",
        &json!({ "coupon_id": "c_listen_first" }),
    )
    .await;

    // Act
    let reopened = JsonFileStore::open(dir.path()).await.unwrap();
    let second = common::build_test_app_with_store(Arc::new(reopened));
    let (cover_status, _) = common::get_json(second.clone(), "/api/v1/content/cover").await;
    let (_, journey) = common::get_json(second.clone(), "/api/v1/journey").await;
    let (_, note) = common::get_json(second.clone(), "/api/v1/keepsakes/note").await;
    let (_, coupons) = common::get_json(second, "/api/v1/keepsakes/coupons?filter=redeemed").await;

    // Assert
    assert_eq!(cover_status, StatusCode::OK);
    assert_eq!(journey["step_id"], "step_gallery");
    assert_eq!(note["text"], "until next time");
    assert_eq!(coupons["items"][0]["id"], "c_listen_first");
    assert_eq!(coupons["redeemed_count"], 1);
}

#[tokio::test]
async fn test_corrupt_slot_falls_back_to_default() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let slot = format!("{}.json", StorageKey::QuizBestScore.as_str());
    std::fs::write(dir.path().join(slot), "{not json").unwrap();
    let store = JsonFileStore::open(dir.path()).await.unwrap();
    let app = common::build_test_app_with_store(Arc::new(store));
    common::pass_gate(app.clone()).await;

    // Act
    let (status, json) = common::get_json(app, "/api/v1/play/quiz").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["best_score"], 0);
}
