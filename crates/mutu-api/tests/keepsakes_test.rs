//! Integration tests for the coupon and note endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn coupon_ids(view: &serde_json::Value) -> Vec<String> {
    view["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn test_coupons_are_listed_by_rarity() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) = common::get_json(app, "/api/v1/keepsakes/coupons").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        coupon_ids(&json),
        vec![
            "c_nurse_rescue",
            "c_godawari_repeat",
            "c_listen_first",
            "c_momo_movie",
            "c_phone_free_walk"
        ]
    );
    assert_eq!(json["items"][0]["rarity"], "Legendary");
    assert_eq!(json["items"][0]["unlocked"], false);
}

#[tokio::test]
async fn test_unlocked_filter_hides_vault_coupons() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) =
        common::get_json(app, "/api/v1/keepsakes/coupons?filter=unlocked").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        coupon_ids(&json),
        vec!["c_listen_first", "c_momo_movie", "c_phone_free_walk"]
    );
}

#[tokio::test]
async fn test_toggle_coupon_redeems_then_undoes() {
    // Arrange
    let app = common::build_unlocked_app().await;
    let body = json!({ "coupon_id": "c_momo_movie", "filter": "redeemed" });

    // Act
    let (status, redeemed) =
        common::post_json(app.clone(), "/api/v1/keepsakes/coupons/toggle", &body).await;
    let (_, undone) = common::post_json(app, "/api/v1/keepsakes/coupons/toggle", &body).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(redeemed["events"], json!(["keepsakes.coupon_redeemed"]));
    assert_eq!(coupon_ids(&redeemed["view"]), vec!["c_momo_movie"]);
    assert_eq!(redeemed["view"]["redeemed_count"], 1);
    assert_eq!(undone["events"], json!(["keepsakes.coupon_redemption_undone"]));
    assert_eq!(undone["view"]["items"], json!([]));
}

#[tokio::test]
async fn test_toggle_locked_coupon_is_rejected() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/v1/keepsakes/coupons/toggle",
        &json!({ "coupon_id": "c_nurse_rescue" }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "rejected");
}

#[tokio::test]
async fn test_toggle_unknown_coupon_returns_404() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/v1/keepsakes/coupons/toggle",
        &json!({ "coupon_id": "c_nope" }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_save_note_keeps_text_and_shows_toast() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) = common::put_json(
        app.clone(),
        "/api/v1/keepsakes/note",
        &json!({ "text": "  see you sunday  " }),
    )
    .await;
    let (_, note) = common::get_json(app, "/api/v1/keepsakes/note").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["events"], json!(["keepsakes.note_saved"]));
    assert_eq!(json["view"]["saved_toast"]["primary"], "Saved");
    assert_eq!(note["text"], "  see you sunday  ");
    assert!(note["saved_toast"].is_null());
}

#[tokio::test]
async fn test_oversized_note_returns_400() {
    // Arrange
    let app = common::build_unlocked_app().await;
    let text = "a".repeat(10_001);

    // Act
    let (status, json) =
        common::put_json(app, "/api/v1/keepsakes/note", &json!({ "text": text })).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_clear_note_empties_it() {
    // Arrange
    let app = common::build_unlocked_app().await;
    common::put_json(
        app.clone(),
        "/api/v1/keepsakes/note",
        &json!({ "text": "hello" }),
    )
    .await;

    // Act
    let (status, json) = common::delete_json(app.clone(), "/api/v1/keepsakes/note").await;
    let (_, note) = common::get_json(app, "/api/v1/keepsakes/note").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["events"], json!(["keepsakes.note_cleared"]));
    assert_eq!(note["text"], "");
}
