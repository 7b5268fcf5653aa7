//! Integration tests for the quiz, memory match and finale endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use mutu_store::MemoryStore;
use serde_json::json;

async fn answer(app: axum::Router, question_id: &str, option_index: usize) -> serde_json::Value {
    let (status, json) = common::post_json(
        app,
        "/api/v1/play/quiz/answer",
        &json!({ "question_id": question_id, "option_index": option_index }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json
}

async fn flip(app: axum::Router, card_index: usize) -> (StatusCode, serde_json::Value) {
    common::post_json(
        app,
        "/api/v1/play/match/flip",
        &json!({ "card_index": card_index }),
    )
    .await
}

#[tokio::test]
async fn test_quiz_starts_at_first_question() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) = common::get_json(app, "/api/v1/play/quiz").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);
    assert_eq!(json["score"], 0);
    assert_eq!(json["question"]["id"], "q_919");
    assert_eq!(json["question"]["options"].as_array().unwrap().len(), 3);
    assert!(json["result"].is_null());
}

#[tokio::test]
async fn test_perfect_quiz_completes_with_high_tier_and_best_score() {
    // Arrange
    let app = common::build_unlocked_app().await;
    answer(app.clone(), "q_919", 1).await;
    answer(app.clone(), "q_godawari", 0).await;

    // Act
    let json = answer(app, "q_parking", 0).await;

    // Assert
    assert_eq!(
        json["events"],
        json!([
            "play.quiz_answer_recorded",
            "play.quiz_completed",
            "play.quiz_best_score_improved"
        ])
    );
    let view = &json["view"];
    assert_eq!(view["completed"], true);
    assert_eq!(view["score"], 3);
    assert_eq!(view["best_score"], 3);
    assert_eq!(view["result"]["tier"], "high");
    assert_eq!(view["result"]["message"]["primary"], "Soulmate-level memory.");
}

#[tokio::test]
async fn test_wrong_answer_gives_feedback_and_no_point() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let json = answer(app, "q_919", 0).await;

    // Assert
    let feedback = &json["view"]["last_answer"];
    assert_eq!(feedback["correct"], false);
    assert_eq!(feedback["correct_index"], 1);
    assert_eq!(json["view"]["score"], 0);
    assert_eq!(json["view"]["question"]["id"], "q_godawari");
}

#[tokio::test]
async fn test_answering_a_stale_question_is_rejected() {
    // Arrange
    let app = common::build_unlocked_app().await;
    answer(app.clone(), "q_919", 1).await;

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/v1/play/quiz/answer",
        &json!({ "question_id": "q_919", "option_index": 1 }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "rejected");
}

#[tokio::test]
async fn test_option_out_of_range_returns_400() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) = common::post_json(
        app,
        "/api/v1/play/quiz/answer",
        &json!({ "question_id": "q_919", "option_index": 9 }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_restart_quiz_keeps_best_score() {
    // Arrange
    let app = common::build_unlocked_app().await;
    answer(app.clone(), "q_919", 1).await;
    answer(app.clone(), "q_godawari", 1).await;
    answer(app.clone(), "q_parking", 0).await;

    // Act
    let (status, json) = common::post_empty(app, "/api/v1/play/quiz/restart").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["events"], json!(["play.quiz_restarted"]));
    assert_eq!(json["view"]["score"], 0);
    assert_eq!(json["view"]["best_score"], 2);
    assert_eq!(json["view"]["completed"], false);
}

#[tokio::test]
async fn test_flip_before_start_is_rejected() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) = flip(app, 0).await;

    // Assert
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "rejected");
}

#[tokio::test]
async fn test_match_deals_three_pairs_face_down() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) = common::post_empty(app, "/api/v1/play/match/start").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["events"], json!(["play.match_started"]));
    let cards = json["view"]["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 6);
    assert!(cards.iter().all(|card| card["label"].is_null()));
    assert_eq!(json["view"]["total_pairs"], 3);
}

#[tokio::test]
async fn test_matching_every_pair_wins_the_game() {
    // Arrange
    let app = common::build_unlocked_app().await;
    common::post_empty(app.clone(), "/api/v1/play/match/start").await;
    for index in 0..5 {
        let (status, _) = flip(app.clone(), index).await;
        assert_eq!(status, StatusCode::OK);
    }

    // Act
    let (status, json) = flip(app, 5).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["events"],
        json!([
            "play.match_card_flipped",
            "play.match_pair_matched",
            "play.match_won"
        ])
    );
    assert_eq!(json["view"]["won"], true);
    assert_eq!(json["view"]["moves"], 3);
    assert_eq!(json["view"]["end_message"]["primary"], "Perfect match");
}

#[tokio::test]
async fn test_mismatch_blocks_third_flip_until_cards_flip_back() {
    // Arrange
    let store = Arc::new(MemoryStore::new());
    let now = common::build_test_app_with_store(store.clone());
    common::pass_gate(now.clone()).await;
    common::post_empty(now.clone(), "/api/v1/play/match/start").await;
    flip(now.clone(), 0).await;
    let (_, mismatch) = flip(now.clone(), 2).await;
    let later = common::build_test_app_at(store, common::fixed_clock().plus_ms(1_000));

    // Act
    let (blocked_status, _) = flip(now, 3).await;
    let (later_status, later_json) = flip(later, 3).await;

    // Assert
    assert_eq!(mismatch["events"][1], "play.match_pair_mismatched");
    assert_eq!(blocked_status, StatusCode::FORBIDDEN);
    assert_eq!(later_status, StatusCode::OK);
    assert_eq!(
        later_json["events"],
        json!(["play.match_cards_flipped_back", "play.match_card_flipped"])
    );
    assert_eq!(later_json["view"]["moves"], 1);
}

#[tokio::test]
async fn test_finale_body_is_withheld_until_revealed() {
    // Arrange
    let app = common::build_unlocked_app().await;

    // Act
    let (status, json) = common::get_json(app, "/api/v1/play/finale").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mood"], "soft");
    assert_eq!(json["headline"]["primary"], "Happy Valentine's Day, Reeja.");
    assert!(json["body"].is_null());
    assert_eq!(json["hold"]["phase"], "idle");
    assert_eq!(json["hold"]["hold_ms"], 1500);
}

#[tokio::test]
async fn test_early_release_drains_instead_of_revealing() {
    // Arrange
    let app = common::build_unlocked_app().await;
    let (_, pressed) = common::post_empty(app.clone(), "/api/v1/play/finale/hold").await;

    // Act
    let (status, json) = common::post_empty(app, "/api/v1/play/finale/release").await;

    // Assert
    assert_eq!(pressed["events"], json!(["play.finale_hold_started"]));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["events"], json!(["play.finale_hold_released"]));
    assert_eq!(json["view"]["hold"]["revealed"], false);
    assert!(json["view"]["body"].is_null());
}

#[tokio::test]
async fn test_full_hold_reveals_body_for_chosen_mood() {
    // Arrange
    let store = Arc::new(MemoryStore::new());
    let now = common::build_test_app_with_store(store.clone());
    common::pass_gate(now.clone()).await;
    common::put_json(
        now.clone(),
        "/api/v1/journey/preferences",
        &json!({ "mood": "romantic" }),
    )
    .await;
    common::post_empty(now, "/api/v1/play/finale/hold").await;
    let later = common::build_test_app_at(store, common::fixed_clock().plus_ms(1_600));

    // Act
    let (status, json) = common::post_empty(later, "/api/v1/play/finale/release").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["events"], json!(["play.finale_revealed"]));
    assert_eq!(json["view"]["hold"]["phase"], "revealed");
    assert_eq!(json["view"]["headline"]["primary"], "My Reeja, my home.");
    assert_eq!(
        json["view"]["body"]["primary"],
        "If I had one word for you, it is home."
    );
}
