//! Integration tests for `JsonFileStore` through the `StateStore` helpers.

use mutu_core::store::{self, StateStore, StorageKey};
use mutu_store::JsonFileStore;

// --- durability ---

#[tokio::test]
async fn test_values_survive_reopening_the_directory() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let first = JsonFileStore::open(dir.path()).await.unwrap();
    store::set(&first, StorageKey::RedeemedCoupons, &vec!["c1".to_owned()])
        .await
        .unwrap();
    store::set(&first, StorageKey::UserNote, "see you at 9:19")
        .await
        .unwrap();

    // Act
    let second = JsonFileStore::open(dir.path()).await.unwrap();
    let redeemed: Vec<String> =
        store::get_or_default(&second, StorageKey::RedeemedCoupons).await;
    let note: String = store::get_or_default(&second, StorageKey::UserNote).await;

    // Assert
    assert_eq!(redeemed, vec!["c1".to_owned()]);
    assert_eq!(note, "see you at 9:19");
}

// --- corrupt data ---

#[tokio::test]
async fn test_corrupt_slot_file_falls_back() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mutu.quiz.bestScore.json"), "{{{").unwrap();
    let store = JsonFileStore::open(dir.path()).await.unwrap();

    // Act
    let best: u32 = store::get_or(&store, StorageKey::QuizBestScore, 0).await;

    // Assert
    assert_eq!(best, 0);
}

// --- reset ---

#[tokio::test]
async fn test_reset_all_removes_every_slot_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).await.unwrap();
    for key in StorageKey::ALL {
        store.save(key, "1".to_owned()).await.unwrap();
    }

    // Act
    store::reset_all(&store).await.unwrap();

    // Assert
    let remaining = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_merge_partial_persists_merged_object() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).await.unwrap();
    store::set(&store, StorageKey::Unlocks, &serde_json::json!({ "gate": true }))
        .await
        .unwrap();
    let mut partial = serde_json::Map::new();
    partial.insert("vault".to_owned(), serde_json::json!(true));

    // Act
    store::merge_partial(&store, StorageKey::Unlocks, partial)
        .await
        .unwrap();

    // Assert
    let raw = store.load(StorageKey::Unlocks).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({ "gate": true, "vault": true }));
}
