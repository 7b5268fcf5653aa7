//! Persisted client state adapter.
//!
//! State is a fixed set of independently serialized slots, one per
//! [`StorageKey`]. Backends only move raw strings; the typed helpers in this
//! module own the JSON encoding and the "never fatal on read" rule: a slot
//! that is missing, unreadable or malformed yields the caller's fallback.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DomainError;

/// Every durable slot. `reset_all` clears exactly this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// Current step index.
    Step,
    /// Unlock flags (gate, vault, future passcodes, vault taps).
    Unlocks,
    /// Ids of timeline items the user has opened.
    ViewedIds,
    /// Reaction per timeline item id.
    Reactions,
    /// Ids of redeemed coupons.
    RedeemedCoupons,
    /// Best completed quiz score.
    QuizBestScore,
    /// In-progress quiz session.
    QuizSession,
    /// In-progress memory-match session.
    MatchSession,
    /// Finale hold-to-reveal gesture.
    FinaleHold,
    /// Free-text write-back note.
    UserNote,
    /// Language mode preference.
    LanguageMode,
    /// Mood preference.
    Mood,
    /// Reduced-motion preference.
    ReducedMotion,
}

impl StorageKey {
    /// All keys, in a stable order.
    pub const ALL: [Self; 13] = [
        Self::Step,
        Self::Unlocks,
        Self::ViewedIds,
        Self::Reactions,
        Self::RedeemedCoupons,
        Self::QuizBestScore,
        Self::QuizSession,
        Self::MatchSession,
        Self::FinaleHold,
        Self::UserNote,
        Self::LanguageMode,
        Self::Mood,
        Self::ReducedMotion,
    ];

    /// The namespaced key string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Step => "mutu.progress.step",
            Self::Unlocks => "mutu.unlocks",
            Self::ViewedIds => "mutu.memories.viewedIds",
            Self::Reactions => "mutu.memories.reactionsById",
            Self::RedeemedCoupons => "mutu.coupons.redeemedIds",
            Self::QuizBestScore => "mutu.quiz.bestScore",
            Self::QuizSession => "mutu.quiz.session",
            Self::MatchSession => "mutu.match.session",
            Self::FinaleHold => "mutu.finale.hold",
            Self::UserNote => "mutu.user.notes",
            Self::LanguageMode => "mutu.settings.languageMode",
            Self::Mood => "mutu.settings.mood",
            Self::ReducedMotion => "mutu.settings.reducedMotion",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw key-value backend for persisted client state.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Returns the raw stored string, or `None` when the slot is empty.
    async fn load(&self, key: StorageKey) -> Result<Option<String>, DomainError>;

    /// Replaces the slot's contents.
    async fn save(&self, key: StorageKey, raw: String) -> Result<(), DomainError>;

    /// Empties the slot. Removing an empty slot succeeds.
    async fn remove(&self, key: StorageKey) -> Result<(), DomainError>;
}

/// Reads a slot, returning `fallback` when it is missing, unreadable or does
/// not decode as `T`.
pub async fn get_or<T: DeserializeOwned>(store: &dyn StateStore, key: StorageKey, fallback: T) -> T {
    let raw = match store.load(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback,
        Err(e) => {
            tracing::warn!(%key, error = %e, "state slot unreadable, using default");
            return fallback;
        }
    };
    if raw.trim().is_empty() {
        return fallback;
    }
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(%key, error = %e, "state slot malformed, using default");
            fallback
        }
    }
}

/// Like [`get_or`] with `T::default()` as the fallback.
pub async fn get_or_default<T: DeserializeOwned + Default>(store: &dyn StateStore, key: StorageKey) -> T {
    get_or(store, key, T::default()).await
}

/// Serializes `value` into the slot.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if encoding or the backend write fails.
pub async fn set<T: Serialize + ?Sized>(
    store: &dyn StateStore,
    key: StorageKey,
    value: &T,
) -> Result<(), DomainError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| DomainError::Infrastructure(format!("encoding {key} failed: {e}")))?;
    store.save(key, raw).await
}

/// Shallow-merges `partial` into an object-valued slot and persists the
/// result. A missing or non-object current value counts as `{}`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the backend write fails.
pub async fn merge_partial(
    store: &dyn StateStore,
    key: StorageKey,
    partial: Map<String, Value>,
) -> Result<Value, DomainError> {
    let mut current = match get_or(store, key, Value::Null).await {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    current.extend(partial);
    let merged = Value::Object(current);
    set(store, key, &merged).await?;
    Ok(merged)
}

/// Clears every known slot.
///
/// # Errors
///
/// Returns the first backend error encountered.
pub async fn reset_all(store: &dyn StateStore) -> Result<(), DomainError> {
    for key in StorageKey::ALL {
        store.remove(key).await?;
    }
    tracing::info!(keys = StorageKey::ALL.len(), "persisted state reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MapStore(Mutex<HashMap<StorageKey, String>>);

    #[async_trait]
    impl StateStore for MapStore {
        async fn load(&self, key: StorageKey) -> Result<Option<String>, DomainError> {
            Ok(self.0.lock().unwrap().get(&key).cloned())
        }

        async fn save(&self, key: StorageKey, raw: String) -> Result<(), DomainError> {
            self.0.lock().unwrap().insert(key, raw);
            Ok(())
        }

        async fn remove(&self, key: StorageKey) -> Result<(), DomainError> {
            self.0.lock().unwrap().remove(&key);
            Ok(())
        }
    }

    #[test]
    fn test_storage_keys_are_unique_and_namespaced() {
        let mut names: Vec<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), StorageKey::ALL.len());
        assert!(names.iter().all(|n| n.starts_with("mutu.")));
    }

    #[tokio::test]
    async fn test_get_or_returns_fallback_for_missing_slot() {
        let store = MapStore::default();

        let step: usize = get_or(&store, StorageKey::Step, 3).await;

        assert_eq!(step, 3);
    }

    #[tokio::test]
    async fn test_get_or_returns_fallback_for_malformed_slot() {
        let store = MapStore::default();
        store.save(StorageKey::Step, "{not json".to_owned()).await.unwrap();

        let step: usize = get_or(&store, StorageKey::Step, 0).await;

        assert_eq!(step, 0);
    }

    #[tokio::test]
    async fn test_get_or_returns_fallback_for_wrong_shape() {
        let store = MapStore::default();
        store.save(StorageKey::RedeemedCoupons, "42".to_owned()).await.unwrap();

        let ids: Vec<String> = get_or_default(&store, StorageKey::RedeemedCoupons).await;

        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let store = MapStore::default();

        set(&store, StorageKey::UserNote, "hello").await.unwrap();
        let note: String = get_or_default(&store, StorageKey::UserNote).await;

        assert_eq!(note, "hello");
    }

    #[tokio::test]
    async fn test_merge_partial_keeps_existing_fields() {
        let store = MapStore::default();
        set(&store, StorageKey::Unlocks, &serde_json::json!({ "gate": true, "vault": false }))
            .await
            .unwrap();

        let mut partial = Map::new();
        partial.insert("vault".to_owned(), Value::Bool(true));
        let merged = merge_partial(&store, StorageKey::Unlocks, partial).await.unwrap();

        assert_eq!(merged, serde_json::json!({ "gate": true, "vault": true }));
        let stored: Value = get_or(&store, StorageKey::Unlocks, Value::Null).await;
        assert_eq!(stored, merged);
    }

    #[tokio::test]
    async fn test_merge_partial_treats_malformed_as_empty_object() {
        let store = MapStore::default();
        store.save(StorageKey::Unlocks, "[1,2".to_owned()).await.unwrap();

        let mut partial = Map::new();
        partial.insert("gate".to_owned(), Value::Bool(true));
        let merged = merge_partial(&store, StorageKey::Unlocks, partial).await.unwrap();

        assert_eq!(merged, serde_json::json!({ "gate": true }));
    }

    #[tokio::test]
    async fn test_reset_all_clears_every_slot() {
        let store = MapStore::default();
        for key in StorageKey::ALL {
            store.save(key, "1".to_owned()).await.unwrap();
        }

        reset_all(&store).await.unwrap();

        assert!(store.0.lock().unwrap().is_empty());
    }
}
