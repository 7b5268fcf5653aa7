//! In-memory `StateStore`, lost on restart.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mutu_core::error::DomainError;
use mutu_core::store::{StateStore, StorageKey};

/// Keeps every slot in a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<StorageKey, String>>, DomainError> {
        self.slots
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("state store lock poisoned: {e}")))
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self, key: StorageKey) -> Result<Option<String>, DomainError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    async fn save(&self, key: StorageKey, raw: String) -> Result<(), DomainError> {
        self.lock()?.insert(key, raw);
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), DomainError> {
        self.lock()?.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_slot_returns_none() {
        let store = MemoryStore::new();

        let value = store.load(StorageKey::UserNote).await.unwrap();

        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_and_remove_clears() {
        // Arrange
        let store = MemoryStore::new();
        store.save(StorageKey::Step, "1".to_owned()).await.unwrap();

        // Act
        store.save(StorageKey::Step, "2".to_owned()).await.unwrap();
        let after_save = store.load(StorageKey::Step).await.unwrap();
        store.remove(StorageKey::Step).await.unwrap();
        let after_remove = store.load(StorageKey::Step).await.unwrap();

        // Assert
        assert_eq!(after_save.as_deref(), Some("2"));
        assert!(after_remove.is_none());
    }
}
