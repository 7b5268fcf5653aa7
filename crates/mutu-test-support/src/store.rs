//! Test stores — mock `StateStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mutu_core::error::DomainError;
use mutu_core::store::{StateStore, StorageKey};

/// An in-memory store that also records every write, in order.
#[derive(Debug, Default)]
pub struct RecordingStateStore {
    slots: Mutex<HashMap<StorageKey, String>>,
    writes: Mutex<Vec<StorageKey>>,
}

impl RecordingStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with raw slot values already present.
    #[must_use]
    pub fn with_slots(slots: &[(StorageKey, &str)]) -> Self {
        let store = Self::default();
        {
            let mut map = store.slots.lock().unwrap();
            for (key, raw) in slots {
                map.insert(*key, (*raw).to_owned());
            }
        }
        store
    }

    /// Keys written via `save`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn writes(&self) -> Vec<StorageKey> {
        self.writes.lock().unwrap().clone()
    }

    /// Raw value currently held in a slot.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn raw(&self, key: StorageKey) -> Option<String> {
        self.slots.lock().unwrap().get(&key).cloned()
    }
}

#[async_trait]
impl StateStore for RecordingStateStore {
    async fn load(&self, key: StorageKey) -> Result<Option<String>, DomainError> {
        Ok(self.slots.lock().unwrap().get(&key).cloned())
    }

    async fn save(&self, key: StorageKey, raw: String) -> Result<(), DomainError> {
        self.slots.lock().unwrap().insert(key, raw);
        self.writes.lock().unwrap().push(key);
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), DomainError> {
        self.slots.lock().unwrap().remove(&key);
        Ok(())
    }
}

/// A store whose every operation fails with an infrastructure error.
#[derive(Debug)]
pub struct FailingStateStore;

#[async_trait]
impl StateStore for FailingStateStore {
    async fn load(&self, _key: StorageKey) -> Result<Option<String>, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn save(&self, _key: StorageKey, _raw: String) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn remove(&self, _key: StorageKey) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }
}

/// A store that returns garbage for every slot and silently accepts writes.
/// Used to check that malformed persisted state degrades to defaults.
#[derive(Debug)]
pub struct CorruptStateStore;

#[async_trait]
impl StateStore for CorruptStateStore {
    async fn load(&self, _key: StorageKey) -> Result<Option<String>, DomainError> {
        Ok(Some("{\"corrupt\": [".to_owned()))
    }

    async fn save(&self, _key: StorageKey, _raw: String) -> Result<(), DomainError> {
        Ok(())
    }

    async fn remove(&self, _key: StorageKey) -> Result<(), DomainError> {
        Ok(())
    }
}
