//! Directory-backed `StateStore`.
//!
//! Each storage key maps to `<dir>/<key>.json`. Every write goes to its own
//! uniquely named sibling and is renamed into place, so readers and
//! overlapping writers only ever see a complete file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mutu_core::error::DomainError;
use mutu_core::store::{StateStore, StorageKey};
use uuid::Uuid;

/// Persists slots as individual files under one directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            DomainError::Infrastructure(format!(
                "failed to create state directory {}: {e}",
                dir.display()
            ))
        })?;
        tracing::info!(dir = %dir.display(), "file state store opened");
        Ok(Self { dir })
    }

    /// Root directory of the store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    fn scratch_path(&self, key: StorageKey) -> PathBuf {
        self.dir
            .join(format!("{}.json.{}.tmp", key.as_str(), Uuid::new_v4().simple()))
    }
}

fn io_error(action: &str, key: StorageKey, e: &std::io::Error) -> DomainError {
    DomainError::Infrastructure(format!("failed to {action} slot {key}: {e}"))
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self, key: StorageKey) -> Result<Option<String>, DomainError> {
        match tokio::fs::read_to_string(self.slot_path(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", key, &e)),
        }
    }

    async fn save(&self, key: StorageKey, raw: String) -> Result<(), DomainError> {
        let path = self.slot_path(key);
        let tmp = self.scratch_path(key);
        tokio::fs::write(&tmp, raw)
            .await
            .map_err(|e| io_error("write", key, &e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error("commit", key, &e));
        }
        tracing::debug!(%key, "slot saved");
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), DomainError> {
        match tokio::fs::remove_file(self.slot_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", key, &e)),
        }
    }
}
