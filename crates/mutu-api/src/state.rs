//! Shared application state.

use std::sync::{Arc, Mutex};

use mutu_content::ContentDocument;
use mutu_core::clock::Clock;
use mutu_core::rng::DeterministicRng;
use mutu_core::store::StateStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The loaded, validated Content Document.
    pub content: Arc<ContentDocument>,
    /// Clock for timestamps and date-gated unlocks.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// RNG for the memory-match shuffle.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Persisted client state.
    pub store: Arc<dyn StateStore>,
    /// Held by every state-changing request so each load-change-save
    /// completes before the next one reads.
    pub mutations: Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        content: Arc<ContentDocument>,
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        store: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            content,
            clock,
            rng,
            store,
            mutations: Arc::new(tokio::sync::Mutex::new(())),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("content_version", &self.content.meta.version)
            .finish_non_exhaustive()
    }
}
