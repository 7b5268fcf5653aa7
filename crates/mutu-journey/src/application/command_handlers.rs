//! Command handlers for the Journey context.

use mutu_content::ContentDocument;
use mutu_core::clock::Clock;
use mutu_core::error::DomainError;
use mutu_core::event::{EventMetadata, record_events};
use mutu_core::store::{self, StateStore, StorageKey};
use serde::Serialize;

use crate::application::query_handlers::{
    JourneyView, PreferencesView, load_navigator, load_preferences,
};
use crate::domain::commands::{Navigate, ResetAll, UpdatePreferences};
use crate::domain::events::{
    JourneyEvent, JourneyEventKind, PROGRESS_RESET_EVENT_TYPE, ProgressReset,
};

/// Result of a successfully handled journey command.
#[derive(Debug, Serialize)]
pub struct JourneyCommandResult<V> {
    /// Event types emitted, in order.
    pub events: Vec<&'static str>,
    /// State after the command.
    pub view: V,
}

/// Handles `Navigate`. The resulting index is written through on every
/// call, moved or not.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if persisting fails.
pub async fn handle_navigate(
    command: &Navigate,
    content: &ContentDocument,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<JourneyCommandResult<JourneyView>, DomainError> {
    let (steps, mut navigator) = load_navigator(content, store).await;

    navigator.navigate(command.navigation, command.correlation_id, clock);
    store::set(store, StorageKey::Step, &navigator.index()).await?;

    let prefs = load_preferences(content, store).await;
    Ok(JourneyCommandResult {
        events: record_events(navigator.uncommitted_events()),
        view: JourneyView::new(content, &steps, &navigator, prefs, None),
    })
}

/// Handles `UpdatePreferences`, persisting only the slots that changed.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if persisting fails.
pub async fn handle_update_preferences(
    command: &UpdatePreferences,
    content: &ContentDocument,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<JourneyCommandResult<PreferencesView>, DomainError> {
    let mut prefs = load_preferences(content, store).await;

    let event = prefs.apply(
        command.language,
        command.mood,
        command.motion,
        command.correlation_id,
        clock,
    );
    let events: Vec<JourneyEvent> = event.into_iter().collect();
    for event in &events {
        if let JourneyEventKind::PreferencesChanged(changed) = &event.kind {
            if let Some(language) = changed.language {
                store::set(store, StorageKey::LanguageMode, &language).await?;
            }
            if let Some(mood) = changed.mood {
                store::set(store, StorageKey::Mood, &mood).await?;
            }
            if let Some(motion) = changed.motion {
                store::set(store, StorageKey::ReducedMotion, &motion).await?;
            }
        }
    }

    Ok(JourneyCommandResult {
        events: record_events(&events),
        view: PreferencesView::new(prefs, None),
    })
}

/// Handles `ResetAll`: clears every persisted slot and returns the journey
/// as a first visit would see it.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if clearing a slot fails.
pub async fn handle_reset_all(
    command: &ResetAll,
    content: &ContentDocument,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<JourneyCommandResult<JourneyView>, DomainError> {
    store::reset_all(store).await?;
    let events = vec![JourneyEvent {
        metadata: EventMetadata::new(PROGRESS_RESET_EVENT_TYPE, command.correlation_id, clock),
        kind: JourneyEventKind::ProgressReset(ProgressReset {
            keys_cleared: StorageKey::ALL.len(),
        }),
    }];

    let (steps, navigator) = load_navigator(content, store).await;
    let prefs = load_preferences(content, store).await;
    Ok(JourneyCommandResult {
        events: record_events(&events),
        view: JourneyView::new(content, &steps, &navigator, prefs, None),
    })
}
