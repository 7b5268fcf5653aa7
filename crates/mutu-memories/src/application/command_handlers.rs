//! Command handlers for the Memories context.

use chrono::{DateTime, Utc};
use mutu_content::ContentDocument;
use mutu_content::domain::document::TimelineItem;
use mutu_core::clock::Clock;
use mutu_core::error::DomainError;
use mutu_core::event::record_events;
use mutu_core::store::{self, StateStore, StorageKey};
use mutu_core::text::LanguageMode;
use mutu_unlocks::application::query_handlers::load_flags;
use mutu_unlocks::domain::rules::is_unlocked;
use serde::Serialize;

use crate::application::query_handlers::{MemoryDetailView, load_journal};
use crate::domain::aggregates::MemoryJournal;
use crate::domain::commands::{OpenMemory, ReactToMemory};

/// Result of a successfully handled memories command.
#[derive(Debug, Serialize)]
pub struct MemoryCommandResult {
    /// Event types emitted, in order.
    pub events: Vec<&'static str>,
    /// The memory after the command.
    pub view: MemoryDetailView,
}

/// Finds a memory and checks that it is currently visible.
async fn visible_item<'a>(
    content: &'a ContentDocument,
    item_id: &str,
    now: DateTime<Utc>,
    store: &dyn StateStore,
) -> Result<&'a TimelineItem, DomainError> {
    let item = content
        .timeline
        .items
        .iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| DomainError::NotFound(format!("memory {item_id}")))?;
    let flags = load_flags(content, store).await;
    if !is_unlocked(item.effective_unlock().as_ref(), &item.id, &flags, now) {
        tracing::warn!(item_id, "locked memory requested");
        return Err(DomainError::Rejected(format!("memory {item_id} is still locked")));
    }
    Ok(item)
}

async fn commit(journal: &MemoryJournal, store: &dyn StateStore) -> Result<Vec<&'static str>, DomainError> {
    if journal.viewed_changed() {
        store::set(store, StorageKey::ViewedIds, journal.viewed()).await?;
    }
    if journal.reactions_changed() {
        store::set(store, StorageKey::Reactions, journal.reactions()).await?;
    }
    Ok(record_events(journal.uncommitted_events()))
}

/// Handles `OpenMemory`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown id, `DomainError::Rejected`
/// if the memory is still locked, or `DomainError::Infrastructure` if
/// persisting fails.
pub async fn handle_open_memory(
    command: &OpenMemory,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<MemoryCommandResult, DomainError> {
    let item = visible_item(content, &command.item_id, clock.now(), store).await?;
    let mut journal = load_journal(store).await;

    journal.open(&item.id, command.correlation_id, clock);

    let events = commit(&journal, store).await?;
    Ok(MemoryCommandResult {
        events,
        view: MemoryDetailView::new(item, &journal, &content.timeline.reactions, mode),
    })
}

/// Handles `ReactToMemory`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown id, `DomainError::Rejected`
/// if the memory is still locked, `DomainError::Validation` for a reaction
/// outside the configured set, or `DomainError::Infrastructure` if
/// persisting fails.
pub async fn handle_react_to_memory(
    command: &ReactToMemory,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<MemoryCommandResult, DomainError> {
    let item = visible_item(content, &command.item_id, clock.now(), store).await?;
    let mut journal = load_journal(store).await;

    journal.react(
        &item.id,
        &command.reaction,
        &content.timeline.reactions,
        command.correlation_id,
        clock,
    )?;

    let events = commit(&journal, store).await?;
    Ok(MemoryCommandResult {
        events,
        view: MemoryDetailView::new(item, &journal, &content.timeline.reactions, mode),
    })
}
