//! Command handlers for the Unlock Engine context.
//!
//! Each handler loads the persisted flags, runs the ledger operation,
//! writes the flags back when something changed and reports the events.

use mutu_content::ContentDocument;
use mutu_content::domain::document::UnlockRule;
use mutu_core::clock::Clock;
use mutu_core::error::DomainError;
use mutu_core::event::record_events;
use mutu_core::store::{self, StateStore, StorageKey};
use mutu_core::text::{LanguageMode, LocalizedText, localize};
use serde::Serialize;

use crate::application::query_handlers::{UnlocksView, VaultView, load_flags};
use crate::domain::aggregates::UnlockLedger;
use crate::domain::commands::{SubmitFuturePasscode, SubmitGatePhrase, TapVault};

/// Result of a successfully handled unlock command.
#[derive(Debug, Serialize)]
pub struct UnlockCommandResult<V> {
    /// Event types emitted, in order.
    pub events: Vec<&'static str>,
    /// State after the command.
    pub view: V,
}

async fn rehydrate(content: &ContentDocument, store: &dyn StateStore) -> UnlockLedger {
    UnlockLedger::from_flags(load_flags(content, store).await, content.gate.enabled)
}

async fn commit(ledger: &UnlockLedger, store: &dyn StateStore) -> Result<Vec<&'static str>, DomainError> {
    let events = ledger.uncommitted_events();
    if !events.is_empty() {
        store::set(store, StorageKey::Unlocks, ledger.flags()).await?;
    }
    Ok(record_events(events))
}

/// Handles `SubmitGatePhrase`.
///
/// # Errors
///
/// Returns `DomainError::Rejected` with the localized gate error on a
/// mismatch, or `DomainError::Infrastructure` if persisting fails.
pub async fn handle_submit_gate_phrase(
    command: &SubmitGatePhrase,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<UnlockCommandResult<UnlocksView>, DomainError> {
    let mut ledger = rehydrate(content, store).await;

    if let Err(e) =
        ledger.submit_gate_phrase(&command.phrase, &content.gate, mode, command.correlation_id, clock)
    {
        tracing::warn!(correlation_id = %command.correlation_id, "gate phrase rejected");
        return Err(e);
    }

    let events = commit(&ledger, store).await?;
    Ok(UnlockCommandResult {
        events,
        view: UnlocksView::new(ledger.flags(), content),
    })
}

/// Handles `TapVault`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if persisting fails.
pub async fn handle_tap_vault(
    command: &TapVault,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<UnlockCommandResult<VaultView>, DomainError> {
    let mut ledger = rehydrate(content, store).await;

    ledger.tap_vault(content.vault.unlock.count, command.correlation_id, clock);

    let events = commit(&ledger, store).await?;
    Ok(UnlockCommandResult {
        events,
        view: VaultView::new(ledger.flags(), content, mode),
    })
}

/// Outcome of a future passcode submission.
#[derive(Debug, Serialize)]
pub struct FuturePasscodeOutcome {
    pub accepted: bool,
    /// Only present on rejection, and only if the document configures one.
    pub error_message: Option<LocalizedText>,
    pub unlocks: UnlocksView,
}

/// Handles `SubmitFuturePasscode`. An unrecognized code is not an error:
/// flags stay as they are and the outcome reports `accepted: false`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if persisting fails.
pub async fn handle_submit_future_passcode(
    command: &SubmitFuturePasscode,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<UnlockCommandResult<FuturePasscodeOutcome>, DomainError> {
    let mut ledger = rehydrate(content, store).await;
    let passcode_ids: Vec<String> = content
        .future_timeline
        .items
        .iter()
        .filter(|item| matches!(item.effective_unlock(), Some(UnlockRule::Passcode { .. })))
        .map(|item| item.id.clone())
        .collect();

    let accepted = ledger.submit_future_passcode(
        &command.code,
        &content.future_timeline.passcodes,
        &passcode_ids,
        command.correlation_id,
        clock,
    );
    if !accepted {
        tracing::debug!(correlation_id = %command.correlation_id, "future passcode ignored");
    }

    let events = commit(&ledger, store).await?;
    let error_message = if accepted {
        None
    } else {
        content
            .future_timeline
            .error_message
            .as_ref()
            .map(|text| localize(text, mode))
    };
    Ok(UnlockCommandResult {
        events,
        view: FuturePasscodeOutcome {
            accepted,
            error_message,
            unlocks: UnlocksView::new(ledger.flags(), content),
        },
    })
}
