//! Command handlers for the Keepsakes context.

use mutu_content::ContentDocument;
use mutu_content::domain::document::CouponFilter;
use mutu_core::clock::Clock;
use mutu_core::error::DomainError;
use mutu_core::event::record_events;
use mutu_core::store::{self, StateStore, StorageKey};
use mutu_core::text::LanguageMode;
use mutu_unlocks::application::query_handlers::load_flags;
use serde::Serialize;

use crate::application::query_handlers::{CouponsView, NoteView, load_coupon_book, load_note};
use crate::domain::commands::{ClearNote, SaveNote, ToggleCoupon};
use crate::domain::coupons::coupon_unlocked;

/// Result of a successfully handled keepsakes command.
#[derive(Debug, Serialize)]
pub struct KeepsakeCommandResult<V> {
    /// Event types emitted, in order.
    pub events: Vec<&'static str>,
    /// State after the command.
    pub view: V,
}

/// Handles `ToggleCoupon`. The returned view uses `filter` so the client
/// keeps its current tab.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown coupon,
/// `DomainError::Rejected` for a locked one, or
/// `DomainError::Infrastructure` if persisting fails.
pub async fn handle_toggle_coupon(
    command: &ToggleCoupon,
    content: &ContentDocument,
    filter: CouponFilter,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<KeepsakeCommandResult<CouponsView>, DomainError> {
    let coupon = content
        .promises
        .items
        .iter()
        .find(|item| item.id == command.coupon_id)
        .ok_or_else(|| DomainError::NotFound(format!("coupon {}", command.coupon_id)))?;
    let now = clock.now();
    let flags = load_flags(content, store).await;
    let mut book = load_coupon_book(store).await;

    let unlocked = coupon_unlocked(coupon, &flags, now);
    if let Err(e) = book.toggle(&coupon.id, unlocked, command.correlation_id, clock) {
        tracing::warn!(
            correlation_id = %command.correlation_id,
            coupon_id = %coupon.id,
            "locked coupon toggle refused"
        );
        return Err(e);
    }

    store::set(store, StorageKey::RedeemedCoupons, book.redeemed()).await?;
    Ok(KeepsakeCommandResult {
        events: record_events(book.uncommitted_events()),
        view: CouponsView::build(content, &book, &flags, filter, mode, now),
    })
}

/// Handles `SaveNote`.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an over-long note, or
/// `DomainError::Infrastructure` if persisting fails.
pub async fn handle_save_note(
    command: &SaveNote,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<KeepsakeCommandResult<NoteView>, DomainError> {
    let mut note = load_note(store).await;
    note.save(&command.text, command.correlation_id, clock)?;
    store::set(store, StorageKey::UserNote, note.text()).await?;

    Ok(KeepsakeCommandResult {
        events: record_events(note.uncommitted_events()),
        view: NoteView::new(&note, content, mode, true),
    })
}

/// Handles `ClearNote`. The slot is removed rather than set to `""`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the backend fails.
pub async fn handle_clear_note(
    command: &ClearNote,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<KeepsakeCommandResult<NoteView>, DomainError> {
    let mut note = load_note(store).await;
    note.clear(command.correlation_id, clock);
    store.remove(StorageKey::UserNote).await?;

    Ok(KeepsakeCommandResult {
        events: record_events(note.uncommitted_events()),
        view: NoteView::new(&note, content, mode, false),
    })
}

#[cfg(test)]
mod tests {
    use mutu_test_support::{FixedClock, RecordingStateStore, at, fixture_content};
    use uuid::Uuid;

    use super::*;
    use crate::domain::events::{
        COUPON_REDEEMED_EVENT_TYPE, NOTE_CLEARED_EVENT_TYPE, NOTE_SAVED_EVENT_TYPE,
    };

    fn clock() -> FixedClock {
        FixedClock(at(2026, 2, 14, 9, 19))
    }

    fn toggle(id: &str) -> ToggleCoupon {
        ToggleCoupon {
            correlation_id: Uuid::new_v4(),
            coupon_id: id.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_redeem_persists_ids() {
        // Arrange
        let content = fixture_content();
        let store = RecordingStateStore::new();

        // Act
        let result = handle_toggle_coupon(
            &toggle("c_listen_first"),
            &content,
            CouponFilter::Redeemed,
            LanguageMode::Mixed,
            &clock(),
            &store,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(result.events, vec![COUPON_REDEEMED_EVENT_TYPE]);
        assert_eq!(result.view.items.len(), 1);
        assert_eq!(
            store.raw(StorageKey::RedeemedCoupons).as_deref(),
            Some(r#"["c_listen_first"]"#)
        );
    }

    #[tokio::test]
    async fn test_locked_legendary_is_rejected() {
        let content = fixture_content();
        let store = RecordingStateStore::new();

        let result = handle_toggle_coupon(
            &toggle("c_godawari_repeat"),
            &content,
            CouponFilter::All,
            LanguageMode::Mixed,
            &clock(),
            &store,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Rejected(_))));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_legendary_opens_with_vault() {
        let content = fixture_content();
        let store = RecordingStateStore::with_slots(&[(StorageKey::Unlocks, r#"{"vault":true}"#)]);

        let result = handle_toggle_coupon(
            &toggle("c_godawari_repeat"),
            &content,
            CouponFilter::All,
            LanguageMode::Mixed,
            &clock(),
            &store,
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_coupon_is_not_found() {
        let content = fixture_content();
        let store = RecordingStateStore::new();

        let result = handle_toggle_coupon(
            &toggle("c_nope"),
            &content,
            CouponFilter::All,
            LanguageMode::Mixed,
            &clock(),
            &store,
        )
        .await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_then_clear_note() {
        // Arrange
        let content = fixture_content();
        let store = RecordingStateStore::new();
        let save = SaveNote {
            correlation_id: Uuid::new_v4(),
            text: "timi nai mero ghar".to_owned(),
        };

        // Act
        let saved = handle_save_note(&save, &content, LanguageMode::Mixed, &clock(), &store)
            .await
            .unwrap();
        let stored = store.raw(StorageKey::UserNote);
        let cleared = handle_clear_note(
            &ClearNote {
                correlation_id: Uuid::new_v4(),
            },
            &content,
            LanguageMode::Mixed,
            &clock(),
            &store,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(saved.events, vec![NOTE_SAVED_EVENT_TYPE]);
        assert!(saved.view.saved_toast.is_some());
        assert_eq!(stored.as_deref(), Some(r#""timi nai mero ghar""#));
        assert_eq!(cleared.events, vec![NOTE_CLEARED_EVENT_TYPE]);
        assert!(cleared.view.text.is_empty());
        assert!(store.raw(StorageKey::UserNote).is_none());
    }
}
