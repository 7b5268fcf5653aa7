//! Aggregates for the Keepsakes context: the coupon book and the note.

use mutu_core::clock::Clock;
use mutu_core::error::DomainError;
use mutu_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    COUPON_REDEEMED_EVENT_TYPE, COUPON_REDEMPTION_UNDONE_EVENT_TYPE, CouponRedeemed,
    CouponRedemptionUndone, KeepsakeEvent, KeepsakeEventKind, NOTE_CLEARED_EVENT_TYPE,
    NOTE_SAVED_EVENT_TYPE, NoteSaved,
};

/// Longest note accepted, in characters.
pub const NOTE_MAX_CHARS: usize = 10_000;

fn event(event_type: &str, kind: KeepsakeEventKind, correlation_id: Uuid, clock: &dyn Clock) -> KeepsakeEvent {
    KeepsakeEvent {
        metadata: EventMetadata::new(event_type, correlation_id, clock),
        kind,
    }
}

/// Redeemed coupon ids in redemption order.
#[derive(Debug)]
pub struct CouponBook {
    redeemed: Vec<String>,
    uncommitted_events: Vec<KeepsakeEvent>,
}

impl CouponBook {
    /// Rehydrates, dropping duplicate ids.
    #[must_use]
    pub fn new(stored: Vec<String>) -> Self {
        let mut redeemed: Vec<String> = Vec::with_capacity(stored.len());
        for id in stored {
            if !redeemed.contains(&id) {
                redeemed.push(id);
            }
        }
        Self {
            redeemed,
            uncommitted_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn redeemed(&self) -> &[String] {
        &self.redeemed
    }

    /// Events produced since rehydration.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[KeepsakeEvent] {
        &self.uncommitted_events
    }

    /// Redeems `coupon_id`, or undoes it if already redeemed. Returns whether
    /// the coupon is redeemed afterwards.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the coupon is still locked.
    pub fn toggle(
        &mut self,
        coupon_id: &str,
        unlocked: bool,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        if !unlocked {
            return Err(DomainError::Rejected(format!("coupon {coupon_id} is still locked")));
        }
        if let Some(pos) = self.redeemed.iter().position(|id| id == coupon_id) {
            self.redeemed.remove(pos);
            self.uncommitted_events.push(event(
                COUPON_REDEMPTION_UNDONE_EVENT_TYPE,
                KeepsakeEventKind::CouponRedemptionUndone(CouponRedemptionUndone {
                    coupon_id: coupon_id.to_owned(),
                }),
                correlation_id,
                clock,
            ));
            return Ok(false);
        }
        self.redeemed.push(coupon_id.to_owned());
        self.uncommitted_events.push(event(
            COUPON_REDEEMED_EVENT_TYPE,
            KeepsakeEventKind::CouponRedeemed(CouponRedeemed {
                coupon_id: coupon_id.to_owned(),
            }),
            correlation_id,
            clock,
        ));
        Ok(true)
    }
}

/// The note the recipient writes back.
#[derive(Debug)]
pub struct WriteBackNote {
    text: String,
    uncommitted_events: Vec<KeepsakeEvent>,
}

impl WriteBackNote {
    #[must_use]
    pub fn new(text: String) -> Self {
        Self {
            text,
            uncommitted_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Events produced since rehydration.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[KeepsakeEvent] {
        &self.uncommitted_events
    }

    /// Replaces the note. The text is kept exactly as typed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the text exceeds
    /// [`NOTE_MAX_CHARS`].
    pub fn save(&mut self, text: &str, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        let chars = text.chars().count();
        if chars > NOTE_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "note is {chars} characters, the limit is {NOTE_MAX_CHARS}"
            )));
        }
        text.clone_into(&mut self.text);
        self.uncommitted_events.push(event(
            NOTE_SAVED_EVENT_TYPE,
            KeepsakeEventKind::NoteSaved(NoteSaved { chars }),
            correlation_id,
            clock,
        ));
        Ok(())
    }

    /// Empties the note.
    pub fn clear(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.text.clear();
        self.uncommitted_events.push(event(
            NOTE_CLEARED_EVENT_TYPE,
            KeepsakeEventKind::NoteCleared,
            correlation_id,
            clock,
        ));
    }
}
