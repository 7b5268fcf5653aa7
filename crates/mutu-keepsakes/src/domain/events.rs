//! Domain events for the Keepsakes context.

use mutu_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type identifier for [`CouponRedeemed`].
pub const COUPON_REDEEMED_EVENT_TYPE: &str = "keepsakes.coupon_redeemed";
/// Event type identifier for [`CouponRedemptionUndone`].
pub const COUPON_REDEMPTION_UNDONE_EVENT_TYPE: &str = "keepsakes.coupon_redemption_undone";
/// Event type identifier for [`NoteSaved`].
pub const NOTE_SAVED_EVENT_TYPE: &str = "keepsakes.note_saved";
/// Event type identifier for `NoteCleared`.
pub const NOTE_CLEARED_EVENT_TYPE: &str = "keepsakes.note_cleared";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponRedeemed {
    pub coupon_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponRedemptionUndone {
    pub coupon_id: String,
}

/// The note text itself is private and stays out of the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSaved {
    pub chars: usize,
}

/// Event payload variants for the Keepsakes context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeepsakeEventKind {
    CouponRedeemed(CouponRedeemed),
    CouponRedemptionUndone(CouponRedemptionUndone),
    NoteSaved(NoteSaved),
    NoteCleared,
}

/// Domain event envelope for the Keepsakes context.
#[derive(Debug, Clone)]
pub struct KeepsakeEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: KeepsakeEventKind,
}

impl DomainEvent for KeepsakeEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            KeepsakeEventKind::CouponRedeemed(_) => COUPON_REDEEMED_EVENT_TYPE,
            KeepsakeEventKind::CouponRedemptionUndone(_) => COUPON_REDEMPTION_UNDONE_EVENT_TYPE,
            KeepsakeEventKind::NoteSaved(_) => NOTE_SAVED_EVENT_TYPE,
            KeepsakeEventKind::NoteCleared => NOTE_CLEARED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
