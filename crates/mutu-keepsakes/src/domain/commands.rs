//! Commands for the Keepsakes context.

use uuid::Uuid;

/// Command to redeem a coupon, or undo a redemption.
#[derive(Debug, Clone)]
pub struct ToggleCoupon {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub coupon_id: String,
}

/// Command to overwrite the write-back note.
#[derive(Debug, Clone)]
pub struct SaveNote {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub text: String,
}

/// Command to empty the write-back note.
#[derive(Debug, Clone)]
pub struct ClearNote {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}
