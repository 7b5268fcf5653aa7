//! Commands for the Unlock Engine context.

use uuid::Uuid;

/// Command to submit a phrase at the entry gate.
#[derive(Debug, Clone)]
pub struct SubmitGatePhrase {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Raw user input.
    pub phrase: String,
}

/// Command to register one tap on the vault heart.
#[derive(Debug, Clone)]
pub struct TapVault {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Command to submit a shared future-timeline passcode.
#[derive(Debug, Clone)]
pub struct SubmitFuturePasscode {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Raw user input.
    pub code: String,
}
