//! Domain events for the Unlock Engine context.

use mutu_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type identifier for [`GatePassed`].
pub const GATE_PASSED_EVENT_TYPE: &str = "unlocks.gate_passed";
/// Event type identifier for [`VaultTapped`].
pub const VAULT_TAPPED_EVENT_TYPE: &str = "unlocks.vault_tapped";
/// Event type identifier for [`VaultUnlocked`].
pub const VAULT_UNLOCKED_EVENT_TYPE: &str = "unlocks.vault_unlocked";
/// Event type identifier for [`FuturePasscodeAccepted`].
pub const FUTURE_PASSCODE_ACCEPTED_EVENT_TYPE: &str = "unlocks.future_passcode_accepted";

/// Emitted when the entry gate is cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatePassed {
    /// The normalized phrase that matched.
    pub phrase: String,
}

/// Emitted for every tap that moves the vault counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultTapped {
    /// Counter after the tap.
    pub taps: u32,
    /// Taps required to open the vault.
    pub count: u32,
}

/// Emitted once, when the vault opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultUnlocked {
    /// Taps it took.
    pub count: u32,
}

/// Emitted when a shared passcode unlocks future items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuturePasscodeAccepted {
    /// Every passcode-gated item id newly unlocked by this submission.
    pub item_ids: Vec<String>,
}

/// Event payload variants for the Unlock Engine context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UnlockEventKind {
    /// The gate has been passed.
    GatePassed(GatePassed),
    /// The vault counter moved.
    VaultTapped(VaultTapped),
    /// The vault is open.
    VaultUnlocked(VaultUnlocked),
    /// Future passcode items are open.
    FuturePasscodeAccepted(FuturePasscodeAccepted),
}

/// Domain event envelope for the Unlock Engine context.
#[derive(Debug, Clone)]
pub struct UnlockEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: UnlockEventKind,
}

impl DomainEvent for UnlockEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            UnlockEventKind::GatePassed(_) => GATE_PASSED_EVENT_TYPE,
            UnlockEventKind::VaultTapped(_) => VAULT_TAPPED_EVENT_TYPE,
            UnlockEventKind::VaultUnlocked(_) => VAULT_UNLOCKED_EVENT_TYPE,
            UnlockEventKind::FuturePasscodeAccepted(_) => FUTURE_PASSCODE_ACCEPTED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
