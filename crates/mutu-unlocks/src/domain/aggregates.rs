//! Aggregate root for the Unlock Engine context.

use std::collections::BTreeSet;

use mutu_content::domain::document::Gate;
use mutu_core::clock::Clock;
use mutu_core::error::DomainError;
use mutu_core::event::EventMetadata;
use mutu_core::text::{LanguageMode, localize_inline};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::{
    FUTURE_PASSCODE_ACCEPTED_EVENT_TYPE, FuturePasscodeAccepted, GATE_PASSED_EVENT_TYPE,
    GatePassed, UnlockEvent, UnlockEventKind, VAULT_TAPPED_EVENT_TYPE,
    VAULT_UNLOCKED_EVENT_TYPE, VaultTapped, VaultUnlocked,
};
use super::rules::{normalize_phrase, phrase_matches};

/// The persisted `mutu.unlocks` record. Every flag is one-way: only a full
/// state reset turns it back off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnlockFlags {
    /// Entry gate cleared.
    pub gate: bool,
    /// Tap-sequence vault opened.
    pub vault: bool,
    /// Future items opened by the shared passcode.
    pub future_passcodes: BTreeSet<String>,
    /// Vault taps so far, saturating at the configured count.
    pub vault_taps: u32,
}

/// Wraps the flags and collects the events produced by user actions.
#[derive(Debug)]
pub struct UnlockLedger {
    flags: UnlockFlags,
    uncommitted_events: Vec<UnlockEvent>,
}

impl UnlockLedger {
    /// Rehydrates from persisted flags. A disabled gate counts as passed.
    #[must_use]
    pub fn from_flags(mut flags: UnlockFlags, gate_enabled: bool) -> Self {
        if !gate_enabled {
            flags.gate = true;
        }
        Self {
            flags,
            uncommitted_events: Vec::new(),
        }
    }

    /// Current flags.
    #[must_use]
    pub fn flags(&self) -> &UnlockFlags {
        &self.flags
    }

    /// Events produced since rehydration.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[UnlockEvent] {
        &self.uncommitted_events
    }

    fn push(&mut self, event_type: &str, kind: UnlockEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        self.uncommitted_events.push(UnlockEvent {
            metadata: EventMetadata::new(event_type, correlation_id, clock),
            kind,
        });
    }

    /// Checks a gate phrase. Passing an already-passed gate is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` carrying the localized gate error copy
    /// when the phrase does not match. No flag changes in that case.
    pub fn submit_gate_phrase(
        &mut self,
        phrase: &str,
        gate: &Gate,
        mode: LanguageMode,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.flags.gate {
            return Ok(());
        }
        if !phrase_matches(phrase, &gate.phrase_options) {
            let message = localize_inline(&gate.error_message, mode);
            let message = if message.is_empty() {
                "incorrect phrase".to_owned()
            } else {
                message
            };
            return Err(DomainError::Rejected(message));
        }
        self.flags.gate = true;
        self.push(
            GATE_PASSED_EVENT_TYPE,
            UnlockEventKind::GatePassed(GatePassed {
                phrase: normalize_phrase(phrase),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Registers one vault tap. The counter saturates at `count`; reaching it
    /// opens the vault. Taps after that change nothing.
    pub fn tap_vault(&mut self, count: u32, correlation_id: Uuid, clock: &dyn Clock) {
        if self.flags.vault {
            return;
        }
        let taps = self.flags.vault_taps.saturating_add(1).min(count);
        self.flags.vault_taps = taps;
        self.push(
            VAULT_TAPPED_EVENT_TYPE,
            UnlockEventKind::VaultTapped(VaultTapped { taps, count }),
            correlation_id,
            clock,
        );
        if taps >= count {
            self.flags.vault = true;
            self.push(
                VAULT_UNLOCKED_EVENT_TYPE,
                UnlockEventKind::VaultUnlocked(VaultUnlocked { count }),
                correlation_id,
                clock,
            );
        }
    }

    /// Checks a future passcode. A match unlocks every id in
    /// `passcode_item_ids` at once; anything else is a silent no-op.
    /// Returns whether the code was accepted.
    pub fn submit_future_passcode(
        &mut self,
        code: &str,
        accepted: &[String],
        passcode_item_ids: &[String],
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> bool {
        if !phrase_matches(code, accepted) {
            return false;
        }
        let newly: Vec<String> = passcode_item_ids
            .iter()
            .filter(|id| self.flags.future_passcodes.insert((*id).clone()))
            .cloned()
            .collect();
        if !newly.is_empty() {
            self.push(
                FUTURE_PASSCODE_ACCEPTED_EVENT_TYPE,
                UnlockEventKind::FuturePasscodeAccepted(FuturePasscodeAccepted { item_ids: newly }),
                correlation_id,
                clock,
            );
        }
        true
    }
}
