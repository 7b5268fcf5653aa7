//! Domain events for the Journey context.

use mutu_content::domain::document::{Mood, MotionPreference};
use mutu_core::event::{DomainEvent, EventMetadata};
use mutu_core::text::LanguageMode;
use serde::{Deserialize, Serialize};

/// Event type identifier for [`StepChanged`].
pub const STEP_CHANGED_EVENT_TYPE: &str = "journey.step_changed";
/// Event type identifier for [`PreferencesChanged`].
pub const PREFERENCES_CHANGED_EVENT_TYPE: &str = "journey.preferences_changed";
/// Event type identifier for [`ProgressReset`].
pub const PROGRESS_RESET_EVENT_TYPE: &str = "journey.progress_reset";

/// Emitted when the current step index moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepChanged {
    pub from: usize,
    pub to: usize,
}

/// Emitted when at least one preference takes a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesChanged {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionPreference>,
}

/// Emitted when every persisted slot has been cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReset {
    /// Number of storage keys cleared.
    pub keys_cleared: usize,
}

/// Event payload variants for the Journey context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JourneyEventKind {
    StepChanged(StepChanged),
    PreferencesChanged(PreferencesChanged),
    ProgressReset(ProgressReset),
}

/// Domain event envelope for the Journey context.
#[derive(Debug, Clone)]
pub struct JourneyEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: JourneyEventKind,
}

impl DomainEvent for JourneyEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            JourneyEventKind::StepChanged(_) => STEP_CHANGED_EVENT_TYPE,
            JourneyEventKind::PreferencesChanged(_) => PREFERENCES_CHANGED_EVENT_TYPE,
            JourneyEventKind::ProgressReset(_) => PROGRESS_RESET_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
