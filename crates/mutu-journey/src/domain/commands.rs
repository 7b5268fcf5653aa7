//! Commands for the Journey context.

use mutu_content::domain::document::{Mood, MotionPreference};
use mutu_core::text::LanguageMode;
use uuid::Uuid;

/// Movement requested on the step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Jump to an index; out-of-range values are clamped.
    GoTo(i64),
    Next,
    Back,
    Restart,
}

/// Command to move through the step sequence.
#[derive(Debug, Clone)]
pub struct Navigate {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub navigation: Navigation,
}

/// Command to change one or more display preferences.
#[derive(Debug, Clone)]
pub struct UpdatePreferences {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub language: Option<LanguageMode>,
    pub mood: Option<Mood>,
    pub motion: Option<MotionPreference>,
}

/// Command to clear every persisted slot.
#[derive(Debug, Clone)]
pub struct ResetAll {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}
