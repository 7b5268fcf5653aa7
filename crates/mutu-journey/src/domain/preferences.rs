//! Display preferences: language, mood and motion.

use mutu_content::domain::document::{Mood, MotionPreference, Settings};
use mutu_core::clock::Clock;
use mutu_core::event::EventMetadata;
use mutu_core::text::LanguageMode;
use serde::Serialize;
use uuid::Uuid;

use super::events::{
    JourneyEvent, JourneyEventKind, PREFERENCES_CHANGED_EVENT_TYPE, PreferencesChanged,
};

/// The three preference slots, each independently persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub language: LanguageMode,
    pub mood: Mood,
    pub motion: MotionPreference,
}

impl Preferences {
    /// The document's configured defaults.
    #[must_use]
    pub fn defaults(settings: &Settings) -> Self {
        Self {
            language: settings.language_mode_default,
            mood: settings.mood_default,
            motion: settings.reduced_motion_default,
        }
    }

    /// Applies the requested values and returns the change event, or `None`
    /// when every requested value was already current.
    pub fn apply(
        &mut self,
        language: Option<LanguageMode>,
        mood: Option<Mood>,
        motion: Option<MotionPreference>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Option<JourneyEvent> {
        let language = language.filter(|l| *l != self.language);
        let mood = mood.filter(|m| *m != self.mood);
        let motion = motion.filter(|m| *m != self.motion);
        if language.is_none() && mood.is_none() && motion.is_none() {
            return None;
        }
        if let Some(language) = language {
            self.language = language;
        }
        if let Some(mood) = mood {
            self.mood = mood;
        }
        if let Some(motion) = motion {
            self.motion = motion;
        }
        Some(JourneyEvent {
            metadata: EventMetadata::new(PREFERENCES_CHANGED_EVENT_TYPE, correlation_id, clock),
            kind: JourneyEventKind::PreferencesChanged(PreferencesChanged {
                language,
                mood,
                motion,
            }),
        })
    }
}
