//! Query handlers for the Journey context.

use mutu_content::ContentDocument;
use mutu_content::domain::document::{Mood, MotionPreference};
use mutu_core::store::{self, StateStore, StorageKey};
use mutu_core::text::{LanguageMode, LocalizedText, localize};
use serde::Serialize;

use crate::domain::aggregates::Navigator;
use crate::domain::preferences::Preferences;
use crate::domain::steps::{StepEntry, StepView, available_steps, load_step};

/// Reads each preference slot, falling back to the document defaults.
pub async fn load_preferences(content: &ContentDocument, store: &dyn StateStore) -> Preferences {
    let defaults = Preferences::defaults(&content.settings);
    Preferences {
        language: store::get_or(store, StorageKey::LanguageMode, defaults.language).await,
        mood: store::get_or(store, StorageKey::Mood, defaults.mood).await,
        motion: store::get_or(store, StorageKey::ReducedMotion, defaults.motion).await,
    }
}

/// Shorthand for handlers in other contexts that only need the language.
pub async fn load_language(content: &ContentDocument, store: &dyn StateStore) -> LanguageMode {
    load_preferences(content, store).await.language
}

/// Rehydrates the navigator against the steps the document currently offers.
pub async fn load_navigator(
    content: &ContentDocument,
    store: &dyn StateStore,
) -> (Vec<StepEntry>, Navigator) {
    let steps = available_steps(content);
    let index: i64 = store::get_or(store, StorageKey::Step, 0).await;
    let navigator = Navigator::from_persisted(index, steps.len());
    (steps, navigator)
}

#[derive(Debug, Serialize)]
pub struct PreferencesView {
    pub language: LanguageMode,
    pub mood: Mood,
    pub motion: MotionPreference,
    /// Effective reduced-motion flag; unknown when the preference follows the
    /// system setting and the client did not report it.
    pub reduced_motion: Option<bool>,
}

impl PreferencesView {
    #[must_use]
    pub fn new(prefs: Preferences, system_reduced_motion: Option<bool>) -> Self {
        let reduced_motion = match prefs.motion {
            MotionPreference::System => system_reduced_motion,
            motion => Some(motion.reduced(false)),
        };
        Self {
            language: prefs.language,
            mood: prefs.mood,
            motion: prefs.motion,
            reduced_motion,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepSummary {
    pub index: usize,
    pub id: String,
    pub label: LocalizedText,
}

/// Position, current step and preferences.
#[derive(Debug, Serialize)]
pub struct JourneyView {
    pub index: usize,
    pub total: usize,
    pub step_id: Option<String>,
    pub current: Option<StepView>,
    pub progress_percent: f64,
    pub steps: Vec<StepSummary>,
    pub preferences: PreferencesView,
}

impl JourneyView {
    #[must_use]
    pub fn new(
        content: &ContentDocument,
        steps: &[StepEntry],
        navigator: &Navigator,
        prefs: Preferences,
        system_reduced_motion: Option<bool>,
    ) -> Self {
        let index = navigator.index();
        let entry = steps.get(index);
        let summaries = steps
            .iter()
            .enumerate()
            .map(|(i, step)| StepSummary {
                index: i,
                id: step.id.clone(),
                label: content
                    .steps
                    .iter()
                    .find(|def| def.id == step.id)
                    .map(|def| localize(&def.label, prefs.language))
                    .unwrap_or_default(),
            })
            .collect();
        Self {
            index,
            total: steps.len(),
            step_id: entry.map(|e| e.id.clone()),
            current: entry.map(|e| StepView::resolve(load_step(e, content), index)),
            progress_percent: navigator.progress_percent(),
            steps: summaries,
            preferences: PreferencesView::new(prefs, system_reduced_motion),
        }
    }
}

/// The journey as it stands.
pub async fn get_journey(
    content: &ContentDocument,
    system_reduced_motion: Option<bool>,
    store: &dyn StateStore,
) -> JourneyView {
    let (steps, navigator) = load_navigator(content, store).await;
    let prefs = load_preferences(content, store).await;
    JourneyView::new(content, &steps, &navigator, prefs, system_reduced_motion)
}
