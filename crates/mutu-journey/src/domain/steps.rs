//! The fixed catalogue of step kinds and per-step loading.
//!
//! Content may list steps in any order and may list ids this build does not
//! know; those are dropped. A known step whose section of the document is
//! unusable loads as a fallback view instead of blocking progress.

use mutu_content::ContentDocument;
use serde::Serialize;

/// Every step the experience knows how to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Cover,
    Letter,
    Timeline,
    Gallery,
    Nurse,
    Play,
    Promises,
    Finale,
}

impl StepKind {
    /// Maps a content step id to its kind.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "step_cover" => Some(Self::Cover),
            "step_letter" => Some(Self::Letter),
            "step_timeline" => Some(Self::Timeline),
            "step_gallery" => Some(Self::Gallery),
            "step_nurse" => Some(Self::Nurse),
            "step_play" => Some(Self::Play),
            "step_promises" => Some(Self::Promises),
            "step_finale" => Some(Self::Finale),
            _ => None,
        }
    }
}

/// Why a step could not be presented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepLoadError {
    /// The section backing the step has nothing to show.
    #[error("step {step} has no content in {section}")]
    MissingContent {
        step: String,
        section: &'static str,
    },
}

/// A step as the navigator sees it.
#[derive(Debug, Clone)]
pub struct StepEntry {
    pub id: String,
    pub kind: StepKind,
}

/// Known steps in document order.
#[must_use]
pub fn available_steps(content: &ContentDocument) -> Vec<StepEntry> {
    content
        .steps
        .iter()
        .filter_map(|step| {
            StepKind::from_id(&step.id).map(|kind| StepEntry {
                id: step.id.clone(),
                kind,
            })
        })
        .collect()
}

/// Checks that the document section a step presents is usable.
///
/// # Errors
///
/// Returns `StepLoadError::MissingContent` naming the empty section.
pub fn load_step(entry: &StepEntry, content: &ContentDocument) -> Result<StepKind, StepLoadError> {
    let missing = |section: &'static str| StepLoadError::MissingContent {
        step: entry.id.clone(),
        section,
    };
    match entry.kind {
        StepKind::Cover => Ok(StepKind::Cover),
        StepKind::Letter if content.letter.variants.is_empty() => Err(missing("letter.variants")),
        StepKind::Timeline if content.timeline.items.is_empty() => Err(missing("timeline.items")),
        StepKind::Gallery if content.gallery.items.is_empty() => Err(missing("gallery.items")),
        StepKind::Nurse if content.nurse_appreciation.sections.is_empty() => {
            Err(missing("nurseAppreciation.sections"))
        }
        StepKind::Play if content.play.quiz.questions.is_empty() => {
            Err(missing("play.quiz.questions"))
        }
        StepKind::Promises if content.promises.items.is_empty() => Err(missing("promises.items")),
        StepKind::Finale if content.finale.variants.is_empty() => Err(missing("finale.variants")),
        kind => Ok(kind),
    }
}

/// Actions offered by the fallback view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackAction {
    Back,
    Continue,
    Restart,
}

/// What the client renders for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepView {
    Ready {
        kind: StepKind,
    },
    Fallback {
        /// Generic "Step N" label, 1-based.
        label: String,
        reason: String,
        actions: Vec<FallbackAction>,
    },
}

impl StepView {
    /// Resolves a load result into a view; `index` is zero-based.
    #[must_use]
    pub fn resolve(result: Result<StepKind, StepLoadError>, index: usize) -> Self {
        match result {
            Ok(kind) => Self::Ready { kind },
            Err(e) => {
                tracing::warn!(error = %e, index, "step failed to load, using fallback");
                Self::Fallback {
                    label: format!("Step {}", index + 1),
                    reason: e.to_string(),
                    actions: vec![
                        FallbackAction::Back,
                        FallbackAction::Continue,
                        FallbackAction::Restart,
                    ],
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mutu_content::domain::document::StepDef;
    use mutu_core::text::BilingualText;
    use mutu_test_support::fixture_content;

    use super::*;

    #[test]
    fn test_unknown_step_ids_are_dropped() {
        // Arrange
        let mut content = fixture_content();
        content.steps.insert(
            1,
            StepDef {
                id: "step_karaoke".to_owned(),
                label: BilingualText::same("Karaoke"),
            },
        );

        // Act
        let steps = available_steps(&content);

        // Assert
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[1].kind, StepKind::Letter);
    }

    #[test]
    fn test_empty_section_loads_as_fallback() {
        // Arrange
        let mut content = fixture_content();
        content.gallery.items.clear();
        let steps = available_steps(&content);

        // Act
        let view = StepView::resolve(load_step(&steps[3], &content), 3);

        // Assert
        match view {
            StepView::Fallback { label, actions, .. } => {
                assert_eq!(label, "Step 4");
                assert_eq!(actions.len(), 3);
            }
            StepView::Ready { .. } => panic!("expected fallback"),
        }
    }

    #[test]
    fn test_every_fixture_step_loads() {
        let content = fixture_content();

        let loaded: Vec<_> = available_steps(&content)
            .iter()
            .map(|entry| load_step(entry, &content))
            .collect();

        assert!(loaded.iter().all(Result::is_ok));
    }
}
