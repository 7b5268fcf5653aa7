//! Aggregate root for the Journey context: the step navigator.

use mutu_core::clock::Clock;
use mutu_core::event::EventMetadata;
use uuid::Uuid;

use super::commands::Navigation;
use super::events::{JourneyEvent, JourneyEventKind, STEP_CHANGED_EVENT_TYPE, StepChanged};

/// Clamps `index` into `[0, len - 1]`; an empty sequence clamps to 0.
#[must_use]
pub fn clamp_index(index: i64, len: usize) -> usize {
    let max = len.saturating_sub(1);
    usize::try_from(index.max(0)).map_or(max, |i| i.min(max))
}

/// Position within a step sequence of fixed length. The index is always in
/// range, including right after rehydration against a shorter sequence.
#[derive(Debug)]
pub struct Navigator {
    index: usize,
    len: usize,
    uncommitted_events: Vec<JourneyEvent>,
}

impl Navigator {
    /// Rehydrates from a persisted index, re-clamping it.
    #[must_use]
    pub fn from_persisted(index: i64, len: usize) -> Self {
        Self {
            index: clamp_index(index, len),
            len,
            uncommitted_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Events produced since rehydration.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[JourneyEvent] {
        &self.uncommitted_events
    }

    /// Applies a movement. Next at the last step and Back at the first stay
    /// put; only an actual move produces an event.
    pub fn navigate(&mut self, navigation: Navigation, correlation_id: Uuid, clock: &dyn Clock) {
        let current = i64::try_from(self.index).unwrap_or(i64::MAX);
        let target = match navigation {
            Navigation::GoTo(index) => index,
            Navigation::Next => current.saturating_add(1),
            Navigation::Back => current.saturating_sub(1),
            Navigation::Restart => 0,
        };
        let to = clamp_index(target, self.len);
        if to == self.index {
            return;
        }
        let from = self.index;
        self.index = to;
        self.uncommitted_events.push(JourneyEvent {
            metadata: EventMetadata::new(STEP_CHANGED_EVENT_TYPE, correlation_id, clock),
            kind: JourneyEventKind::StepChanged(StepChanged { from, to }),
        });
    }

    /// `index / (len - 1) * 100`; a sequence of one (or none) is complete.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        if self.len <= 1 {
            return 100.0;
        }
        self.index as f64 / (self.len - 1) as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use mutu_test_support::{FixedClock, at};

    use super::*;

    fn clock() -> FixedClock {
        FixedClock(at(2026, 2, 14, 0, 0))
    }

    #[test]
    fn test_clamp_index_bounds_and_idempotence() {
        for len in [1_usize, 2, 8] {
            for i in [-5_i64, -1, 0, 1, 3, 7, 8, 100, i64::MAX] {
                let once = clamp_index(i, len);
                let twice = clamp_index(i64::try_from(once).unwrap(), len);
                assert!(once < len);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_clamp_index_on_empty_sequence_is_zero() {
        assert_eq!(clamp_index(4, 0), 0);
    }

    #[test]
    fn test_rehydration_reclamps_after_sequence_shrinks() {
        let navigator = Navigator::from_persisted(7, 5);

        assert_eq!(navigator.index(), 4);
    }

    #[test]
    fn test_next_at_last_step_stays_put() {
        // Arrange
        let mut navigator = Navigator::from_persisted(7, 8);

        // Act
        navigator.navigate(Navigation::Next, Uuid::new_v4(), &clock());

        // Assert
        assert_eq!(navigator.index(), 7);
        assert!(navigator.uncommitted_events().is_empty());
    }

    #[test]
    fn test_back_at_first_step_stays_put() {
        let mut navigator = Navigator::from_persisted(0, 8);

        navigator.navigate(Navigation::Back, Uuid::new_v4(), &clock());

        assert_eq!(navigator.index(), 0);
    }

    #[test]
    fn test_go_to_clamps_and_restart_returns_to_zero() {
        // Arrange
        let mut navigator = Navigator::from_persisted(0, 8);

        // Act
        navigator.navigate(Navigation::GoTo(42), Uuid::new_v4(), &clock());
        let after_go_to = navigator.index();
        navigator.navigate(Navigation::Restart, Uuid::new_v4(), &clock());

        // Assert
        assert_eq!(after_go_to, 7);
        assert_eq!(navigator.index(), 0);
        assert_eq!(navigator.uncommitted_events().len(), 2);
    }

    #[test]
    fn test_progress_percent() {
        assert!((Navigator::from_persisted(0, 1).progress_percent() - 100.0).abs() < f64::EPSILON);
        assert!((Navigator::from_persisted(0, 5).progress_percent()).abs() < f64::EPSILON);
        assert!((Navigator::from_persisted(2, 5).progress_percent() - 50.0).abs() < f64::EPSILON);
        assert!((Navigator::from_persisted(4, 5).progress_percent() - 100.0).abs() < f64::EPSILON);
    }
}
