//! Aggregate root for the Memories context.

use std::collections::BTreeMap;

use mutu_core::clock::Clock;
use mutu_core::error::DomainError;
use mutu_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    MEMORY_VIEWED_EVENT_TYPE, MemoryEvent, MemoryEventKind, MemoryViewed,
    REACTION_CLEARED_EVENT_TYPE, REACTION_SET_EVENT_TYPE, ReactionCleared, ReactionSet,
};

/// The viewed set and reactions, each persisted in its own slot.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    /// Opened memory ids, first-opened first, no duplicates.
    viewed: Vec<String>,
    /// At most one reaction per memory id.
    reactions: BTreeMap<String, String>,
    uncommitted_events: Vec<MemoryEvent>,
}

impl MemoryJournal {
    /// Rehydrates from the persisted slots, dropping duplicate viewed ids.
    #[must_use]
    pub fn new(viewed: Vec<String>, reactions: BTreeMap<String, String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(viewed.len());
        for id in viewed {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        Self {
            viewed: deduped,
            reactions,
            uncommitted_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn viewed(&self) -> &[String] {
        &self.viewed
    }

    #[must_use]
    pub fn reactions(&self) -> &BTreeMap<String, String> {
        &self.reactions
    }

    #[must_use]
    pub fn uncommitted_events(&self) -> &[MemoryEvent] {
        &self.uncommitted_events
    }

    /// Whether any event touched the viewed set.
    #[must_use]
    pub fn viewed_changed(&self) -> bool {
        self.uncommitted_events
            .iter()
            .any(|e| matches!(e.kind, MemoryEventKind::MemoryViewed(_)))
    }

    /// Whether any event touched the reactions.
    #[must_use]
    pub fn reactions_changed(&self) -> bool {
        self.uncommitted_events.iter().any(|e| {
            matches!(
                e.kind,
                MemoryEventKind::ReactionSet(_) | MemoryEventKind::ReactionCleared(_)
            )
        })
    }

    fn push(&mut self, event_type: &str, kind: MemoryEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        self.uncommitted_events.push(MemoryEvent {
            metadata: EventMetadata::new(event_type, correlation_id, clock),
            kind,
        });
    }

    /// Marks a memory viewed. Reopening is a no-op.
    pub fn open(&mut self, item_id: &str, correlation_id: Uuid, clock: &dyn Clock) {
        if self.viewed.iter().any(|id| id == item_id) {
            return;
        }
        self.viewed.push(item_id.to_owned());
        self.push(
            MEMORY_VIEWED_EVENT_TYPE,
            MemoryEventKind::MemoryViewed(MemoryViewed {
                item_id: item_id.to_owned(),
            }),
            correlation_id,
            clock,
        );
    }

    /// Toggles `reaction` on a memory: selecting the active one removes it,
    /// anything else replaces it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `reaction` is not in `allowed`.
    pub fn react(
        &mut self,
        item_id: &str,
        reaction: &str,
        allowed: &[String],
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if !allowed.iter().any(|r| r == reaction) {
            return Err(DomainError::Validation(format!(
                "reaction '{reaction}' is not one of {}",
                allowed.join(" ")
            )));
        }
        if self.reactions.get(item_id).is_some_and(|current| current == reaction) {
            self.reactions.remove(item_id);
            self.push(
                REACTION_CLEARED_EVENT_TYPE,
                MemoryEventKind::ReactionCleared(ReactionCleared {
                    item_id: item_id.to_owned(),
                    reaction: reaction.to_owned(),
                }),
                correlation_id,
                clock,
            );
            return Ok(());
        }
        let previous = self
            .reactions
            .insert(item_id.to_owned(), reaction.to_owned());
        self.push(
            REACTION_SET_EVENT_TYPE,
            MemoryEventKind::ReactionSet(ReactionSet {
                item_id: item_id.to_owned(),
                reaction: reaction.to_owned(),
                previous,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mutu_test_support::{FixedClock, at};

    use super::*;

    fn clock() -> FixedClock {
        FixedClock(at(2026, 2, 14, 0, 0))
    }

    fn allowed() -> Vec<String> {
        vec!["🥺".to_owned(), "😂".to_owned(), "❤️".to_owned()]
    }

    #[test]
    fn test_open_has_set_semantics() {
        // Arrange
        let mut journal = MemoryJournal::default();

        // Act
        journal.open("m1", Uuid::new_v4(), &clock());
        journal.open("m1", Uuid::new_v4(), &clock());

        // Assert
        assert_eq!(journal.viewed(), ["m1".to_owned()]);
        assert_eq!(journal.uncommitted_events().len(), 1);
    }

    #[test]
    fn test_rehydration_drops_duplicate_viewed_ids() {
        let journal = MemoryJournal::new(
            vec!["a".to_owned(), "b".to_owned(), "a".to_owned()],
            BTreeMap::new(),
        );

        assert_eq!(journal.viewed(), ["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_same_reaction_twice_clears_it() {
        // Arrange
        let mut journal = MemoryJournal::default();

        // Act
        journal.react("m1", "😂", &allowed(), Uuid::new_v4(), &clock()).unwrap();
        journal.react("m1", "😂", &allowed(), Uuid::new_v4(), &clock()).unwrap();

        // Assert
        assert!(journal.reactions().get("m1").is_none());
        assert!(journal.reactions_changed());
    }

    #[test]
    fn test_other_reaction_replaces_current() {
        let mut journal = MemoryJournal::default();

        journal.react("m1", "😂", &allowed(), Uuid::new_v4(), &clock()).unwrap();
        journal.react("m1", "❤️", &allowed(), Uuid::new_v4(), &clock()).unwrap();

        assert_eq!(journal.reactions().get("m1").map(String::as_str), Some("❤️"));
    }

    #[test]
    fn test_unknown_reaction_is_rejected() {
        let mut journal = MemoryJournal::default();

        let result = journal.react("m1", "🍕", &allowed(), Uuid::new_v4(), &clock());

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(journal.uncommitted_events().is_empty());
    }
}
