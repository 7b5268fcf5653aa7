//! Domain events for the Memories context.

use mutu_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event type identifier for [`MemoryViewed`].
pub const MEMORY_VIEWED_EVENT_TYPE: &str = "memories.memory_viewed";
/// Event type identifier for [`ReactionSet`].
pub const REACTION_SET_EVENT_TYPE: &str = "memories.reaction_set";
/// Event type identifier for [`ReactionCleared`].
pub const REACTION_CLEARED_EVENT_TYPE: &str = "memories.reaction_cleared";

/// Emitted the first time a memory is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryViewed {
    pub item_id: String,
}

/// Emitted when a memory's reaction is set or replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionSet {
    pub item_id: String,
    pub reaction: String,
    /// The reaction it replaced, if any.
    pub previous: Option<String>,
}

/// Emitted when the active reaction is selected again and removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionCleared {
    pub item_id: String,
    pub reaction: String,
}

/// Event payload variants for the Memories context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MemoryEventKind {
    MemoryViewed(MemoryViewed),
    ReactionSet(ReactionSet),
    ReactionCleared(ReactionCleared),
}

/// Domain event envelope for the Memories context.
#[derive(Debug, Clone)]
pub struct MemoryEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: MemoryEventKind,
}

impl DomainEvent for MemoryEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            MemoryEventKind::MemoryViewed(_) => MEMORY_VIEWED_EVENT_TYPE,
            MemoryEventKind::ReactionSet(_) => REACTION_SET_EVENT_TYPE,
            MemoryEventKind::ReactionCleared(_) => REACTION_CLEARED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
