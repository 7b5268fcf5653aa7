//! Commands for the Memories context.

use uuid::Uuid;

/// Command to open a memory card, marking it viewed.
#[derive(Debug, Clone)]
pub struct OpenMemory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub item_id: String,
}

/// Command to toggle a reaction on a memory.
#[derive(Debug, Clone)]
pub struct ReactToMemory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub item_id: String,
    /// One of the document's configured reactions.
    pub reaction: String,
}
