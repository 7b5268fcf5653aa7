//! Domain event abstractions.
//!
//! Every state mutation produces one or more domain events. They are not
//! replayed; they are the structured record of what a user action changed,
//! logged by the application layer and echoed back to the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name, e.g. `unlocks.vault_unlocked`.
    pub event_type: String,
    /// Correlation ID for tracing a user action through its effects.
    pub correlation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Builds metadata for a new event of `event_type`.
    #[must_use]
    pub fn new(event_type: &str, correlation_id: Uuid, clock: &dyn Clock) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event_type.to_owned(),
            correlation_id,
            occurred_at: clock.now(),
        }
    }
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}

/// Logs each event at `info` and returns their type names in order.
pub fn record_events<E: DomainEvent>(events: &[E]) -> Vec<&'static str> {
    events
        .iter()
        .map(|event| {
            let meta = event.metadata();
            tracing::info!(
                event_type = event.event_type(),
                event_id = %meta.event_id,
                correlation_id = %meta.correlation_id,
                payload = %event.to_payload(),
                "domain event"
            );
            event.event_type()
        })
        .collect()
}
