//! Aggregate and command abstractions.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for aggregates that mutate by recording events.
///
/// Command methods record an event, apply it immediately, and queue it as
/// uncommitted until a handler takes the batch for publication.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the current version (number of events applied).
    fn version(&self) -> i64;

    /// Apply an event to mutate internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events recorded since the last take.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drains and returns the uncommitted events.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>;
}

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID linking the command to the events it produces.
    fn correlation_id(&self) -> Uuid;
}
