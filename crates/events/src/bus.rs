//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`BookingEvent`]s. It is
//! shared via `Arc<EventBus>` across the application. Publishing never
//! blocks and never fails the publisher: with no subscribers the event is
//! simply dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use salonflow_core::types::DbId;

/// Event type names published by the booking pipeline.
pub mod event_types {
    pub const BOOKING_CREATED: &str = "booking.created";
    pub const BOOKING_UPDATED: &str = "booking.updated";
    pub const BOOKING_STATUS_CHANGED: &str = "booking.status_changed";
}

/// A domain event emitted after a booking operation commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEvent {
    /// Dot-separated event name, e.g. `"booking.created"`.
    pub event_type: String,

    /// Entity kind the event concerns (e.g. `"booking"`).
    pub entity_type: Option<String>,

    /// Entity database id.
    pub entity_id: Option<DbId>,

    /// Who triggered the event: `"public"` or `"master:<id>"`.
    pub actor: Option<String>,

    /// Before-image for mutations, `null` for creations.
    pub before: serde_json::Value,

    /// After-image / payload.
    pub after: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl BookingEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            entity_type: None,
            entity_id: None,
            actor: None,
            before: serde_json::Value::Null,
            after: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    /// Attach the entity the event concerns.
    pub fn with_entity(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id);
        self
    }

    /// Attach the acting party.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Set the before-image (mutations only).
    pub fn with_before(mut self, before: serde_json::Value) -> Self {
        self.before = before;
        self
    }

    /// Set the after-image.
    pub fn with_after(mut self, after: serde_json::Value) -> Self {
        self.after = after;
        self
    }
}

/// Broadcast hub for booking events.
pub struct EventBus {
    tx: broadcast::Sender<BookingEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        // Slow subscribers past this depth see `Lagged`, not backpressure.
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }
}

impl EventBus {
    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: BookingEvent) {
        // A send error only means there are no subscribers right now.
        let _ = self.tx.send(event);
    }

    /// Subscribe to the event stream from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<BookingEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            BookingEvent::new(event_types::BOOKING_CREATED)
                .with_entity("booking", 7)
                .with_actor("public"),
        );

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, "booking.created");
        assert_eq!(event.entity_id, Some(7));
        assert_eq!(event.actor.as_deref(), Some("public"));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let bus = EventBus::default();
        bus.publish(BookingEvent::new(event_types::BOOKING_UPDATED));
    }
}
