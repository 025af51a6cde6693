//! Integration test for the audit writer: events published on the bus
//! must land as `audit_log` rows.

use std::time::Duration;

use sqlx::PgPool;

use salonflow_db::repositories::AuditLogRepo;
use salonflow_events::{event_types, AuditPersistence, BookingEvent, EventBus};

#[sqlx::test(migrations = "../db/migrations")]
async fn published_events_are_written_to_audit_log(pool: PgPool) {
    let bus = EventBus::default();
    let writer = tokio::spawn(AuditPersistence::run(pool.clone(), bus.subscribe()));

    bus.publish(
        BookingEvent::new(event_types::BOOKING_CREATED)
            .with_entity("booking", 42)
            .with_actor("master:7")
            .with_after(serde_json::json!({ "status": "CONFIRMED" })),
    );
    bus.publish(
        BookingEvent::new(event_types::BOOKING_STATUS_CHANGED)
            .with_entity("booking", 42)
            .with_actor("master:7")
            .with_before(serde_json::json!({ "status": "CONFIRMED" }))
            .with_after(serde_json::json!({ "status": "CANCELLED" })),
    );

    // Dropping the bus closes the channel; the writer drains what was
    // queued and exits.
    drop(bus);
    tokio::time::timeout(Duration::from_secs(5), writer)
        .await
        .expect("writer should stop once the bus closes")
        .expect("writer task should not panic");

    let entries = AuditLogRepo::list_for_entity(&pool, "booking", 42)
        .await
        .expect("audit query");
    assert_eq!(entries.len(), 2);

    // Newest first.
    assert_eq!(entries[0].action, "booking.status_changed");
    assert_eq!(entries[0].actor, "master:7");
    assert_eq!(entries[0].before.as_ref().unwrap()["status"], "CONFIRMED");
    assert_eq!(entries[0].after.as_ref().unwrap()["status"], "CANCELLED");

    assert_eq!(entries[1].action, "booking.created");
    assert!(entries[1].before.is_none());
    assert_eq!(entries[1].after.as_ref().unwrap()["status"], "CONFIRMED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn events_without_actor_are_attributed_to_system(pool: PgPool) {
    let bus = EventBus::default();
    let writer = tokio::spawn(AuditPersistence::run(pool.clone(), bus.subscribe()));

    bus.publish(BookingEvent::new(event_types::BOOKING_UPDATED).with_entity("booking", 9));

    drop(bus);
    tokio::time::timeout(Duration::from_secs(5), writer)
        .await
        .expect("writer should stop once the bus closes")
        .expect("writer task should not panic");

    let entries = AuditLogRepo::list_for_entity(&pool, "booking", 9)
        .await
        .expect("audit query");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].actor, "system");
    assert!(entries[0].before.is_none());
    assert!(entries[0].after.is_none());
}
