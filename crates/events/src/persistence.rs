//! Audit persistence: writes every bus event to the `audit_log` table.
//!
//! Runs as a spawned task consuming a bus subscription. Write failures
//! are logged and swallowed; the audit trail is best-effort by contract.

use tokio::sync::broadcast;

use salonflow_db::models::audit::NewAuditLog;
use salonflow_db::repositories::AuditLogRepo;
use salonflow_db::DbPool;

use crate::bus::BookingEvent;

/// Spawnable audit writer.
pub struct AuditPersistence;

impl AuditPersistence {
    /// Consume events until the bus is dropped, persisting each one.
    pub async fn run(pool: DbPool, mut rx: broadcast::Receiver<BookingEvent>) {
        loop {
            match rx.recv().await {
                Ok(event) => Self::persist(&pool, event).await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Audit persistence lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    async fn persist(pool: &DbPool, event: BookingEvent) {
        let entry = NewAuditLog {
            actor: event.actor.unwrap_or_else(|| "system".to_string()),
            action: event.event_type,
            entity_type: event.entity_type,
            entity_id: event.entity_id,
            before: (!event.before.is_null()).then_some(event.before),
            after: (!event.after.is_null()).then_some(event.after),
        };

        if let Err(err) = AuditLogRepo::insert(pool, &entry).await {
            tracing::error!(error = %err, action = %entry.action, "Failed to persist audit entry");
        }
    }
}
