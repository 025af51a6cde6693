//! Repository for the `audit_log` table.

use sqlx::PgPool;

use salonflow_core::types::DbId;

use crate::models::audit::{AuditLog, NewAuditLog};

const COLUMNS: &str = "id, actor, action, entity_type, entity_id, before, after, created_at";

/// Append-only audit trail writer.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Insert an audit entry, returning the created row.
    pub async fn insert(pool: &PgPool, input: &NewAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_log (actor, action, entity_type, entity_id, before, after)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(&input.actor)
            .bind(&input.action)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.before)
            .bind(&input.after)
            .fetch_one(pool)
            .await
    }

    /// Entries for one entity, newest first. Used by admin review
    /// tooling and tests.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_log
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }
}
