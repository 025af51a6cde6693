//! Repository for the `masters` table.

use sqlx::PgPool;

use salonflow_core::types::DbId;

use crate::models::master::{CreateMaster, Master};

const COLUMNS: &str = "id, salon_id, name, is_active, created_at, updated_at";

/// Provides access to schedulable staff resources.
pub struct MasterRepo;

impl MasterRepo {
    /// Insert a new master, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMaster) -> Result<Master, sqlx::Error> {
        let query = format!(
            "INSERT INTO masters (salon_id, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Master>(&query)
            .bind(input.salon_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a master by id, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Master>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM masters WHERE id = $1");
        sqlx::query_as::<_, Master>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
