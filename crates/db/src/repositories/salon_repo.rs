//! Repository for the `salons` table.

use sqlx::PgPool;

use salonflow_core::types::DbId;

use crate::models::salon::{CreateSalon, Salon};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, is_active, buffer_time, min_lead_time_hours, max_advance_days, \
     slot_step_minutes, require_confirmation, cancel_deadline_hours, no_show_penalty_percent, \
     max_no_shows_before_block, created_at, updated_at";

/// Provides read access to salons and their booking rules.
pub struct SalonRepo;

impl SalonRepo {
    /// Insert a new salon, returning the created row. Rule fields not
    /// supplied fall back to schema defaults.
    pub async fn create(pool: &PgPool, input: &CreateSalon) -> Result<Salon, sqlx::Error> {
        let query = format!(
            "INSERT INTO salons (name, buffer_time, min_lead_time_hours, max_advance_days)
             VALUES ($1, COALESCE($2, 0), COALESCE($3, 0), COALESCE($4, 60))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Salon>(&query)
            .bind(&input.name)
            .bind(input.buffer_time)
            .bind(input.min_lead_time_hours)
            .bind(input.max_advance_days)
            .fetch_one(pool)
            .await
    }

    /// Find an active salon by id. Inactive tenants are invisible to the
    /// booking paths.
    pub async fn find_active_by_id(pool: &PgPool, id: DbId) -> Result<Option<Salon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM salons WHERE id = $1 AND is_active");
        sqlx::query_as::<_, Salon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
