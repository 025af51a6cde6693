//! Repository for the `services` table.

use sqlx::PgPool;

use salonflow_core::types::DbId;

use crate::models::service::{CreateService, Service};

const COLUMNS: &str = "id, salon_id, name, price, duration, is_active, created_at, updated_at";

/// Provides access to the salon's service catalogue.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new service, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (salon_id, name, price, duration)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 60))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(input.salon_id)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.duration)
            .fetch_one(pool)
            .await
    }

    /// Find a service by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
