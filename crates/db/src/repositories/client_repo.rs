//! Repository for the `clients` table.
//!
//! Lookup is by normalized phone (last 10 digits) within a salon, so
//! formatting variants of one number resolve to one client row. The
//! `uq_clients_salon_phone` constraint backs this up under concurrency.

use sqlx::{PgConnection, PgPool};

use salonflow_core::phone::normalize_phone;
use salonflow_core::types::DbId;

use crate::models::client::{Client, CreateClient};

const COLUMNS: &str = "id, salon_id, name, phone, phone_normalized, email, visits_count, \
     total_spent, last_visit, created_at, updated_at";

/// Provides find-or-create and stats operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Find a client in the salon by normalized phone comparison.
    pub async fn find_by_phone(
        conn: &mut PgConnection,
        salon_id: DbId,
        phone: &str,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM clients WHERE salon_id = $1 AND phone_normalized = $2");
        sqlx::query_as::<_, Client>(&query)
            .bind(salon_id)
            .bind(normalize_phone(phone))
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a new client with zeroed stats, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (salon_id, name, phone, phone_normalized, email)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(input.salon_id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(normalize_phone(&input.phone))
            .bind(&input.email)
            .fetch_one(&mut *conn)
            .await
    }

    /// Backfill an email onto a client that has none.
    pub async fn backfill_email(
        conn: &mut PgConnection,
        id: DbId,
        email: &str,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET email = $2, updated_at = NOW()
             WHERE id = $1 AND email IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Bump the engagement stats after a committed booking: visit count,
    /// spent total and last-visit recency.
    pub async fn record_visit(pool: &PgPool, id: DbId, price: i32) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE clients SET
                visits_count = visits_count + 1,
                total_spent = total_spent + $2,
                last_visit = NOW(),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(price)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a client by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
