//! Repository for the `time_blocks` table.

use sqlx::{PgConnection, PgPool};

use salonflow_core::types::DbId;

use crate::models::time_block::{BlockSlotRow, CreateTimeBlock, TimeBlock};

const COLUMNS: &str = "id, salon_id, master_id, date, start_time, end_time, title, block_type, \
     is_all_day, created_at";

/// Provides read access to manual unavailability ranges.
pub struct TimeBlockRepo;

impl TimeBlockRepo {
    /// Insert a time block, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTimeBlock) -> Result<TimeBlock, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_blocks
                 (salon_id, master_id, date, start_time, end_time, title, block_type, is_all_day)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'BREAK'), COALESCE($8, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeBlock>(&query)
            .bind(input.salon_id)
            .bind(input.master_id)
            .bind(&input.date)
            .bind(&input.start_time)
            .bind(&input.end_time)
            .bind(&input.title)
            .bind(&input.block_type)
            .bind(input.is_all_day)
            .fetch_one(pool)
            .await
    }

    /// The availability read: blocks applying to one master's day, both
    /// master-specific and salon-wide (`master_id IS NULL`).
    pub async fn slots_for_day(
        conn: &mut PgConnection,
        salon_id: DbId,
        master_id: DbId,
        date: &str,
    ) -> Result<Vec<BlockSlotRow>, sqlx::Error> {
        sqlx::query_as::<_, BlockSlotRow>(
            "SELECT title, start_time, end_time, is_all_day FROM time_blocks
             WHERE salon_id = $1 AND date = $2
               AND (master_id IS NULL OR master_id = $3)
             ORDER BY start_time",
        )
        .bind(salon_id)
        .bind(date)
        .bind(master_id)
        .fetch_all(&mut *conn)
        .await
    }
}
