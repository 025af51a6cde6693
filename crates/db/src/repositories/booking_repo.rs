//! Repository for the `bookings` table.
//!
//! The write path is transaction-scoped: callers begin a transaction,
//! take the day lock via [`BookingRepo::lock_day`], re-read the day with
//! [`BookingRepo::slots_for_day`], conflict-check, and only then insert.
//! Two racing requests for the same (master, date) serialize on the
//! advisory lock, which closes the read-then-insert race.

use sqlx::{PgConnection, PgPool};

use salonflow_core::types::DbId;

use crate::models::booking::{
    Booking, BookingChanges, BookingListItem, BookingSlotRow, NewBooking,
};

const COLUMNS: &str = "id, salon_id, master_id, service_id, client_id, client_name, client_phone, \
     service_name, master_name, date, time, time_end, duration, extra_time, price, status, notes, \
     created_at, updated_at";

const LIST_COLUMNS: &str =
    "id, client_name, client_phone, service_name, date, time, time_end, duration, price, status";

/// Provides booking reads, the locked write path, and status updates.
pub struct BookingRepo;

impl BookingRepo {
    /// Serialize all writers touching one master's day. Transaction
    /// scoped: released automatically at commit or rollback.
    pub async fn lock_day(
        conn: &mut PgConnection,
        master_id: DbId,
        date: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(crate::day_lock_key(master_id, date))
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// The availability read: all non-cancelled bookings for one
    /// master's day, in start-time order.
    pub async fn slots_for_day(
        conn: &mut PgConnection,
        master_id: DbId,
        date: &str,
    ) -> Result<Vec<BookingSlotRow>, sqlx::Error> {
        sqlx::query_as::<_, BookingSlotRow>(
            "SELECT id, time, time_end, duration FROM bookings
             WHERE master_id = $1 AND date = $2 AND status <> 'CANCELLED'
             ORDER BY time",
        )
        .bind(master_id)
        .bind(date)
        .fetch_all(&mut *conn)
        .await
    }

    /// Insert a booking, returning the created row. Runs on the caller's
    /// transaction so the conflict check and the write are atomic.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &NewBooking,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (salon_id, master_id, service_id, client_id, client_name,
                 client_phone, service_name, master_name, date, time, time_end, duration,
                 price, notes, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.salon_id)
            .bind(input.master_id)
            .bind(input.service_id)
            .bind(input.client_id)
            .bind(&input.client_name)
            .bind(&input.client_phone)
            .bind(&input.service_name)
            .bind(&input.master_name)
            .bind(&input.date)
            .bind(&input.time)
            .bind(&input.time_end)
            .bind(input.duration)
            .bind(input.price)
            .bind(&input.notes)
            .bind(&input.status)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a booking by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Staff calendar list: a master's non-cancelled bookings, optionally
    /// narrowed to one date, ordered by start time.
    pub async fn list_for_master(
        pool: &PgPool,
        master_id: DbId,
        date: Option<&str>,
    ) -> Result<Vec<BookingListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM bookings
             WHERE master_id = $1 AND status <> 'CANCELLED'
               AND ($2::text IS NULL OR date = $2)
             ORDER BY date, time"
        );
        sqlx::query_as::<_, BookingListItem>(&query)
            .bind(master_id)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// Staff range list over `[from, to]` dates inclusive.
    pub async fn list_range(
        pool: &PgPool,
        master_id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Vec<BookingListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM bookings
             WHERE master_id = $1 AND status <> 'CANCELLED'
               AND date >= $2 AND date <= $3
             ORDER BY date, time"
        );
        sqlx::query_as::<_, BookingListItem>(&query)
            .bind(master_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Apply a reschedule/reassign change set. `None` keeps the existing
    /// value; `client_id` is double-optional because "detach the client"
    /// is a legal change. Runs on the caller's transaction.
    pub async fn apply_changes(
        conn: &mut PgConnection,
        id: DbId,
        changes: &BookingChanges,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                master_id = COALESCE($2, master_id),
                master_name = COALESCE($3, master_name),
                service_id = COALESCE($4, service_id),
                service_name = COALESCE($5, service_name),
                client_id = CASE WHEN $6 THEN $7 ELSE client_id END,
                client_name = COALESCE($8, client_name),
                client_phone = COALESCE($9, client_phone),
                date = COALESCE($10, date),
                time = COALESCE($11, time),
                time_end = COALESCE($12, time_end),
                duration = COALESCE($13, duration),
                extra_time = COALESCE($14, extra_time),
                price = COALESCE($15, price),
                notes = COALESCE($16, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(changes.master_id)
            .bind(&changes.master_name)
            .bind(changes.service_id)
            .bind(&changes.service_name)
            .bind(changes.client_id.is_some())
            .bind(changes.client_id.flatten())
            .bind(&changes.client_name)
            .bind(&changes.client_phone)
            .bind(&changes.date)
            .bind(&changes.time)
            .bind(&changes.time_end)
            .bind(changes.duration)
            .bind(changes.extra_time)
            .bind(changes.price)
            .bind(&changes.notes)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Status-only transition. Cancellation goes through here; bookings
    /// are never physically deleted.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
