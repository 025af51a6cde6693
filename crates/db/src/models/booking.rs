//! Booking entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use salonflow_core::types::{DbId, Timestamp};

/// A booking row.
///
/// `client_name` / `client_phone` / `service_name` / `master_name` are
/// snapshots captured at write time so history survives later edits to
/// the referenced rows. `time_end` is always derived from
/// `time + duration (+ extra_time)`, never accepted from callers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub salon_id: DbId,
    /// `None` means "any master": unassigned and conflict-exempt until a
    /// master is assigned.
    pub master_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub client_id: Option<DbId>,
    pub client_name: String,
    pub client_phone: String,
    pub service_name: String,
    pub master_name: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM` start.
    pub time: String,
    /// `HH:MM` end, derived.
    pub time_end: String,
    /// Minutes.
    pub duration: i32,
    /// Extra minutes folded into `time_end` on staff updates.
    pub extra_time: Option<i32>,
    pub price: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO, assembled by the booking pipeline after validation.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub salon_id: DbId,
    pub master_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub client_id: Option<DbId>,
    pub client_name: String,
    pub client_phone: String,
    pub service_name: String,
    pub master_name: String,
    pub date: String,
    pub time: String,
    pub time_end: String,
    pub duration: i32,
    pub price: i32,
    pub notes: Option<String>,
    pub status: String,
}

/// Column subset the availability resolver needs for one master's day.
#[derive(Debug, Clone, FromRow)]
pub struct BookingSlotRow {
    pub id: DbId,
    pub time: String,
    pub time_end: Option<String>,
    pub duration: Option<i32>,
}

/// Applied column changes for a full (PUT) update. `None` keeps the
/// existing value; snapshot fields travel together with their reference.
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub master_id: Option<DbId>,
    pub master_name: Option<String>,
    pub service_id: Option<DbId>,
    pub service_name: Option<String>,
    pub client_id: Option<Option<DbId>>,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub time_end: Option<String>,
    pub duration: Option<i32>,
    pub extra_time: Option<i32>,
    pub price: Option<i32>,
    pub notes: Option<String>,
}

/// The staff list projection (calendar view).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingListItem {
    pub id: DbId,
    pub client_name: String,
    pub client_phone: String,
    pub service_name: String,
    pub date: String,
    pub time: String,
    pub time_end: String,
    pub duration: i32,
    pub price: i32,
    pub status: String,
}

/// Deserialized PATCH body for status-only updates.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: String,
}
