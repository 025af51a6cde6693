//! Time-block entity model.
//!
//! Administrator-defined unavailable intervals, read-only input to the
//! availability resolver. A block with `master_id = NULL` applies
//! salon-wide.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use salonflow_core::types::{DbId, Timestamp};

/// A time-block row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeBlock {
    pub id: DbId,
    pub salon_id: DbId,
    pub master_id: Option<DbId>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub title: Option<String>,
    pub block_type: String,
    pub is_all_day: bool,
    pub created_at: Timestamp,
}

/// Column subset the availability resolver needs.
#[derive(Debug, Clone, FromRow)]
pub struct BlockSlotRow {
    pub title: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub is_all_day: bool,
}

/// DTO for creating a time block (used by admin tooling and tests).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeBlock {
    pub salon_id: DbId,
    pub master_id: Option<DbId>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub title: Option<String>,
    /// One of BREAK / LUNCH / DAY_OFF / VACATION / OTHER.
    pub block_type: Option<String>,
    pub is_all_day: Option<bool>,
}
