//! Client entity model.
//!
//! Clients are created lazily on first booking with a given phone within
//! a salon. `phone` keeps the cleaned caller-supplied form;
//! `phone_normalized` (last 10 digits) is the per-salon dedup key.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use salonflow_core::types::{DbId, Timestamp};

/// A client row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub salon_id: DbId,
    pub name: String,
    pub phone: String,
    pub phone_normalized: String,
    pub email: Option<String>,
    /// Recency/engagement counter, bumped on booking creation — not an
    /// attendance counter.
    pub visits_count: i32,
    pub total_spent: i32,
    pub last_visit: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub salon_id: DbId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}
