//! Service entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use salonflow_core::types::{DbId, Timestamp};

/// A service row. Bookings may reference one, or none (ad-hoc
/// appointment).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub salon_id: DbId,
    pub name: String,
    pub price: i32,
    /// Default duration in minutes.
    pub duration: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub salon_id: DbId,
    pub name: String,
    pub price: Option<i32>,
    pub duration: Option<i32>,
}
