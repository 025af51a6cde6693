//! Master (schedulable staff resource) entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use salonflow_core::types::{DbId, Timestamp};

/// A master row. A master belongs to exactly one salon for its lifetime.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Master {
    pub id: DbId,
    pub salon_id: DbId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a master.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaster {
    pub salon_id: DbId,
    pub name: String,
}
