//! Salon (tenant root) entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use salonflow_core::policy::SalonPolicy;
use salonflow_core::types::{DbId, Timestamp};

/// A salon row, including its booking-rule configuration.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Salon {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
    pub buffer_time: i32,
    pub min_lead_time_hours: i32,
    pub max_advance_days: i32,
    pub slot_step_minutes: i32,
    pub require_confirmation: bool,
    pub cancel_deadline_hours: i32,
    pub no_show_penalty_percent: i32,
    pub max_no_shows_before_block: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Salon {
    /// The salon's booking rules as an explicit policy value object.
    /// Scheduling code takes this, never the row.
    pub fn policy(&self) -> SalonPolicy {
        SalonPolicy {
            buffer_time_min: self.buffer_time,
            min_lead_time_hours: self.min_lead_time_hours,
            max_advance_days: self.max_advance_days,
            slot_step_minutes: self.slot_step_minutes,
            require_confirmation: self.require_confirmation,
            cancel_deadline_hours: self.cancel_deadline_hours,
            no_show_penalty_percent: self.no_show_penalty_percent,
            max_no_shows_before_block: self.max_no_shows_before_block,
        }
    }
}

/// DTO for creating a salon (used by provisioning and tests).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSalon {
    pub name: String,
    /// Minutes; defaults to 0.
    pub buffer_time: Option<i32>,
    pub min_lead_time_hours: Option<i32>,
    pub max_advance_days: Option<i32>,
}
