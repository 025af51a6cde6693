//! Booking lifecycle states.
//!
//! A booking starts life as `CONFIRMED` — there is no pending pre-state;
//! "requires confirmation" is a notification concern, not a lifecycle one.
//! Transitions are caller-driven: staff may set any of the four states
//! from any other. The only enforcement point is that unknown strings are
//! rejected, and that cancellation is a status write, never a row delete.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a booking, stored as `TEXT` in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// The wire / database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::NoShow => "NO_SHOW",
        }
    }

    /// Parse a status string, rejecting anything outside the enum.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "COMPLETED" => Ok(BookingStatus::Completed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            "NO_SHOW" => Ok(BookingStatus::NoShow),
            other => Err(CoreError::validation(format!(
                "Unknown booking status: {other}"
            ))),
        }
    }

    /// Whether the booking still occupies its slot. Cancelled bookings
    /// are excluded from every availability computation.
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
