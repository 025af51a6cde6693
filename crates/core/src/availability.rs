//! Availability resolution and conflict validation.
//!
//! Given a master's day — its non-cancelled bookings and manual time
//! blocks — this module builds the ordered set of occupied intervals and
//! tests a candidate against it. The salon buffer is applied to the
//! *existing* booking's end only; the candidate is taken as-is. Time
//! blocks occupy their raw interval, no buffer.
//!
//! Inputs are lightweight row projections so everything here is pure and
//! testable without a database.

use crate::error::CoreError;
use crate::timegrid::{to_minutes, Interval, DAY_MIN};
use crate::types::DbId;

/// Projection of a booking row relevant to availability.
#[derive(Debug, Clone)]
pub struct BookingSlot {
    pub id: DbId,
    /// `HH:MM` start.
    pub time: String,
    /// `HH:MM` end; when absent the end is derived from `duration`.
    pub time_end: Option<String>,
    /// Minutes; defaults to 60 when absent.
    pub duration: Option<i32>,
}

/// Projection of a time-block row relevant to availability.
#[derive(Debug, Clone)]
pub struct BlockSlot {
    pub title: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub is_all_day: bool,
}

/// Why an interval is occupied, carried through to the 409 message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictSource {
    Booking { start: String },
    Block { title: String, start: String, end: String },
}

/// An occupied interval with its source, in resolver order.
#[derive(Debug, Clone)]
pub struct OccupiedInterval {
    pub interval: Interval,
    pub source: ConflictSource,
}

impl OccupiedInterval {
    /// Human-readable rejection message for this occupied interval.
    pub fn message(&self) -> String {
        match &self.source {
            ConflictSource::Booking { start } => {
                format!("This time is already booked ({start})")
            }
            ConflictSource::Block { title, start, end } => {
                format!("This time is blocked: {title} ({start}\u{2013}{end})")
            }
        }
    }

    /// The conflicting start time, for structured 409 payloads.
    pub fn conflict_time(&self) -> &str {
        match &self.source {
            ConflictSource::Booking { start } => start,
            ConflictSource::Block { start, .. } => start,
        }
    }
}

/// Stored schedule data is written by this system; a malformed time in it
/// is an infrastructure fault, not caller input.
fn stored_minutes(s: &str) -> Result<i32, CoreError> {
    to_minutes(s).map_err(|_| CoreError::Internal(format!("Malformed stored time: {s}")))
}

/// Build the ordered occupied set for one master's day.
///
/// Bookings come first (end extended by `buffer_min`), then time blocks
/// verbatim. All-day blocks occupy the whole day. `exclude` removes the
/// booking being modified from the set on the update path.
pub fn occupied_intervals(
    bookings: &[BookingSlot],
    blocks: &[BlockSlot],
    buffer_min: i32,
    exclude: Option<DbId>,
) -> Result<Vec<OccupiedInterval>, CoreError> {
    let mut occupied = Vec::with_capacity(bookings.len() + blocks.len());

    for b in bookings {
        if exclude == Some(b.id) {
            continue;
        }
        let start = stored_minutes(&b.time)?;
        let end = match &b.time_end {
            Some(t) => stored_minutes(t)?,
            None => start + b.duration.unwrap_or(60),
        };
        occupied.push(OccupiedInterval {
            interval: Interval::new(start, end + buffer_min),
            source: ConflictSource::Booking {
                start: b.time.clone(),
            },
        });
    }

    for tb in blocks {
        let interval = if tb.is_all_day {
            Interval::new(0, DAY_MIN)
        } else {
            Interval::new(
                stored_minutes(&tb.start_time)?,
                stored_minutes(&tb.end_time)?,
            )
        };
        occupied.push(OccupiedInterval {
            interval,
            source: ConflictSource::Block {
                title: tb
                    .title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Break".to_string()),
                start: tb.start_time.clone(),
                end: tb.end_time.clone(),
            },
        });
    }

    Ok(occupied)
}

/// Return the first occupied interval overlapping the candidate, if any.
///
/// First-match in input order is the contract: strict accept/reject, no
/// nearest-slot negotiation.
pub fn find_conflict<'a>(
    candidate: Interval,
    occupied: &'a [OccupiedInterval],
) -> Option<&'a OccupiedInterval> {
    occupied.iter().find(|o| o.interval.overlaps(&candidate))
}
