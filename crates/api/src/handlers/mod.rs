//! Request handlers, grouped by entry surface.

pub mod public_booking;
pub mod staff_booking;
