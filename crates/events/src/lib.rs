//! Fire-and-forget side-effect plumbing.
//!
//! The booking pipeline publishes [`BookingEvent`]s after its transaction
//! commits; subscribers (audit persistence, notification routing) run on
//! their own tasks. Their failures are observable only via logs — they
//! never affect the booking operation's result.

mod bus;
mod persistence;

pub use bus::{event_types, BookingEvent, EventBus};
pub use persistence::AuditPersistence;
