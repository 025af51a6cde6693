//! Domain logic for the scheduling engine.
//!
//! This crate has zero internal deps so it can be used by the repository
//! layer, the API crate, and any future CLI tooling. Everything here is
//! pure: no database handles, no ambient configuration.

pub mod availability;
pub mod error;
pub mod phone;
pub mod policy;
pub mod status;
pub mod timegrid;
pub mod types;
