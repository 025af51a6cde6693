//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where the entity
//!   is mutated through the API

pub mod audit;
pub mod booking;
pub mod client;
pub mod master;
pub mod salon;
pub mod service;
pub mod time_block;
