//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Pool-level reads take `&PgPool`; methods that must participate in the
//! booking transaction take `&mut PgConnection` so the caller controls
//! the transaction boundary.

pub mod audit_repo;
pub mod booking_repo;
pub mod client_repo;
pub mod master_repo;
pub mod salon_repo;
pub mod service_repo;
pub mod time_block_repo;

pub use audit_repo::AuditLogRepo;
pub use booking_repo::BookingRepo;
pub use client_repo::ClientRepo;
pub use master_repo::MasterRepo;
pub use salon_repo::SalonRepo;
pub use service_repo::ServiceRepo;
pub use time_block_repo::TimeBlockRepo;
