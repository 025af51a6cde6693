//! Staff authentication: token validation and the session extractor.
//!
//! Credential issuance (login, OTP) is an external collaborator; this
//! module only validates tokens and resolves them to a tenant scope.

pub mod jwt;
pub mod session;

pub use session::StaffSession;
