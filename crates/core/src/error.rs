//! Domain error taxonomy.
//!
//! Every rejection carries a human-readable message; the API layer maps
//! variants to HTTP statuses without reformatting them.

use crate::types::DbId;

/// Domain-level error shared across all crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist (or is inactive where activity
    /// is required).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or out-of-policy input.
    #[error("{0}")]
    Validation(String),

    /// The candidate interval collides with an existing booking or a
    /// blocked range. `at` carries the conflicting start time (`HH:MM`)
    /// so the caller can surface it.
    #[error("{message}")]
    Conflict {
        message: String,
        at: Option<String>,
    },

    /// Missing or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Cross-tenant or cross-resource access attempt.
    #[error("{0}")]
    Forbidden(String),

    /// Fixed-window rate limit exceeded.
    #[error("Too many requests, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Unexpected infrastructure failure. The message is logged, never
    /// shown to callers verbatim.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    /// Shorthand for a conflict with a known conflicting start time.
    pub fn conflict_at(msg: impl Into<String>, at: impl Into<String>) -> Self {
        CoreError::Conflict {
            message: msg.into(),
            at: Some(at.into()),
        }
    }
}
