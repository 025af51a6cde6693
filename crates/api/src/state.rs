use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ratelimit::FixedWindowLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: salonflow_db::DbPool,
    /// Server configuration (JWT secret, rate limits, CORS).
    pub config: Arc<ServerConfig>,
    /// Per-IP limiter for the public booking path.
    pub booking_limiter: Arc<FixedWindowLimiter>,
    /// Centralized event bus for publishing booking events.
    pub event_bus: Arc<salonflow_events::EventBus>,
}
