pub mod health;
pub mod public;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /public/booking                  create booking (unauthenticated, rate limited)
///
/// /staff/bookings                  create (POST), list by date (GET)
/// /staff/bookings/all              list over a date range (GET)
/// /staff/bookings/{id}             full update/reassign (PUT), status (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/public", public::router())
        .nest("/staff", staff::router())
}
