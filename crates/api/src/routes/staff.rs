use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::staff_booking;
use crate::state::AppState;

/// JWT-authenticated staff routes. Authentication happens per handler
/// via the `StaffSession` extractor.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            post(staff_booking::create_booking).get(staff_booking::list_bookings),
        )
        .route("/bookings/all", get(staff_booking::list_bookings_range))
        .route(
            "/bookings/{id}",
            put(staff_booking::update_booking).patch(staff_booking::update_booking_status),
        )
}
