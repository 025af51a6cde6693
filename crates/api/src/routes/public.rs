use axum::routing::post;
use axum::Router;

use crate::handlers::public_booking;
use crate::state::AppState;

/// Unauthenticated self-service routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/booking", post(public_booking::create_public_booking))
}
