//! Handler for the public (unauthenticated) booking endpoint.
//!
//! Rate limiting happens before anything touches the database; the
//! rest of the work is delegated to the shared pipeline with
//! `CallerContext::Public`.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use salonflow_core::policy::CallerContext;
use salonflow_core::types::DbId;

use crate::error::AppResult;
use crate::flow::{self, CreateBookingRequest};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/v1/public/booking`.
#[derive(Debug, Deserialize)]
pub struct PublicBookingRequest {
    pub salon_id: DbId,
    pub master_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    /// Minutes; defaults to the service duration, then 60.
    pub duration: Option<i32>,
    pub notes: Option<String>,
}

/// Confirmation payload. Deliberately thin: internal ids of the client
/// row and pricing details stay off the public wire.
#[derive(Debug, Serialize)]
pub struct PublicBookingResponse {
    pub id: DbId,
    pub date: String,
    pub time: String,
    pub time_end: String,
    pub service_name: String,
    pub master_name: String,
}

/// Best-effort caller identity for rate limiting. Proxy headers first,
/// a shared bucket when none are present.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// POST /public/booking
pub async fn create_public_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<PublicBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PublicBookingResponse>>)> {
    state.booking_limiter.check(&client_key(&headers))?;

    let booking = flow::create_booking(
        &state,
        CreateBookingRequest {
            salon_id: body.salon_id,
            master_id: body.master_id,
            service_id: body.service_id,
            client_name: body.name,
            client_phone: body.phone,
            email: body.email,
            date: body.date,
            time: body.time,
            duration: body.duration,
            price: None,
            notes: body.notes,
            caller: CallerContext::Public,
            actor: "public".to_string(),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PublicBookingResponse {
                id: booking.id,
                date: booking.date,
                time: booking.time,
                time_end: booking.time_end,
                service_name: booking.service_name,
                master_name: booking.master_name,
            },
        }),
    ))
}
