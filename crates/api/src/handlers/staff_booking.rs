//! Handlers for the staff booking surface.
//!
//! Every handler takes a [`StaffSession`]; the salon scope comes from
//! the authenticated master row, never from the request.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use salonflow_core::error::CoreError;
use salonflow_core::policy::CallerContext;
use salonflow_core::timegrid::is_valid_date;
use salonflow_core::types::DbId;
use salonflow_db::models::booking::{Booking, BookingListItem, UpdateBookingStatus};
use salonflow_db::repositories::BookingRepo;

use crate::auth::StaffSession;
use crate::error::{AppError, AppResult};
use crate::flow::{self, CreateBookingRequest, UpdateBookingRequest};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/v1/staff/bookings`.
#[derive(Debug, Deserialize)]
pub struct StaffBookingRequest {
    /// Defaults to the authenticated master.
    pub master_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub client_name: String,
    #[serde(default)]
    pub client_phone: String,
    pub email: Option<String>,
    pub date: String,
    pub time: String,
    pub duration: Option<i32>,
    pub price: Option<i32>,
    pub notes: Option<String>,
}

/// Query parameters for the calendar list.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub date: Option<String>,
}

/// Query parameters for the range list.
#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub from: String,
    pub to: String,
}

fn actor(session: &StaffSession) -> String {
    format!("master:{}", session.master_id)
}

/// POST /staff/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    session: StaffSession,
    Json(body): Json<StaffBookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    let booking = flow::create_booking(
        &state,
        CreateBookingRequest {
            salon_id: session.salon_id,
            master_id: body.master_id.or(Some(session.master_id)),
            service_id: body.service_id,
            client_name: body.client_name,
            client_phone: body.client_phone,
            email: body.email,
            date: body.date,
            time: body.time,
            duration: body.duration,
            price: body.price,
            notes: body.notes,
            caller: CallerContext::Staff,
            actor: actor(&session),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /staff/bookings?date=YYYY-MM-DD
///
/// The authenticated master's own calendar, cancelled bookings excluded.
pub async fn list_bookings(
    State(state): State<AppState>,
    session: StaffSession,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<BookingListItem>>>> {
    if let Some(date) = &params.date {
        if !is_valid_date(date) {
            return Err(AppError::Core(CoreError::validation(
                "Invalid date format (YYYY-MM-DD)",
            )));
        }
    }
    let items =
        BookingRepo::list_for_master(&state.db, session.master_id, params.date.as_deref()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /staff/bookings/all?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn list_bookings_range(
    State(state): State<AppState>,
    session: StaffSession,
    Query(params): Query<RangeParams>,
) -> AppResult<Json<DataResponse<Vec<BookingListItem>>>> {
    if !is_valid_date(&params.from) || !is_valid_date(&params.to) {
        return Err(AppError::Core(CoreError::validation(
            "Invalid date format (YYYY-MM-DD)",
        )));
    }
    let items =
        BookingRepo::list_range(&state.db, session.master_id, &params.from, &params.to).await?;
    Ok(Json(DataResponse { data: items }))
}

/// PUT /staff/bookings/{id}
pub async fn update_booking(
    State(state): State<AppState>,
    session: StaffSession,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateBookingRequest>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking =
        flow::update_booking(&state, session.salon_id, id, body, actor(&session)).await?;
    Ok(Json(DataResponse { data: booking }))
}

/// PATCH /staff/bookings/{id}
///
/// Status-only transition; cancellation lives here, never DELETE.
pub async fn update_booking_status(
    State(state): State<AppState>,
    session: StaffSession,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateBookingStatus>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking =
        flow::set_booking_status(&state, session.salon_id, id, &body.status, actor(&session))
            .await?;
    Ok(Json(DataResponse { data: booking }))
}
