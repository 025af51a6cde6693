//! The shared booking pipeline.
//!
//! Both entry adapters (public self-service and authenticated staff)
//! feed this module; [`CallerContext`] is the only place their behavior
//! diverges. The write path is: validate, resolve references, then one
//! transaction that locks the master's day, re-reads it, conflict
//! checks and writes. Events publish after commit only.

use chrono::Local;
use serde::Deserialize;

use salonflow_core::availability::{find_conflict, occupied_intervals, BlockSlot, BookingSlot};
use salonflow_core::error::CoreError;
use salonflow_core::policy::{
    has_html_tag, validate_candidate, BookingCandidate, CallerContext, MAX_DURATION_MIN,
    STAFF_MIN_DURATION_MIN,
};
use salonflow_core::status::BookingStatus;
use salonflow_core::timegrid::{from_minutes, parse_date, to_minutes, Interval};
use salonflow_core::types::DbId;
use salonflow_db::models::booking::{Booking, BookingChanges, NewBooking};
use salonflow_db::models::client::CreateClient;
use salonflow_db::models::master::Master;
use salonflow_db::models::service::Service;
use salonflow_db::repositories::{
    BookingRepo, ClientRepo, MasterRepo, SalonRepo, ServiceRepo, TimeBlockRepo,
};
use salonflow_events::{event_types, BookingEvent};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Public-path notes are capped at this many characters.
const MAX_NOTES_LEN: usize = 500;

/// A create request as assembled by an entry adapter.
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub salon_id: DbId,
    pub master_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub client_name: String,
    pub client_phone: String,
    pub email: Option<String>,
    pub date: String,
    pub time: String,
    pub duration: Option<i32>,
    pub price: Option<i32>,
    pub notes: Option<String>,
    pub caller: CallerContext,
    /// `"public"` or `"master:<id>"`, recorded on the audit trail.
    pub actor: String,
}

/// Deserialized PUT body for a staff update. Absent fields keep their
/// stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookingRequest {
    pub master_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<i32>,
    pub extra_time: Option<i32>,
    pub price: Option<i32>,
    pub notes: Option<String>,
}

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Resolve an optional master reference inside the salon. Cross-tenant
/// ids are a 403, unknown or inactive ones a 404.
async fn resolve_master(
    state: &AppState,
    salon_id: DbId,
    master_id: Option<DbId>,
) -> AppResult<Option<Master>> {
    let Some(id) = master_id else {
        return Ok(None);
    };
    let master = MasterRepo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found("master", id))?;
    if master.salon_id != salon_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Master does not belong to this salon".into(),
        )));
    }
    if !master.is_active {
        return Err(not_found("master", id));
    }
    Ok(Some(master))
}

async fn resolve_service(
    state: &AppState,
    salon_id: DbId,
    service_id: Option<DbId>,
) -> AppResult<Option<Service>> {
    let Some(id) = service_id else {
        return Ok(None);
    };
    let service = ServiceRepo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found("service", id))?;
    if service.salon_id != salon_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Service does not belong to this salon".into(),
        )));
    }
    if !service.is_active {
        return Err(not_found("service", id));
    }
    Ok(Some(service))
}

/// Create a booking through the full pipeline: policy validation,
/// reference resolution, locked conflict check, client find-or-create,
/// insert, then post-commit stats and event publication.
pub async fn create_booking(state: &AppState, req: CreateBookingRequest) -> AppResult<Booking> {
    let salon = SalonRepo::find_active_by_id(&state.db, req.salon_id)
        .await?
        .ok_or_else(|| not_found("salon", req.salon_id))?;
    let policy = salon.policy();

    let master = resolve_master(state, salon.id, req.master_id).await?;
    let service = resolve_service(state, salon.id, req.service_id).await?;

    let candidate = BookingCandidate {
        client_name: req.client_name.clone(),
        client_phone: req.client_phone.clone(),
        date: req.date.clone(),
        time: req.time.clone(),
        // A referenced service supplies the default duration.
        duration: req.duration.or_else(|| service.as_ref().map(|s| s.duration)),
    };
    let validated = validate_candidate(&candidate, &policy, req.caller, Local::now().naive_local())?;

    let price = req
        .price
        .or_else(|| service.as_ref().map(|s| s.price))
        .unwrap_or(0);
    let notes = req.notes.filter(|n| !n.trim().is_empty()).map(|n| {
        if req.caller == CallerContext::Public {
            n.chars().take(MAX_NOTES_LEN).collect()
        } else {
            n
        }
    });

    let mut tx = state.db.begin().await?;

    // Assigned bookings serialize on the (master, date) advisory lock
    // and are conflict-checked against the re-read day. Unassigned
    // bookings have no lock target and skip the check.
    if let Some(master) = &master {
        BookingRepo::lock_day(&mut tx, master.id, &validated.date).await?;
        let day = BookingRepo::slots_for_day(&mut tx, master.id, &validated.date).await?;
        let blocks =
            TimeBlockRepo::slots_for_day(&mut tx, salon.id, master.id, &validated.date).await?;

        let bookings: Vec<BookingSlot> = day
            .into_iter()
            .map(|r| BookingSlot {
                id: r.id,
                time: r.time,
                time_end: r.time_end,
                duration: r.duration,
            })
            .collect();
        let blocks: Vec<BlockSlot> = blocks
            .into_iter()
            .map(|r| BlockSlot {
                title: r.title,
                start_time: r.start_time,
                end_time: r.end_time,
                is_all_day: r.is_all_day,
            })
            .collect();

        let occupied = occupied_intervals(&bookings, &blocks, policy.buffer_time_min, None)?;
        if let Some(conflict) = find_conflict(validated.interval, &occupied) {
            return Err(AppError::Core(CoreError::conflict_at(
                conflict.message(),
                conflict.conflict_time(),
            )));
        }
    }

    // Find-or-create the client by normalized phone. Staff bookings may
    // carry no phone at all; those stay unlinked.
    let client_id = if validated.client_phone.is_empty() {
        None
    } else {
        let existing =
            ClientRepo::find_by_phone(&mut tx, salon.id, &validated.client_phone).await?;
        let client = match existing {
            Some(client) => {
                if let Some(email) = req.email.as_deref().filter(|e| e.contains('@')) {
                    if client.email.is_none() {
                        ClientRepo::backfill_email(&mut tx, client.id, email).await?;
                    }
                }
                client
            }
            None => {
                ClientRepo::create(
                    &mut tx,
                    &CreateClient {
                        salon_id: salon.id,
                        name: validated.client_name.clone(),
                        phone: validated.client_phone.clone(),
                        email: req.email.clone().filter(|e| e.contains('@')),
                    },
                )
                .await?
            }
        };
        Some(client.id)
    };

    let new_booking = NewBooking {
        salon_id: salon.id,
        master_id: master.as_ref().map(|m| m.id),
        service_id: service.as_ref().map(|s| s.id),
        client_id,
        client_name: validated.client_name.clone(),
        client_phone: validated.client_phone.clone(),
        service_name: service
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "Service".to_string()),
        master_name: master
            .as_ref()
            .map(|m| m.name.clone())
            .unwrap_or_else(|| "Any master".to_string()),
        date: validated.date.clone(),
        time: validated.time.clone(),
        time_end: validated.time_end.clone(),
        duration: validated.duration,
        price,
        notes,
        status: BookingStatus::Confirmed.as_str().to_string(),
    };
    let booking = BookingRepo::insert(&mut tx, &new_booking).await?;

    tx.commit().await?;

    // Post-commit stats bump. The booking exists either way; a failure
    // here only skews the engagement counters.
    if let Some(client_id) = client_id {
        if let Err(err) = ClientRepo::record_visit(&state.db, client_id, booking.price).await {
            tracing::warn!(client_id, error = %err, "Failed to record client visit");
        }
    }

    state.event_bus.publish(
        BookingEvent::new(event_types::BOOKING_CREATED)
            .with_entity("booking", booking.id)
            .with_actor(req.actor)
            .with_after(serde_json::to_value(&booking).unwrap_or_default()),
    );

    Ok(booking)
}

/// Full staff update: reschedule, reassign, snapshot refresh. Re-runs
/// the conflict check against the target master/day, excluding the
/// booking itself.
pub async fn update_booking(
    state: &AppState,
    salon_id: DbId,
    booking_id: DbId,
    req: UpdateBookingRequest,
    actor: String,
) -> AppResult<Booking> {
    let existing = BookingRepo::find_by_id(&state.db, booking_id)
        .await?
        .ok_or_else(|| not_found("booking", booking_id))?;
    if existing.salon_id != salon_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Booking belongs to another salon".into(),
        )));
    }

    let salon = SalonRepo::find_active_by_id(&state.db, salon_id)
        .await?
        .ok_or_else(|| not_found("salon", salon_id))?;
    let policy = salon.policy();

    // A started booking keeps its client and service; only schedule
    // and bookkeeping fields stay editable.
    let now = Local::now().naive_local();
    if booking_has_started(&existing, now)
        && (req.service_id.is_some() || req.client_name.is_some() || req.client_phone.is_some())
    {
        return Err(AppError::Core(CoreError::validation(
            "Cannot change client or service after the booking has started",
        )));
    }

    if let Some(name) = &req.client_name {
        let len = name.trim().chars().count();
        if !(2..=100).contains(&len) {
            return Err(AppError::Core(CoreError::validation(
                "Name must be between 2 and 100 characters",
            )));
        }
        if has_html_tag(name) {
            return Err(AppError::Core(CoreError::validation("Invalid name")));
        }
    }
    if let Some(d) = req.duration {
        if !(STAFF_MIN_DURATION_MIN..=MAX_DURATION_MIN).contains(&d) {
            return Err(AppError::Core(CoreError::validation(format!(
                "Duration must be between {STAFF_MIN_DURATION_MIN} and {MAX_DURATION_MIN} minutes"
            ))));
        }
    }

    let master = resolve_master(state, salon_id, req.master_id).await?;
    let service = resolve_service(state, salon_id, req.service_id).await?;

    // Effective schedule after the change set is applied.
    let date = req.date.clone().unwrap_or_else(|| existing.date.clone());
    let time = req.time.clone().unwrap_or_else(|| existing.time.clone());
    let duration = req
        .duration
        .or_else(|| service.as_ref().map(|s| s.duration))
        .unwrap_or(existing.duration);
    let extra_time = req.extra_time.or(existing.extra_time).unwrap_or(0);
    let target_master = master.as_ref().map(|m| m.id).or(existing.master_id);

    parse_date(&date)?;
    let start_min = to_minutes(&time)?;
    let end_min = start_min + duration + extra_time;
    let time_end = from_minutes(end_min);

    // Compare against the stored schedule, not the request fields: a
    // service change alone can shift the effective duration, and the
    // recomputed time_end plus the conflict re-check must follow it.
    let rescheduled = req.date.is_some()
        || req.time.is_some()
        || req.master_id.is_some()
        || duration != existing.duration
        || extra_time != existing.extra_time.unwrap_or(0);
    if rescheduled {
        let start = compose_start(&date, start_min)?;
        if start < now {
            return Err(AppError::Core(CoreError::validation(
                "Cannot move a booking into the past",
            )));
        }
    }

    let mut tx = state.db.begin().await?;

    if rescheduled {
        if let Some(master_id) = target_master {
            BookingRepo::lock_day(&mut tx, master_id, &date).await?;
            let day = BookingRepo::slots_for_day(&mut tx, master_id, &date).await?;
            let blocks = TimeBlockRepo::slots_for_day(&mut tx, salon_id, master_id, &date).await?;

            let bookings: Vec<BookingSlot> = day
                .into_iter()
                .map(|r| BookingSlot {
                    id: r.id,
                    time: r.time,
                    time_end: r.time_end,
                    duration: r.duration,
                })
                .collect();
            let blocks: Vec<BlockSlot> = blocks
                .into_iter()
                .map(|r| BlockSlot {
                    title: r.title,
                    start_time: r.start_time,
                    end_time: r.end_time,
                    is_all_day: r.is_all_day,
                })
                .collect();

            let occupied = occupied_intervals(
                &bookings,
                &blocks,
                policy.buffer_time_min,
                Some(existing.id),
            )?;
            if let Some(conflict) = find_conflict(Interval::new(start_min, end_min), &occupied) {
                return Err(AppError::Core(CoreError::conflict_at(
                    conflict.message(),
                    conflict.conflict_time(),
                )));
            }
        }
    }

    let changes = BookingChanges {
        master_id: master.as_ref().map(|m| m.id),
        master_name: master.as_ref().map(|m| m.name.clone()),
        service_id: service.as_ref().map(|s| s.id),
        service_name: service.as_ref().map(|s| s.name.clone()),
        client_id: None,
        client_name: req.client_name.map(|n| n.trim().to_string()),
        client_phone: req.client_phone,
        date: req.date,
        time: req.time,
        // Recomputed whenever the schedule moved; never caller-supplied.
        time_end: rescheduled.then_some(time_end),
        duration: req.duration.or_else(|| service.as_ref().map(|s| s.duration)),
        extra_time: req.extra_time,
        price: req.price.or_else(|| service.as_ref().map(|s| s.price)),
        notes: req.notes,
    };
    let updated = BookingRepo::apply_changes(&mut tx, existing.id, &changes)
        .await?
        .ok_or_else(|| not_found("booking", existing.id))?;

    tx.commit().await?;

    state.event_bus.publish(
        BookingEvent::new(event_types::BOOKING_UPDATED)
            .with_entity("booking", updated.id)
            .with_actor(actor)
            .with_before(serde_json::to_value(&existing).unwrap_or_default())
            .with_after(serde_json::to_value(&updated).unwrap_or_default()),
    );

    Ok(updated)
}

/// Status-only transition. Any state can move to any other; cancellation
/// frees the slot without deleting the row.
pub async fn set_booking_status(
    state: &AppState,
    salon_id: DbId,
    booking_id: DbId,
    status: &str,
    actor: String,
) -> AppResult<Booking> {
    let status = BookingStatus::parse(status)?;

    let existing = BookingRepo::find_by_id(&state.db, booking_id)
        .await?
        .ok_or_else(|| not_found("booking", booking_id))?;
    if existing.salon_id != salon_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Booking belongs to another salon".into(),
        )));
    }

    let updated = BookingRepo::set_status(&state.db, booking_id, status.as_str())
        .await?
        .ok_or_else(|| not_found("booking", booking_id))?;

    state.event_bus.publish(
        BookingEvent::new(event_types::BOOKING_STATUS_CHANGED)
            .with_entity("booking", updated.id)
            .with_actor(actor)
            .with_before(serde_json::json!({ "status": existing.status }))
            .with_after(serde_json::json!({ "status": updated.status })),
    );

    Ok(updated)
}

fn compose_start(
    date: &str,
    start_min: i32,
) -> Result<chrono::NaiveDateTime, CoreError> {
    let d = parse_date(date)?;
    d.and_hms_opt((start_min / 60) as u32, (start_min % 60) as u32, 0)
        .ok_or_else(|| CoreError::validation("Invalid time"))
}

fn booking_has_started(booking: &Booking, now: chrono::NaiveDateTime) -> bool {
    match to_minutes(&booking.time) {
        Ok(start_min) => compose_start(&booking.date, start_min)
            .map(|start| start <= now)
            .unwrap_or(false),
        Err(_) => false,
    }
}
