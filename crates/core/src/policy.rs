//! Tenant booking rules and candidate validation.
//!
//! [`SalonPolicy`] is an explicit value object loaded from the salon row
//! and passed into validation; nothing here reads ambient state.
//! [`validate_candidate`] runs the rule chain in a fixed order and fails
//! fast on the first violation, so error precedence is deterministic.

use std::sync::OnceLock;

use chrono::{Duration, NaiveDateTime};
use regex::Regex;

use crate::error::CoreError;
use crate::phone::{clean_phone, is_valid_public_phone};
use crate::timegrid::{from_minutes, parse_date, to_minutes, Interval};

/// Hard duration ceiling for any booking, minutes.
pub const MAX_DURATION_MIN: i32 = 480;

/// Public callers get silent clamping into `[15, 480]`.
pub const PUBLIC_MIN_DURATION_MIN: i32 = 15;

/// Staff callers get a hard rejection outside `[5, 480]`.
pub const STAFF_MIN_DURATION_MIN: i32 = 5;

/// Duration applied when the caller supplies none.
pub const DEFAULT_DURATION_MIN: i32 = 60;

/// Per-salon booking rules, read-only to the scheduling core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalonPolicy {
    /// Minutes appended after an existing booking before the next one
    /// may start.
    pub buffer_time_min: i32,
    /// Minimum notice between "now" and a booking's start.
    pub min_lead_time_hours: i32,
    /// Maximum days into the future a booking may be placed.
    pub max_advance_days: i32,
    /// Calendar slot discretization step.
    pub slot_step_minutes: i32,
    /// UI/notification concern; not a lifecycle state.
    pub require_confirmation: bool,
    /// Hours before start until which a client may cancel.
    pub cancel_deadline_hours: i32,
    pub no_show_penalty_percent: i32,
    pub max_no_shows_before_block: i32,
}

impl Default for SalonPolicy {
    fn default() -> Self {
        Self {
            buffer_time_min: 0,
            min_lead_time_hours: 0,
            max_advance_days: 60,
            slot_step_minutes: 15,
            require_confirmation: false,
            cancel_deadline_hours: 2,
            no_show_penalty_percent: 0,
            max_no_shows_before_block: 3,
        }
    }
}

/// Who is asking. The two entry points share one pipeline; this is the
/// only place their strictness diverges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerContext {
    /// Unauthenticated self-service caller: phone format enforced,
    /// duration silently clamped.
    Public,
    /// Authenticated operator: phone is opaque text, out-of-range
    /// duration is a hard error.
    Staff,
}

/// Raw candidate appointment as assembled by an entry adapter.
#[derive(Debug, Clone)]
pub struct BookingCandidate {
    pub client_name: String,
    pub client_phone: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM` start.
    pub time: String,
    /// Minutes; optional, defaulted per caller rules.
    pub duration: Option<i32>,
}

/// A candidate that passed every policy rule, with derived fields the
/// write path needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCandidate {
    /// Trimmed display name.
    pub client_name: String,
    /// Cleaned phone (separators stripped); empty is allowed for staff.
    pub client_phone: String,
    pub date: String,
    pub time: String,
    /// Always recomputed from `time + duration`, never caller-supplied.
    pub time_end: String,
    pub duration: i32,
    /// Candidate interval in minutes-of-day, for conflict checking.
    pub interval: Interval,
}

fn html_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"))
}

/// True when the input contains an HTML-like tag. Shared by candidate
/// validation and the staff update path.
pub fn has_html_tag(input: &str) -> bool {
    html_pattern().is_match(input)
}

/// Validate a candidate against the salon policy, fail-fast.
///
/// Rule order (first failing rule wins):
/// 1. required fields;
/// 2. name length `[2,100]`, no HTML-like substrings;
/// 3. phone format (public path only);
/// 4. date format / calendar validity, composed start not in the past;
/// 5. composed start within `max_advance_days`;
/// 6. duration bounds (clamp for public, reject for staff);
/// 7. minimum lead time.
///
/// `now` is the salon-local wall clock, injected for testability.
pub fn validate_candidate(
    candidate: &BookingCandidate,
    policy: &SalonPolicy,
    caller: CallerContext,
    now: NaiveDateTime,
) -> Result<ValidatedCandidate, CoreError> {
    // 1. Required fields.
    let name = candidate.client_name.trim().to_string();
    if name.is_empty() || candidate.date.is_empty() || candidate.time.is_empty() {
        return Err(CoreError::validation("Fill in all required fields"));
    }
    if caller == CallerContext::Public && candidate.client_phone.trim().is_empty() {
        return Err(CoreError::validation("Fill in all required fields"));
    }

    // 2. Name shape. The HTML check is defensive input sanitization, not
    // a full sanitizer.
    let name_len = name.chars().count();
    if !(2..=100).contains(&name_len) {
        return Err(CoreError::validation(
            "Name must be between 2 and 100 characters",
        ));
    }
    if has_html_tag(&name) {
        return Err(CoreError::validation("Invalid name"));
    }

    // 3. Phone. Staff operators are trusted; their phone field is opaque.
    let phone = clean_phone(&candidate.client_phone);
    if caller == CallerContext::Public && !is_valid_public_phone(&phone) {
        return Err(CoreError::validation(
            "Invalid phone format (+380XXXXXXXXX)",
        ));
    }

    // 4. Date and composed start vs now.
    let date = parse_date(&candidate.date)?;
    let start_min = to_minutes(&candidate.time)?;
    let start = date
        .and_hms_opt((start_min / 60) as u32, (start_min % 60) as u32, 0)
        .ok_or_else(|| CoreError::validation(format!("Invalid time: {}", candidate.time)))?;
    if start < now {
        return Err(CoreError::validation(
            "Cannot create a booking in the past",
        ));
    }

    // 5. Advance window.
    let horizon = now + Duration::days(i64::from(policy.max_advance_days));
    if start > horizon {
        return Err(CoreError::validation(format!(
            "Bookings can be made at most {} days ahead",
            policy.max_advance_days
        )));
    }

    // 6. Duration bounds.
    let duration = match caller {
        CallerContext::Public => candidate
            .duration
            .unwrap_or(DEFAULT_DURATION_MIN)
            .clamp(PUBLIC_MIN_DURATION_MIN, MAX_DURATION_MIN),
        CallerContext::Staff => {
            let d = candidate.duration.unwrap_or(DEFAULT_DURATION_MIN);
            if !(STAFF_MIN_DURATION_MIN..=MAX_DURATION_MIN).contains(&d) {
                return Err(CoreError::validation(format!(
                    "Duration must be between {STAFF_MIN_DURATION_MIN} and {MAX_DURATION_MIN} minutes"
                )));
            }
            d
        }
    };

    // 7. Lead time.
    if policy.min_lead_time_hours > 0 {
        let earliest = now + Duration::hours(i64::from(policy.min_lead_time_hours));
        if start < earliest {
            return Err(CoreError::validation(format!(
                "Bookings require at least {} hours notice",
                policy.min_lead_time_hours
            )));
        }
    }

    let end_min = start_min + duration;
    Ok(ValidatedCandidate {
        client_name: name,
        client_phone: phone,
        date: candidate.date.clone(),
        time: candidate.time.clone(),
        time_end: from_minutes(end_min),
        duration,
        interval: Interval::new(start_min, end_min),
    })
}
