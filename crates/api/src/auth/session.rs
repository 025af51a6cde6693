//! JWT-based staff session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use salonflow_core::error::CoreError;
use salonflow_core::types::DbId;
use salonflow_db::repositories::MasterRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated staff member extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// The salon scope is always re-derived from the master's database row,
/// never taken from the request, so a token can only ever act inside
/// its own tenant.
///
/// ```ignore
/// async fn my_handler(session: StaffSession) -> AppResult<Json<()>> {
///     tracing::info!(master_id = session.master_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StaffSession {
    /// The authenticated master's database id (from `claims.sub`).
    pub master_id: DbId,
    /// The salon the master belongs to, read from the master row.
    pub salon_id: DbId,
}

impl FromRequestParts<AppState> for StaffSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let master = MasterRepo::find_by_id(&state.db, claims.sub)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Unknown staff account".into()))
            })?;

        if !master.is_active {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Staff account is deactivated".into(),
            )));
        }

        Ok(StaffSession {
            master_id: master.id,
            salon_id: master.salon_id,
        })
    }
}
