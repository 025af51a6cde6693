//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as
//! production) on top of a `#[sqlx::test]` pool, plus request and
//! seeding helpers.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use salonflow_api::auth::jwt::{issue_token, JwtConfig};
use salonflow_api::config::{RateLimitConfig, ServerConfig};
use salonflow_api::ratelimit::FixedWindowLimiter;
use salonflow_api::router::build_app_router;
use salonflow_api::state::AppState;
use salonflow_core::types::DbId;
use salonflow_db::models::master::CreateMaster;
use salonflow_db::models::salon::CreateSalon;
use salonflow_db::models::service::CreateService;
use salonflow_db::repositories::{MasterRepo, SalonRepo, ServiceRepo};

/// Build a test `ServerConfig` with safe defaults and a small rate
/// limit window so 429 behavior is testable.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            expiry_hours: 1,
        },
        rate_limit: RateLimitConfig {
            max_attempts: 3,
            window_secs: 3600,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors the construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let booking_limiter = Arc::new(FixedWindowLimiter::new(
        config.rate_limit.max_attempts,
        Duration::from_secs(config.rate_limit.window_secs),
    ));
    let state = AppState {
        db: pool,
        config: Arc::new(config.clone()),
        booking_limiter,
        event_bus: Arc::new(salonflow_events::EventBus::default()),
    };
    build_app_router(state, &config)
}

/// Issue a staff token signed with the test secret.
pub fn auth_token(master_id: DbId) -> String {
    issue_token(master_id, &test_config().jwt).expect("issue test token")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request"),
    )
    .await
}

fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, body)).await
}

/// POST with an `x-forwarded-for` header so each test controls its own
/// rate-limit bucket.
pub async fn post_json_from(
    app: Router,
    uri: &str,
    ip: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let mut request = json_request("POST", uri, None, body);
    request
        .headers_mut()
        .insert("x-forwarded-for", ip.parse().expect("header value"));
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request("PATCH", uri, Some(token), body)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Seed a salon with no buffer, no lead time, 60-day advance window.
pub async fn seed_salon(pool: &PgPool) -> DbId {
    seed_salon_with(pool, 0, 0).await
}

pub async fn seed_salon_with(pool: &PgPool, buffer_time: i32, min_lead_time_hours: i32) -> DbId {
    SalonRepo::create(
        pool,
        &CreateSalon {
            name: "Test Salon".to_string(),
            buffer_time: Some(buffer_time),
            min_lead_time_hours: Some(min_lead_time_hours),
            max_advance_days: Some(60),
        },
    )
    .await
    .expect("seed salon")
    .id
}

pub async fn seed_master(pool: &PgPool, salon_id: DbId, name: &str) -> DbId {
    MasterRepo::create(
        pool,
        &CreateMaster {
            salon_id,
            name: name.to_string(),
        },
    )
    .await
    .expect("seed master")
    .id
}

pub async fn seed_service(pool: &PgPool, salon_id: DbId, price: i32, duration: i32) -> DbId {
    ServiceRepo::create(
        pool,
        &CreateService {
            salon_id,
            name: "Haircut".to_string(),
            price: Some(price),
            duration: Some(duration),
        },
    )
    .await
    .expect("seed service")
    .id
}

/// A date safely inside the booking window, `days` ahead of today.
pub fn future_date(days: i64) -> String {
    (chrono::Local::now() + chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}
