//! HTTP-level integration tests for the public booking endpoint.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the
//! router, against a per-test database provided by `#[sqlx::test]`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, future_date, post_json_from, seed_master, seed_salon,
    seed_salon_with, seed_service,
};
use salonflow_db::models::time_block::CreateTimeBlock;
use salonflow_db::repositories::{ClientRepo, TimeBlockRepo};
use serde_json::json;
use sqlx::PgPool;

fn booking_body(salon_id: i64, master_id: i64, date: &str, time: &str) -> serde_json::Value {
    json!({
        "salon_id": salon_id,
        "master_id": master_id,
        "name": "Olena Kovalenko",
        "phone": "+380 50 123-45-67",
        "date": date,
        "time": time,
    })
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_booking_happy_path(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let date = future_date(1);

    let app = build_test_app(pool);
    let response = post_json_from(
        app,
        "/api/v1/public/booking",
        "10.0.0.1",
        booking_body(salon_id, master_id, &date, "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert!(data["id"].as_i64().is_some());
    assert_eq!(data["date"], date);
    assert_eq!(data["time"], "10:00");
    // Default 60-minute duration, end derived server-side.
    assert_eq!(data["time_end"], "11:00");
    assert_eq!(data["master_name"], "Iryna");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_service_supplies_duration_and_names(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let service_id = seed_service(&pool, salon_id, 500, 90).await;
    let date = future_date(1);

    let app = build_test_app(pool);
    let mut body = booking_body(salon_id, master_id, &date, "10:00");
    body["service_id"] = json!(service_id);
    let response = post_json_from(app, "/api/v1/public/booking", "10.0.0.1", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["time_end"], "11:30");
    assert_eq!(json["data"]["service_name"], "Haircut");
}

// ---------------------------------------------------------------------------
// Validation failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_phone_rejected(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let date = future_date(1);

    let app = build_test_app(pool);
    let mut body = booking_body(salon_id, master_id, &date, "10:00");
    body["phone"] = json!("0501234567");
    let response = post_json_from(app, "/api/v1/public/booking", "10.0.0.1", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_date_rejected(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;

    let app = build_test_app(pool);
    let response = post_json_from(
        app,
        "/api/v1/public/booking",
        "10.0.0.1",
        booking_body(salon_id, master_id, "2026-02-30", "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_html_in_name_rejected(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let date = future_date(1);

    let app = build_test_app(pool);
    let mut body = booking_body(salon_id, master_id, &date, "10:00");
    body["name"] = json!("<script>alert(1)</script>");
    let response = post_json_from(app, "/api/v1/public/booking", "10.0.0.1", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_salon_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json_from(
        app,
        "/api/v1/public/booking",
        "10.0.0.1",
        booking_body(9999, 1, &future_date(1), "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Conflicts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_overlapping_booking_is_409(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let date = future_date(1);

    let app = build_test_app(pool);
    let response = post_json_from(
        app.clone(),
        "/api/v1/public/booking",
        "10.0.0.1",
        booking_body(salon_id, master_id, &date, "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Overlaps 10:00-11:00.
    let response = post_json_from(
        app,
        "/api/v1/public/booking",
        "10.0.0.2",
        booking_body(salon_id, master_id, &date, "10:30"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["conflict_time"], "10:00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_touching_bookings_are_accepted(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let date = future_date(1);

    let app = build_test_app(pool);
    let response = post_json_from(
        app.clone(),
        "/api/v1/public/booking",
        "10.0.0.1",
        booking_body(salon_id, master_id, &date, "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Starts exactly where the first ends: half-open intervals.
    let response = post_json_from(
        app,
        "/api/v1/public/booking",
        "10.0.0.2",
        booking_body(salon_id, master_id, &date, "11:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_buffer_blocks_back_to_back(pool: PgPool) {
    // 15-minute buffer after each booking.
    let salon_id = seed_salon_with(&pool, 15, 0).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let date = future_date(1);

    let app = build_test_app(pool);
    let response = post_json_from(
        app.clone(),
        "/api/v1/public/booking",
        "10.0.0.1",
        booking_body(salon_id, master_id, &date, "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // 11:00 start falls inside the buffered window.
    let response = post_json_from(
        app.clone(),
        "/api/v1/public/booking",
        "10.0.0.2",
        booking_body(salon_id, master_id, &date, "11:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // 11:15 clears the buffer.
    let response = post_json_from(
        app,
        "/api/v1/public/booking",
        "10.0.0.3",
        booking_body(salon_id, master_id, &date, "11:15"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_time_block_conflict_names_the_block(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let date = future_date(1);

    TimeBlockRepo::create(
        &pool,
        &CreateTimeBlock {
            salon_id,
            master_id: Some(master_id),
            date: date.clone(),
            start_time: "12:00".to_string(),
            end_time: "13:00".to_string(),
            title: Some("Lunch".to_string()),
            block_type: Some("LUNCH".to_string()),
            is_all_day: None,
        },
    )
    .await
    .expect("seed time block");

    let app = build_test_app(pool);
    let response = post_json_from(
        app,
        "/api/v1/public/booking",
        "10.0.0.1",
        booking_body(salon_id, master_id, &date, "12:30"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Lunch"));
    assert_eq!(json["conflict_time"], "12:00");
}

// ---------------------------------------------------------------------------
// Client resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_same_phone_reuses_client_row(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let date = future_date(1);

    let app = build_test_app(pool.clone());
    // Same number, different formatting on the second request.
    let response = post_json_from(
        app.clone(),
        "/api/v1/public/booking",
        "10.0.0.1",
        booking_body(salon_id, master_id, &date, "10:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let mut body = booking_body(salon_id, master_id, &date, "14:00");
    body["phone"] = json!("+380501234567");
    let response = post_json_from(app, "/api/v1/public/booking", "10.0.0.2", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let mut conn = pool.acquire().await.unwrap();
    let client = ClientRepo::find_by_phone(&mut conn, salon_id, "+380501234567")
        .await
        .unwrap()
        .expect("client should exist");
    drop(conn);
    assert_eq!(client.visits_count, 2);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE salon_id = $1")
        .bind(salon_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rate_limit_returns_429(pool: PgPool) {
    let salon_id = seed_salon(&pool).await;
    let master_id = seed_master(&pool, salon_id, "Iryna").await;
    let date = future_date(1);

    // Test config allows 3 attempts per window; attempts count before
    // any validation, so identical bodies are fine.
    let app = build_test_app(pool);
    for hour in 0..3 {
        let response = post_json_from(
            app.clone(),
            "/api/v1/public/booking",
            "10.0.0.1",
            booking_body(salon_id, master_id, &date, &format!("{:02}:00", 10 + hour)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = post_json_from(
        app.clone(),
        "/api/v1/public/booking",
        "10.0.0.1",
        booking_body(salon_id, master_id, &date, "15:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));

    // A different caller is unaffected.
    let response = post_json_from(
        app,
        "/api/v1/public/booking",
        "10.0.0.2",
        booking_body(salon_id, master_id, &date, "15:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
