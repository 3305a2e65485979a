use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use railix_api::{app, metrics::Metrics, state::AppState};
use railix_booking::{memory::InMemoryRailway, BookingService};
use railix_store::ChangeBroadcaster;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> (Router, Arc<InMemoryRailway>) {
    let railway = Arc::new(InMemoryRailway::new());
    let booking_service = Arc::new(BookingService::new(railway.clone(), railway.clone()));

    let state = AppState {
        trains: railway.clone(),
        bookings: railway.clone(),
        revenue: railway.clone(),
        booking_service,
        changes: ChangeBroadcaster::new(16),
        metrics: Metrics::new().unwrap(),
    };

    (app(state), railway)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

fn sample_train() -> Value {
    json!({
        "name": "Rajdhani Express",
        "number": "12951",
        "origin": "Mumbai",
        "destination": "Delhi",
        "departure_time": "2026-09-10T16:30:00Z",
        "arrival_time": "2026-09-11T08:45:00Z",
        "travel_date": "2026-09-10",
        "total_seats": 10,
        "base_price": 100_000
    })
}

async fn create_train(app: &Router) -> Value {
    let (status, body) = send(app, "POST", "/v1/admin/trains", Some(sample_train())).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn test_admin_create_train_seeds_four_fares() {
    let (app, _) = test_app();
    let train = create_train(&app).await;

    assert_eq!(train["available_seats"], 10);
    assert_eq!(train["total_seats"], 10);

    let id = train["id"].as_str().unwrap();
    let (status, fares) = send(&app, "GET", &format!("/v1/trains/{id}/fares"), None).await;
    assert_eq!(status, StatusCode::OK);

    let fares = fares.as_array().unwrap();
    assert_eq!(fares.len(), 4);
    let amount_for = |class: &str| {
        fares
            .iter()
            .find(|f| f["travel_class"] == class)
            .map(|f| f["amount"].as_i64().unwrap())
            .unwrap()
    };
    assert_eq!(amount_for("AC First Class"), 100_000);
    assert_eq!(amount_for("AC 2 Tier"), 80_000);
    assert_eq!(amount_for("AC 3 Tier"), 60_000);
    assert_eq!(amount_for("Sleeper"), 40_000);
}

#[tokio::test]
async fn test_admin_create_train_rejects_bad_input() {
    let (app, _) = test_app();

    let mut bad = sample_train();
    bad["total_seats"] = json!(0);
    let (status, _) = send(&app, "POST", "/v1/admin/trains", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad = sample_train();
    bad["base_price"] = json!(-5);
    let (status, _) = send(&app, "POST", "/v1/admin/trains", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_trains_filters() {
    let (app, _) = test_app();
    create_train(&app).await;

    let (status, trains) = send(&app, "GET", "/v1/trains?origin=mumb", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trains.as_array().unwrap().len(), 1);

    let (_, trains) = send(&app, "GET", "/v1/trains?origin=chennai", None).await;
    assert!(trains.as_array().unwrap().is_empty());

    let (_, trains) = send(&app, "GET", "/v1/trains?date=2026-09-10", None).await;
    assert_eq!(trains.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_unknown_train_is_404() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        "GET",
        "/v1/trains/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_booking_takes_seats_and_accrues_revenue() {
    let (app, railway) = test_app();
    let train = create_train(&app).await;
    let id = train["id"].as_str().unwrap();

    let request = json!({
        "train_id": id,
        "travel_class": "Sleeper",
        "payment_method": "UPI",
        "total_amount": 80_000,
        "passengers": [
            {"name": "Asha Rao", "age": 34, "gender": "FEMALE", "contact": "9876543210"},
            {"name": "Vikram Rao", "age": 36, "gender": "MALE", "contact": "9876543211"}
        ]
    });
    let (status, body) = send(&app, "POST", "/v1/bookings", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    let pnr = body["pnr"].as_str().unwrap();
    assert_eq!(pnr.len(), 10);

    let train_id = uuid::Uuid::parse_str(id).unwrap();
    assert_eq!(railway.available_seats(train_id), 8);
    assert_eq!(railway.revenue_total(), 80_000);

    let (status, bookings) = send(&app, "GET", "/v1/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["booking_status"], "CONFIRMED");
    assert_eq!(bookings[0]["payment_status"], "SUCCESSFUL");
    assert_eq!(bookings[0]["passenger_contact"], "9876543210");

    let (_, revenue) = send(&app, "GET", "/v1/admin/revenue", None).await;
    assert_eq!(revenue["total_revenue"], 80_000);
}

#[tokio::test]
async fn test_booking_unknown_train_is_404() {
    let (app, _) = test_app();
    let request = json!({
        "train_id": "00000000-0000-0000-0000-000000000000",
        "travel_class": "Sleeper",
        "payment_method": "UPI",
        "total_amount": 40_000,
        "passengers": [
            {"name": "Asha Rao", "age": 34, "gender": "FEMALE", "contact": "9876543210"}
        ]
    });
    let (status, _) = send(&app, "POST", "/v1/bookings", Some(request)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_with_no_passengers_is_400() {
    let (app, _) = test_app();
    let train = create_train(&app).await;
    let request = json!({
        "train_id": train["id"],
        "travel_class": "Sleeper",
        "payment_method": "UPI",
        "total_amount": 40_000,
        "passengers": []
    });
    let (status, _) = send(&app, "POST", "/v1/bookings", Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_group_larger_than_a_coach_is_400() {
    let (app, _) = test_app();
    let train = create_train(&app).await;
    let passengers: Vec<Value> = (0..73)
        .map(|i| json!({"name": format!("P{i}"), "age": 30, "gender": "OTHER", "contact": "9000000000"}))
        .collect();
    let request = json!({
        "train_id": train["id"],
        "travel_class": "Sleeper",
        "payment_method": "UPI",
        "total_amount": 40_000,
        "passengers": passengers
    });
    let (status, _) = send(&app, "POST", "/v1/bookings", Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_refunds_ninety_percent_and_releases_seat() {
    let (app, railway) = test_app();
    let train = create_train(&app).await;
    let id = train["id"].as_str().unwrap();

    let request = json!({
        "train_id": id,
        "travel_class": "AC 2 Tier",
        "payment_method": "CARD",
        "total_amount": 80_000,
        "passengers": [
            {"name": "Asha Rao", "age": 34, "gender": "FEMALE", "contact": "9876543210"}
        ]
    });
    let (_, body) = send(&app, "POST", "/v1/bookings", Some(request)).await;
    let pnr = body["pnr"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/bookings/{pnr}/cancel"),
        Some(json!({"amount_paid": 80_000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refund_amount"], 72_000);

    let train_id = uuid::Uuid::parse_str(id).unwrap();
    assert_eq!(railway.available_seats(train_id), 10);
    // 10% fee stays on the books.
    assert_eq!(railway.revenue_total(), 8_000);

    let (status, cancellations) = send(&app, "GET", "/v1/admin/cancellations", None).await;
    assert_eq!(status, StatusCode::OK);
    let cancellations = cancellations.as_array().unwrap();
    assert_eq!(cancellations.len(), 1);
    assert_eq!(cancellations[0]["refund_amount"], 72_000);
    assert_eq!(cancellations[0]["status"], "PROCESSED");
}

#[tokio::test]
async fn test_cancel_twice_is_conflict() {
    let (app, _) = test_app();
    let train = create_train(&app).await;

    let request = json!({
        "train_id": train["id"],
        "travel_class": "Sleeper",
        "payment_method": "UPI",
        "total_amount": 40_000,
        "passengers": [
            {"name": "Asha Rao", "age": 34, "gender": "FEMALE", "contact": "9876543210"}
        ]
    });
    let (_, body) = send(&app, "POST", "/v1/bookings", Some(request)).await;
    let pnr = body["pnr"].as_str().unwrap().to_owned();
    let cancel_body = json!({"amount_paid": 40_000});

    let (status, _) = send(
        &app,
        "POST",
        &format!("/v1/bookings/{pnr}/cancel"),
        Some(cancel_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/bookings/{pnr}/cancel"),
        Some(cancel_body),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already cancelled"));
}

#[tokio::test]
async fn test_cancel_unknown_pnr_is_404() {
    let (app, _) = test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/v1/bookings/1234567890/cancel",
        Some(json!({"amount_paid": 1_000})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_count_bookings() {
    let (app, _) = test_app();
    let train = create_train(&app).await;

    let request = json!({
        "train_id": train["id"],
        "travel_class": "Sleeper",
        "payment_method": "UPI",
        "total_amount": 80_000,
        "passengers": [
            {"name": "Asha Rao", "age": 34, "gender": "FEMALE", "contact": "9876543210"},
            {"name": "Vikram Rao", "age": 36, "gender": "MALE", "contact": "9876543211"}
        ]
    });
    send(&app, "POST", "/v1/bookings", Some(request)).await;

    let (status, body) = send(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().unwrap();
    assert!(text.contains("railix_bookings_created_total 2"));
}
