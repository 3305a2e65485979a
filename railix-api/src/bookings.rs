use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use railix_booking::{BookingRequest, BookingView};
use railix_shared::models::events::{BookingCancelledEvent, BookingConfirmedEvent};
use railix_shared::Pnr;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub pnr: Pnr,
}

#[derive(Debug, Deserialize)]
pub struct CancelBookingRequest {
    /// Amount originally paid, in paise; the refund is derived from it.
    pub amount_paid: i64,
}

#[derive(Debug, Serialize)]
pub struct CancelBookingResponse {
    pub pnr: Pnr,
    pub refund_amount: i64,
}

/// POST /v1/bookings
/// One seat per passenger, one payment for the group; the whole sequence
/// commits or rolls back together. Returns the group's first PNR.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let passenger_count = req.passengers.len();
    let train_id = req.train_id;
    let total_amount = req.total_amount;

    let pnr = state.booking_service.create_booking(req).await?;

    state
        .metrics
        .bookings_created
        .inc_by(passenger_count as u64);
    let event = BookingConfirmedEvent {
        pnr: pnr.to_string(),
        train_id,
        passenger_count,
        total_amount,
        timestamp: Utc::now().timestamp(),
    };
    tracing::info!(telemetry = ?event, "booking confirmed");

    Ok(Json(CreateBookingResponse { pnr }))
}

/// GET /v1/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let bookings = state.bookings.list_bookings().await?;
    Ok(Json(bookings))
}

/// POST /v1/bookings/{pnr}/cancel
/// Flips the booking to CANCELLED, releases the seat, records the refund.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
    Json(req): Json<CancelBookingRequest>,
) -> Result<Json<CancelBookingResponse>, AppError> {
    let pnr = Pnr::from(pnr);
    let refund_amount = state
        .booking_service
        .cancel_booking(&pnr, req.amount_paid)
        .await?;

    state.metrics.bookings_cancelled.inc();
    let event = BookingCancelledEvent {
        pnr: pnr.to_string(),
        refund_amount,
        timestamp: Utc::now().timestamp(),
    };
    tracing::info!(telemetry = ?event, "booking cancelled");

    Ok(Json(CancelBookingResponse { pnr, refund_amount }))
}
