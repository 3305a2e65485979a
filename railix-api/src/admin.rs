use axum::{extract::State, Json};
use railix_core::booking::Cancellation;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    /// Integer paise.
    pub total_revenue: i64,
}

/// GET /v1/admin/revenue
pub async fn get_revenue(State(state): State<AppState>) -> Result<Json<RevenueResponse>, AppError> {
    let total_revenue = state.revenue.total_revenue().await?;
    Ok(Json(RevenueResponse { total_revenue }))
}

/// GET /v1/admin/cancellations
pub async fn list_cancellations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Cancellation>>, AppError> {
    let cancellations = state.bookings.list_cancellations().await?;
    Ok(Json(cancellations))
}
