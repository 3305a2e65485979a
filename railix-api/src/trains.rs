use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use railix_core::train::{Fare, NewTrain, Train};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchTrainsQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<NaiveDate>,
}

/// GET /v1/trains
/// Substring match on origin/destination, exact match on travel date.
pub async fn search_trains(
    State(state): State<AppState>,
    Query(query): Query<SearchTrainsQuery>,
) -> Result<Json<Vec<Train>>, AppError> {
    let trains = state
        .trains
        .search_trains(
            query.origin.as_deref(),
            query.destination.as_deref(),
            query.date,
        )
        .await?;

    Ok(Json(trains))
}

/// GET /v1/trains/{id}
pub async fn get_train(
    State(state): State<AppState>,
    Path(train_id): Path<Uuid>,
) -> Result<Json<Train>, AppError> {
    let train = state
        .trains
        .get_train(train_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Train not found: {train_id}")))?;

    Ok(Json(train))
}

/// GET /v1/trains/{id}/fares
pub async fn list_fares(
    State(state): State<AppState>,
    Path(train_id): Path<Uuid>,
) -> Result<Json<Vec<Fare>>, AppError> {
    let fares = state.trains.list_fares(train_id).await?;
    Ok(Json(fares))
}

/// POST /v1/admin/trains
/// Creates the train plus its four class fares at the fixed multipliers.
pub async fn create_train(
    State(state): State<AppState>,
    Json(req): Json<NewTrain>,
) -> Result<Json<Train>, AppError> {
    if req.total_seats <= 0 {
        return Err(AppError::ValidationError(
            "total_seats must be positive".into(),
        ));
    }
    if req.base_price <= 0 {
        return Err(AppError::ValidationError(
            "base_price must be positive".into(),
        ));
    }

    let train = state.trains.create_train(&req).await?;
    Ok(Json(train))
}
