use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use railix_booking::BookingError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(msg) => AppError::ValidationError(msg),
            BookingError::TrainNotFound(_)
            | BookingError::NoFares(_)
            | BookingError::BookingNotFound(_) => AppError::NotFoundError(err.to_string()),
            BookingError::AlreadyCancelled(_) => AppError::ConflictError(err.to_string()),
            BookingError::Storage(e) => AppError::Anyhow(anyhow::anyhow!(e)),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

impl From<railix_core::repository::RepoError> for AppError {
    fn from(err: railix_core::repository::RepoError) -> Self {
        Self::Anyhow(anyhow::anyhow!(err))
    }
}
