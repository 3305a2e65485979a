use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod bookings;
pub mod error;
pub mod metrics;
pub mod state;
pub mod stream;
pub mod trains;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::export_metrics))
        .route("/v1/trains", get(trains::search_trains))
        .route("/v1/trains/{id}", get(trains::get_train))
        .route("/v1/trains/{id}/fares", get(trains::list_fares))
        .route(
            "/v1/bookings",
            post(bookings::create_booking).get(bookings::list_bookings),
        )
        .route("/v1/bookings/{pnr}/cancel", post(bookings::cancel_booking))
        .route("/v1/admin/trains", post(trains::create_train))
        .route("/v1/admin/revenue", get(admin::get_revenue))
        .route("/v1/admin/cancellations", get(admin::list_cancellations))
        .route("/v1/changes/stream", get(stream::change_stream))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
