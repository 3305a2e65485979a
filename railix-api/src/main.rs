use railix_api::{app, metrics::Metrics, state::AppState};
use railix_booking::BookingService;
use railix_core::repository::RevenueRepository;
use railix_store::{ChangeBroadcaster, DbClient, PgBookingRepository, PgRevenueRepository, PgTrainRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "railix_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = railix_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Railix API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let changes = ChangeBroadcaster::new(config.notify.buffer);

    let train_repo = Arc::new(PgTrainRepository::new(db.pool.clone(), changes.clone()));
    let booking_repo = Arc::new(PgBookingRepository::new(db.pool.clone(), changes.clone()));
    let revenue_repo = Arc::new(PgRevenueRepository::new(db.pool.clone()));

    // Explicit revenue bootstrap; the accrual path never creates the row.
    revenue_repo
        .ensure_initialized()
        .await
        .expect("Failed to initialize revenue record");

    let booking_service = Arc::new(BookingService::new(
        train_repo.clone(),
        booking_repo.clone(),
    ));

    let app_state = AppState {
        trains: train_repo,
        bookings: booking_repo,
        revenue: revenue_repo,
        booking_service,
        changes,
        metrics: Metrics::new().expect("Failed to register metrics"),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
