pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod notify;
pub mod revenue_repo;
pub mod train_repo;

pub use booking_repo::PgBookingRepository;
pub use database::DbClient;
pub use notify::ChangeBroadcaster;
pub use revenue_repo::PgRevenueRepository;
pub use train_repo::PgTrainRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt row: {0}")]
    CorruptRow(String),
}
