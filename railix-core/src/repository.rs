use crate::train::{Fare, NewTrain, Train};
use async_trait::async_trait;
use uuid::Uuid;

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for train and fare data access.
#[async_trait]
pub trait TrainRepository: Send + Sync {
    /// Substring match on origin/destination, exact match on travel date.
    /// Empty filters match everything.
    async fn search_trains(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
        date: Option<chrono::NaiveDate>,
    ) -> Result<Vec<Train>, RepoError>;

    async fn get_train(&self, id: Uuid) -> Result<Option<Train>, RepoError>;

    async fn list_fares(&self, train_id: Uuid) -> Result<Vec<Fare>, RepoError>;

    /// Creates the train plus one fare row per travel class at the fixed
    /// multipliers, atomically.
    async fn create_train(&self, train: &NewTrain) -> Result<Train, RepoError>;
}

/// Repository trait for the singleton revenue record.
#[async_trait]
pub trait RevenueRepository: Send + Sync {
    /// Seeds the revenue row with 0 if absent. Idempotent; runs at startup.
    async fn ensure_initialized(&self) -> Result<(), RepoError>;

    async fn total_revenue(&self) -> Result<i64, RepoError>;
}
