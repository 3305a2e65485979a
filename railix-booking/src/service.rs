use crate::models::BookingRequest;
use crate::planner::plan_booking_group;
use crate::refund::plan_cancellation;
use crate::repository::{BookingRepository, CancelOutcome};
use railix_core::repository::{RepoError, TrainRepository};
use railix_shared::Pnr;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Train not found: {0}")]
    TrainNotFound(Uuid),

    #[error("No fares configured for train {0}")]
    NoFares(Uuid),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Booking {0} is already cancelled")]
    AlreadyCancelled(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

/// The only multi-step workflow in the system: create passengers, resolve the
/// fare, create booking rows, create the one payment row. Planned up front
/// and executed by the repository as a single atomic unit, so a failure in
/// any step leaves no orphan rows.
pub struct BookingService {
    trains: Arc<dyn TrainRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(trains: Arc<dyn TrainRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { trains, bookings }
    }

    /// Books one seat per passenger and records the group's payment.
    /// Returns the first booking's PNR, the group's identifier.
    pub async fn create_booking(&self, req: BookingRequest) -> Result<Pnr, BookingError> {
        let train = self
            .trains
            .get_train(req.train_id)
            .await?
            .ok_or(BookingError::TrainNotFound(req.train_id))?;
        let fares = self.trains.list_fares(train.id).await?;

        let plan = plan_booking_group(&req, &train, &fares)?;
        let pnr = self.bookings.create_booking_group(&plan).await?;

        tracing::info!(
            pnr = %pnr,
            train_id = %train.id,
            passengers = plan.passengers.len(),
            amount = plan.payment.amount,
            "booking group confirmed"
        );
        Ok(pnr)
    }

    /// Cancels one booking: flips its status, releases the seat, records the
    /// refund. Returns the computed refund amount for the presentation layer.
    pub async fn cancel_booking(&self, pnr: &Pnr, amount_paid: i64) -> Result<i64, BookingError> {
        if amount_paid < 0 {
            return Err(BookingError::Validation(
                "amount paid cannot be negative".into(),
            ));
        }

        let booking = self
            .bookings
            .find_booking(pnr)
            .await?
            .ok_or_else(|| BookingError::BookingNotFound(pnr.to_string()))?;

        let plan = plan_cancellation(&booking.pnr, amount_paid);
        match self.bookings.cancel_booking(&plan).await? {
            CancelOutcome::Applied => {
                tracing::info!(
                    pnr = %pnr,
                    refund = plan.refund_amount(),
                    "booking cancelled"
                );
                Ok(plan.refund_amount())
            }
            CancelOutcome::AlreadyCancelled => {
                Err(BookingError::AlreadyCancelled(pnr.to_string()))
            }
        }
    }
}
