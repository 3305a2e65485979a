use crate::models::{BookingGroupPlan, BookingView, CancellationPlan};
use async_trait::async_trait;
use railix_core::booking::{Booking, Cancellation};
use railix_core::repository::RepoError;
use railix_shared::Pnr;

/// Result of applying a cancellation plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Applied,
    /// The Confirmed -> Cancelled edge had already fired; nothing was written.
    AlreadyCancelled,
}

/// Write-side repository for bookings.
///
/// Both mutating methods are atomic units: every row they write, including
/// the seat and revenue ledger effects, commits or rolls back together.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persists a planned booking group and applies one seat decrement per
    /// booking row plus the payment's revenue accrual. Returns the group's
    /// first PNR.
    async fn create_booking_group(&self, plan: &BookingGroupPlan) -> Result<Pnr, RepoError>;

    async fn find_booking(&self, pnr: &Pnr) -> Result<Option<Booking>, RepoError>;

    /// Flips the booking to CANCELLED, releases its seat, inserts the
    /// cancellation row and applies the guarded revenue reversal. The status
    /// flip is edge-checked inside the transaction, so a concurrent second
    /// cancel of the same PNR reports `AlreadyCancelled`.
    async fn cancel_booking(&self, plan: &CancellationPlan) -> Result<CancelOutcome, RepoError>;

    async fn list_bookings(&self) -> Result<Vec<BookingView>, RepoError>;

    async fn list_cancellations(&self) -> Result<Vec<Cancellation>, RepoError>;
}
