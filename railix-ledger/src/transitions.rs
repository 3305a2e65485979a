use railix_core::booking::{BookingStatus, CancellationStatus, PaymentStatus};

/// Inventory effect of one booking-row write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatEffect {
    /// Decrement available seats by this many.
    Take(i64),
    /// Increment available seats by this many.
    Release(i64),
    None,
}

/// Revenue effect of one payment or cancellation write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueEffect {
    Accrue(i64),
    Reverse(i64),
    None,
}

/// Seat effect for a booking-row write.
///
/// `prev` is `None` on insert. The rules fire on status *edges* only: a row
/// rewritten with its status unchanged (say an unrelated field update) has no
/// inventory effect, no matter what the status value is.
pub fn seat_effect(prev: Option<BookingStatus>, next: BookingStatus) -> SeatEffect {
    match (prev, next) {
        // Created as Confirmed, or re-entered Confirmed from another status.
        (None, BookingStatus::Confirmed) => SeatEffect::Take(1),
        (Some(p), BookingStatus::Confirmed) if p != BookingStatus::Confirmed => SeatEffect::Take(1),
        // Left Confirmed for Cancelled.
        (Some(BookingStatus::Confirmed), BookingStatus::Cancelled) => SeatEffect::Release(1),
        _ => SeatEffect::None,
    }
}

/// Revenue effect for a payment-row write. Same edge discipline: only a
/// change into or out of SUCCESSFUL moves the balance.
pub fn payment_revenue_effect(
    prev: Option<PaymentStatus>,
    next: PaymentStatus,
    amount: i64,
) -> RevenueEffect {
    let was_successful = prev == Some(PaymentStatus::Successful);
    let is_successful = next == PaymentStatus::Successful;
    match (was_successful, is_successful) {
        (false, true) => RevenueEffect::Accrue(amount),
        (true, false) => RevenueEffect::Reverse(amount),
        _ => RevenueEffect::None,
    }
}

/// Revenue effect for a cancellation insert.
pub fn cancellation_revenue_effect(
    status: CancellationStatus,
    refund_amount: i64,
) -> RevenueEffect {
    match status {
        CancellationStatus::Processed => RevenueEffect::Reverse(refund_amount),
        CancellationStatus::Pending => RevenueEffect::None,
    }
}
