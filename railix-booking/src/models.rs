use chrono::{DateTime, NaiveDate, Utc};
use railix_core::booking::{Booking, Cancellation, Gender, Passenger, Payment};
use railix_core::train::{Fare, TravelClass};
use railix_shared::{Masked, Pnr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One passenger line of a booking request.
#[derive(Debug, Clone, Deserialize)]
pub struct PassengerDetails {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub contact: String,
}

/// Input to the booking orchestrator. `total_amount` is precomputed by the
/// caller, as the presentation layer does.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub passengers: Vec<PassengerDetails>,
    pub train_id: Uuid,
    pub travel_class: TravelClass,
    pub payment_method: String,
    /// Integer paise.
    pub total_amount: i64,
}

/// Everything one booking writes, planned up front and persisted as a single
/// atomic unit: the rows for step 1 (passengers), 2 (resolved fare),
/// 3 (bookings) and 4 (the one payment).
#[derive(Debug, Clone)]
pub struct BookingGroupPlan {
    pub passengers: Vec<Passenger>,
    pub fare: Fare,
    pub bookings: Vec<Booking>,
    pub payment: Payment,
}

impl BookingGroupPlan {
    /// The group's identifier: the first booking's PNR.
    pub fn primary_pnr(&self) -> &Pnr {
        &self.bookings[0].pnr
    }
}

/// The cancellation write, planned up front: status flip plus one PROCESSED
/// cancellation row carrying the computed refund.
#[derive(Debug, Clone)]
pub struct CancellationPlan {
    pub pnr: Pnr,
    pub cancellation: Cancellation,
}

impl CancellationPlan {
    pub fn refund_amount(&self) -> i64 {
        self.cancellation.refund_amount
    }
}

/// Booking row joined with its passenger and train, for list views.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub pnr: Pnr,
    pub passenger_name: String,
    pub passenger_contact: Masked<String>,
    pub train_name: String,
    pub train_number: String,
    pub travel_date: NaiveDate,
    pub travel_class: TravelClass,
    pub seat_no: String,
    pub booking_status: railix_core::booking::BookingStatus,
    pub payment_status: railix_core::booking::PaymentStatus,
    pub created_at: DateTime<Utc>,
}
