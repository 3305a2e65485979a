use crate::train::TravelClass;
use chrono::{DateTime, Utc};
use railix_shared::Pnr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<BookingStatus> {
        match s {
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Successful,
    Pending,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Successful => "SUCCESSFUL",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentStatus> {
        match s {
            "SUCCESSFUL" => Some(PaymentStatus::Successful),
            "PENDING" => Some(PaymentStatus::Pending),
            "FAILED" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancellationStatus {
    Processed,
    Pending,
}

impl CancellationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CancellationStatus::Processed => "PROCESSED",
            CancellationStatus::Pending => "PENDING",
        }
    }

    pub fn parse(s: &str) -> Option<CancellationStatus> {
        match s {
            "PROCESSED" => Some(CancellationStatus::Processed),
            "PENDING" => Some(CancellationStatus::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }

    pub fn parse(s: &str) -> Option<Gender> {
        match s {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            "OTHER" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Created once per booking line; never deduplicated across bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

/// One seat on one train for one passenger, identified by its PNR.
///
/// Lifecycle: created CONFIRMED; may transition to CANCELLED exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub pnr: Pnr,
    pub passenger_id: Uuid,
    pub train_id: Uuid,
    pub fare_id: Uuid,
    pub travel_class: TravelClass,
    pub seat_no: String,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One payment per booking group, referencing the group's first PNR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub pnr: Pnr,
    /// Integer paise.
    pub amount: i64,
    pub method: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cancellation {
    pub id: Uuid,
    pub pnr: Pnr,
    /// Integer paise, after the cancellation fee.
    pub refund_amount: i64,
    pub status: CancellationStatus,
    pub created_at: DateTime<Utc>,
}

/// The singleton revenue record. Seeded at bootstrap, never created lazily.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub total_revenue: i64,
    pub updated_at: DateTime<Utc>,
}
