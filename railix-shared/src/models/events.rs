use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tables whose writes are broadcast to dashboard observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangedTable {
    Trains,
    Bookings,
    Payments,
    Cancellations,
    Revenue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeOp {
    Insert,
    Update,
}

/// Row-granularity change notification carrying full before/after images.
///
/// This is an observation channel for derived views, not part of the core
/// logic's correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowChangeEvent {
    pub table: ChangedTable,
    pub op: ChangeOp,
    pub before: Option<serde_json::Value>,
    pub after: serde_json::Value,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmedEvent {
    pub pnr: String,
    pub train_id: Uuid,
    pub passenger_count: usize,
    pub total_amount: i64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCancelledEvent {
    pub pnr: String,
    pub refund_amount: i64,
    pub timestamp: i64,
}
