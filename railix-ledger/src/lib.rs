//! Seat-inventory and revenue consistency logic.
//!
//! Two bounded counters (seats per train, one running revenue total) and the
//! edge-triggered transition tables that drive them. All operations here are
//! total: out-of-bounds mutations clamp or no-op by policy, they never fail.

pub mod inventory;
pub mod revenue;
pub mod transitions;

pub use inventory::SeatCount;
pub use revenue::{Reversal, RevenueBalance};
pub use transitions::{RevenueEffect, SeatEffect};
