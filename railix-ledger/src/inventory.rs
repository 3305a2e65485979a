use serde::{Deserialize, Serialize};

/// Seat counters for one train row.
///
/// The store reads these under a row lock, mutates them here, and writes the
/// result back; nothing else writes `available`. Both mutations clamp at the
/// boundary instead of rejecting: a caller that needs to distinguish "fully
/// applied" from "clamped" compares against [`SeatCount::would_clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCount {
    pub available: i64,
    pub total: i64,
}

impl SeatCount {
    pub fn new(available: i64, total: i64) -> Self {
        Self { available, total }
    }

    /// Subtracts `n` seats; clamps to 0 when fewer than `n` remain.
    /// Returns the new available count.
    pub fn decrement(&mut self, n: i64) -> i64 {
        self.available = if self.available >= n {
            self.available - n
        } else {
            tracing::debug!(
                available = self.available,
                requested = n,
                "seat decrement clamped to 0"
            );
            0
        };
        self.available
    }

    /// Adds `n` seats; clamps to `total`. Returns the new available count.
    pub fn increment(&mut self, n: i64) -> i64 {
        self.available = if self.available + n <= self.total {
            self.available + n
        } else {
            tracing::debug!(
                available = self.available,
                requested = n,
                total = self.total,
                "seat increment clamped to total"
            );
            self.total
        };
        self.available
    }

    /// Whether a decrement of `n` would clamp rather than fully apply.
    pub fn would_clamp(&self, n: i64) -> bool {
        self.available < n
    }

    /// `0 <= available <= total`, for debug assertions and tests.
    pub fn in_bounds(&self) -> bool {
        0 <= self.available && self.available <= self.total
    }
}
