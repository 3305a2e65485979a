use serde::{Deserialize, Serialize};

/// Outcome of a revenue reversal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reversal {
    Applied { new_balance: i64 },
    /// The reversal exceeded the current balance and was skipped.
    /// A guard against double-reversal, not an error.
    Skipped { balance: i64 },
}

/// The running revenue total.
///
/// Accruals always apply; reversals are guarded so the balance can never go
/// negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueBalance(pub i64);

impl RevenueBalance {
    pub fn accrue(&mut self, amount: i64) -> i64 {
        self.0 += amount;
        self.0
    }

    pub fn reverse(&mut self, amount: i64) -> Reversal {
        if amount > self.0 {
            tracing::warn!(
                balance = self.0,
                amount,
                "revenue reversal exceeds balance, skipped"
            );
            return Reversal::Skipped { balance: self.0 };
        }
        self.0 -= amount;
        Reversal::Applied { new_balance: self.0 }
    }

    pub fn total(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accrue_then_reverse() {
        // First successful payment of 1000, second of 500, reverse the first.
        let mut revenue = RevenueBalance(0);
        assert_eq!(revenue.accrue(1000), 1000);
        assert_eq!(revenue.accrue(500), 1500);
        assert_eq!(revenue.reverse(1000), Reversal::Applied { new_balance: 500 });
    }

    #[test]
    fn test_reversal_larger_than_balance_is_a_noop() {
        let mut revenue = RevenueBalance(300);
        assert_eq!(revenue.reverse(500), Reversal::Skipped { balance: 300 });
        assert_eq!(revenue.total(), 300);
    }

    #[test]
    fn test_reversal_never_drives_balance_negative() {
        let mut revenue = RevenueBalance(0);
        for amount in [1, 100, i64::MAX] {
            revenue.reverse(amount);
            assert!(revenue.total() >= 0);
        }
    }

    #[test]
    fn test_reversal_of_full_balance_reaches_zero() {
        let mut revenue = RevenueBalance(250);
        assert_eq!(revenue.reverse(250), Reversal::Applied { new_balance: 0 });
    }
}
