use crate::models::CancellationPlan;
use chrono::Utc;
use railix_core::booking::{Cancellation, CancellationStatus};
use railix_shared::Pnr;
use uuid::Uuid;

/// Flat cancellation fee: the refund is 90% of the amount paid, rounded to
/// the nearest paisa. No tiering by time to departure. Widened arithmetic so
/// the multiply cannot overflow for any `i64` amount.
pub fn refund_after_fee(amount_paid: i64) -> i64 {
    ((amount_paid as i128 * 9 + 5) / 10) as i64
}

/// Plans the cancellation write for one booking: the computed refund and a
/// single PROCESSED cancellation row.
pub fn plan_cancellation(pnr: &Pnr, amount_paid: i64) -> CancellationPlan {
    CancellationPlan {
        pnr: pnr.clone(),
        cancellation: Cancellation {
            id: Uuid::new_v4(),
            pnr: pnr.clone(),
            refund_amount: refund_after_fee(amount_paid),
            status: CancellationStatus::Processed,
            created_at: Utc::now(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_is_ninety_percent_rounded() {
        assert_eq!(refund_after_fee(1000), 900);
        assert_eq!(refund_after_fee(100_000), 90_000);
        // 0.9 * 115 = 103.5 rounds up.
        assert_eq!(refund_after_fee(115), 104);
        // 0.9 * 113 = 101.7 rounds up; 0.9 * 111 = 99.9 rounds to 100.
        assert_eq!(refund_after_fee(113), 102);
        assert_eq!(refund_after_fee(111), 100);
        assert_eq!(refund_after_fee(0), 0);
    }

    #[test]
    fn test_refund_of_extreme_amount_does_not_overflow() {
        assert_eq!(refund_after_fee(i64::MAX), (i64::MAX as i128 * 9 / 10) as i64);
    }

    #[test]
    fn test_plan_produces_exactly_one_processed_record() {
        let pnr = Pnr::generate();
        let plan = plan_cancellation(&pnr, 1000);
        assert_eq!(plan.cancellation.pnr, pnr);
        assert_eq!(plan.cancellation.refund_amount, 900);
        assert_eq!(plan.cancellation.status, CancellationStatus::Processed);
    }
}
