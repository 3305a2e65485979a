use crate::StoreError;
use async_trait::async_trait;
use railix_core::repository::{RepoError, RevenueRepository};
use railix_ledger::transitions::RevenueEffect;
use railix_ledger::RevenueBalance;
use sqlx::{PgPool, Postgres, Transaction};

pub struct PgRevenueRepository {
    pool: PgPool,
}

impl PgRevenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Applies a revenue effect to the singleton row under a row lock. Accruals
/// always apply; reversals larger than the balance are skipped by the ledger
/// guard. Returns the before/after totals for change notification, or `None`
/// when the effect was `RevenueEffect::None`.
///
/// The row is seeded by migration and [`PgRevenueRepository::ensure_initialized`];
/// nothing here creates it lazily.
pub(crate) async fn apply_revenue(
    tx: &mut Transaction<'_, Postgres>,
    effect: RevenueEffect,
) -> Result<Option<(i64, i64)>, StoreError> {
    if effect == RevenueEffect::None {
        return Ok(None);
    }

    let (current,): (i64,) =
        sqlx::query_as("SELECT total_revenue FROM revenue WHERE id = 1 FOR UPDATE")
            .fetch_one(&mut **tx)
            .await?;

    let mut balance = RevenueBalance(current);
    match effect {
        RevenueEffect::Accrue(amount) => {
            balance.accrue(amount);
        }
        RevenueEffect::Reverse(amount) => {
            balance.reverse(amount);
        }
        RevenueEffect::None => unreachable!(),
    }

    sqlx::query("UPDATE revenue SET total_revenue = $1, updated_at = NOW() WHERE id = 1")
        .bind(balance.total())
        .execute(&mut **tx)
        .await?;

    Ok(Some((current, balance.total())))
}

#[async_trait]
impl RevenueRepository for PgRevenueRepository {
    async fn ensure_initialized(&self) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO revenue (id, total_revenue) VALUES (1, 0) ON CONFLICT (id) DO NOTHING")
            .execute(&self.pool)
            .await
            .map_err(StoreError::Database)?;
        Ok(())
    }

    async fn total_revenue(&self) -> Result<i64, RepoError> {
        let (total,): (i64,) = sqlx::query_as("SELECT total_revenue FROM revenue WHERE id = 1")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::Database)?;
        Ok(total)
    }
}
