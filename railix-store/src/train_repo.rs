use crate::notify::ChangeBroadcaster;
use crate::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use railix_core::repository::{RepoError, TrainRepository};
use railix_core::train::{Fare, NewTrain, Train, TravelClass};
use railix_ledger::transitions::SeatEffect;
use railix_ledger::SeatCount;
use railix_shared::models::events::{ChangeOp, ChangedTable};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

pub struct PgTrainRepository {
    pool: PgPool,
    changes: ChangeBroadcaster,
}

impl PgTrainRepository {
    pub fn new(pool: PgPool, changes: ChangeBroadcaster) -> Self {
        Self { pool, changes }
    }
}

#[derive(sqlx::FromRow)]
struct TrainRow {
    id: Uuid,
    name: String,
    number: String,
    origin: String,
    destination: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    travel_date: NaiveDate,
    total_seats: i64,
    available_seats: i64,
    created_at: DateTime<Utc>,
}

impl From<TrainRow> for Train {
    fn from(row: TrainRow) -> Self {
        Train {
            id: row.id,
            name: row.name,
            number: row.number,
            origin: row.origin,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            travel_date: row.travel_date,
            total_seats: row.total_seats,
            available_seats: row.available_seats,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FareRow {
    id: Uuid,
    train_id: Uuid,
    travel_class: String,
    amount: i64,
}

impl TryFrom<FareRow> for Fare {
    type Error = StoreError;

    fn try_from(row: FareRow) -> Result<Self, StoreError> {
        let travel_class = TravelClass::parse(&row.travel_class).ok_or_else(|| {
            StoreError::CorruptRow(format!("unknown travel class {:?}", row.travel_class))
        })?;
        Ok(Fare {
            id: row.id,
            train_id: row.train_id,
            travel_class,
            amount: row.amount,
        })
    }
}

const SELECT_TRAIN: &str = "SELECT id, name, number, origin, destination, departure_time, \
     arrival_time, travel_date, total_seats, available_seats, created_at FROM trains";

/// `%term%` with LIKE metacharacters escaped, so a search term containing
/// `%` or `_` matches those characters literally.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Applies a seat effect to one train row under a row lock, clamping at the
/// bounds. The row lock is the system's only concurrency mechanism for seat
/// counts; nothing outside this function writes `available_seats`.
///
/// Returns the before/after images for change notification, or `None` when
/// the effect was `SeatEffect::None`.
pub(crate) async fn adjust_seats(
    tx: &mut Transaction<'_, Postgres>,
    train_id: Uuid,
    effect: SeatEffect,
) -> Result<Option<(Train, Train)>, StoreError> {
    if effect == SeatEffect::None {
        return Ok(None);
    }

    let sql = format!("{SELECT_TRAIN} WHERE id = $1 FOR UPDATE");
    let row = sqlx::query_as::<_, TrainRow>(&sql)
        .bind(train_id)
        .fetch_one(&mut **tx)
        .await?;
    let before = Train::from(row);

    let mut seats = SeatCount::new(before.available_seats, before.total_seats);
    match effect {
        SeatEffect::Take(n) => {
            seats.decrement(n);
        }
        SeatEffect::Release(n) => {
            seats.increment(n);
        }
        SeatEffect::None => unreachable!(),
    }

    sqlx::query("UPDATE trains SET available_seats = $1 WHERE id = $2")
        .bind(seats.available)
        .bind(train_id)
        .execute(&mut **tx)
        .await?;

    let mut after = before.clone();
    after.available_seats = seats.available;
    Ok(Some((before, after)))
}

#[async_trait]
impl TrainRepository for PgTrainRepository {
    async fn search_trains(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Train>, RepoError> {
        let sql = format!(
            "{SELECT_TRAIN} \
             WHERE ($1::text IS NULL OR origin ILIKE $1) \
               AND ($2::text IS NULL OR destination ILIKE $2) \
               AND ($3::date IS NULL OR travel_date = $3) \
             ORDER BY departure_time"
        );
        let rows = sqlx::query_as::<_, TrainRow>(&sql)
            .bind(origin.map(contains_pattern))
            .bind(destination.map(contains_pattern))
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Database)?;

        Ok(rows.into_iter().map(Train::from).collect())
    }

    async fn get_train(&self, id: Uuid) -> Result<Option<Train>, RepoError> {
        let sql = format!("{SELECT_TRAIN} WHERE id = $1");
        let row = sqlx::query_as::<_, TrainRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::Database)?;

        Ok(row.map(Train::from))
    }

    async fn list_fares(&self, train_id: Uuid) -> Result<Vec<Fare>, RepoError> {
        let rows = sqlx::query_as::<_, FareRow>(
            "SELECT id, train_id, travel_class, amount FROM fares \
             WHERE train_id = $1 ORDER BY amount DESC",
        )
        .bind(train_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Database)?;

        rows.into_iter()
            .map(|row| Fare::try_from(row).map_err(RepoError::from))
            .collect()
    }

    async fn create_train(&self, new: &NewTrain) -> Result<Train, RepoError> {
        let train = Train {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            number: new.number.clone(),
            origin: new.origin.clone(),
            destination: new.destination.clone(),
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            travel_date: new.travel_date,
            total_seats: new.total_seats,
            available_seats: new.total_seats,
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await.map_err(StoreError::Database)?;

        sqlx::query(
            "INSERT INTO trains (id, name, number, origin, destination, departure_time, \
             arrival_time, travel_date, total_seats, available_seats, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(train.id)
        .bind(&train.name)
        .bind(&train.number)
        .bind(&train.origin)
        .bind(&train.destination)
        .bind(train.departure_time)
        .bind(train.arrival_time)
        .bind(train.travel_date)
        .bind(train.total_seats)
        .bind(train.available_seats)
        .bind(train.created_at)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::Database)?;

        // One fare row per class at the fixed multipliers.
        for class in TravelClass::ALL {
            sqlx::query(
                "INSERT INTO fares (id, train_id, travel_class, amount) VALUES ($1, $2, $3, $4)",
            )
            .bind(Uuid::new_v4())
            .bind(train.id)
            .bind(class.as_str())
            .bind(class.fare_from_base(new.base_price))
            .execute(&mut *tx)
            .await
            .map_err(StoreError::Database)?;
        }

        tx.commit().await.map_err(StoreError::Database)?;

        self.changes.publish(
            ChangedTable::Trains,
            ChangeOp::Insert,
            None,
            serde_json::to_value(&train).unwrap_or_default(),
        );
        tracing::info!(train_id = %train.id, number = %train.number, "train created");

        Ok(train)
    }
}
