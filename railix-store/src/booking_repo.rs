use crate::notify::ChangeBroadcaster;
use crate::revenue_repo::apply_revenue;
use crate::train_repo::adjust_seats;
use crate::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use railix_booking::{BookingGroupPlan, BookingRepository, BookingView, CancelOutcome, CancellationPlan};
use railix_core::booking::{
    Booking, BookingStatus, Cancellation, CancellationStatus, PaymentStatus,
};
use railix_core::repository::RepoError;
use railix_core::train::{Train, TravelClass};
use railix_ledger::transitions::{
    cancellation_revenue_effect, payment_revenue_effect, seat_effect,
};
use railix_shared::models::events::{ChangeOp, ChangedTable};
use railix_shared::{Masked, Pnr};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgBookingRepository {
    pool: PgPool,
    changes: ChangeBroadcaster,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool, changes: ChangeBroadcaster) -> Self {
        Self { pool, changes }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    pnr: String,
    passenger_id: Uuid,
    train_id: Uuid,
    fare_id: Uuid,
    travel_class: String,
    seat_no: String,
    booking_status: String,
    payment_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, StoreError> {
        Ok(Booking {
            pnr: Pnr::from(row.pnr),
            passenger_id: row.passenger_id,
            train_id: row.train_id,
            fare_id: row.fare_id,
            travel_class: TravelClass::parse(&row.travel_class).ok_or_else(|| {
                StoreError::CorruptRow(format!("unknown travel class {:?}", row.travel_class))
            })?,
            seat_no: row.seat_no,
            booking_status: BookingStatus::parse(&row.booking_status).ok_or_else(|| {
                StoreError::CorruptRow(format!("unknown booking status {:?}", row.booking_status))
            })?,
            payment_status: PaymentStatus::parse(&row.payment_status).ok_or_else(|| {
                StoreError::CorruptRow(format!("unknown payment status {:?}", row.payment_status))
            })?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BookingViewRow {
    pnr: String,
    passenger_name: String,
    passenger_contact: String,
    train_name: String,
    train_number: String,
    travel_date: NaiveDate,
    travel_class: String,
    seat_no: String,
    booking_status: String,
    payment_status: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CancellationRow {
    id: Uuid,
    pnr: String,
    refund_amount: i64,
    status: String,
    created_at: DateTime<Utc>,
}

const SELECT_BOOKING: &str = "SELECT pnr, passenger_id, train_id, fare_id, travel_class, \
     seat_no, booking_status, payment_status, created_at, updated_at FROM bookings";

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create_booking_group(&self, plan: &BookingGroupPlan) -> Result<Pnr, RepoError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::Database)?;
        let mut train_images: Vec<(Train, Train)> = Vec::new();

        for passenger in &plan.passengers {
            sqlx::query(
                "INSERT INTO passengers (id, name, age, gender, contact, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(passenger.id)
            .bind(&passenger.name)
            .bind(passenger.age)
            .bind(passenger.gender.as_str())
            .bind(&passenger.contact)
            .bind(passenger.created_at)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::Database)?;
        }

        for booking in &plan.bookings {
            sqlx::query(
                "INSERT INTO bookings (pnr, passenger_id, train_id, fare_id, travel_class, \
                 seat_no, booking_status, payment_status, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(booking.pnr.as_str())
            .bind(booking.passenger_id)
            .bind(booking.train_id)
            .bind(booking.fare_id)
            .bind(booking.travel_class.as_str())
            .bind(&booking.seat_no)
            .bind(booking.booking_status.as_str())
            .bind(booking.payment_status.as_str())
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::Database)?;

            // Insert edge: a row created as Confirmed takes one seat.
            let effect = seat_effect(None, booking.booking_status);
            if let Some(images) = adjust_seats(&mut tx, booking.train_id, effect).await? {
                train_images.push(images);
            }
        }

        sqlx::query(
            "INSERT INTO payments (id, pnr, amount, method, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(plan.payment.id)
        .bind(plan.payment.pnr.as_str())
        .bind(plan.payment.amount)
        .bind(&plan.payment.method)
        .bind(plan.payment.status.as_str())
        .bind(plan.payment.created_at)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::Database)?;

        let effect = payment_revenue_effect(None, plan.payment.status, plan.payment.amount);
        let revenue_image = apply_revenue(&mut tx, effect).await?;

        tx.commit().await.map_err(StoreError::Database)?;

        for booking in &plan.bookings {
            self.changes.publish(
                ChangedTable::Bookings,
                ChangeOp::Insert,
                None,
                serde_json::to_value(booking).unwrap_or_default(),
            );
        }
        self.changes.publish(
            ChangedTable::Payments,
            ChangeOp::Insert,
            None,
            serde_json::to_value(&plan.payment).unwrap_or_default(),
        );
        publish_train_images(&self.changes, train_images);
        publish_revenue_image(&self.changes, revenue_image);

        Ok(plan.primary_pnr().clone())
    }

    async fn find_booking(&self, pnr: &Pnr) -> Result<Option<Booking>, RepoError> {
        let sql = format!("{SELECT_BOOKING} WHERE pnr = $1");
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(pnr.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::Database)?;

        row.map(Booking::try_from)
            .transpose()
            .map_err(RepoError::from)
    }

    async fn cancel_booking(&self, plan: &CancellationPlan) -> Result<CancelOutcome, RepoError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::Database)?;

        let sql = format!("{SELECT_BOOKING} WHERE pnr = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(plan.pnr.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(StoreError::Database)?
            .ok_or_else(|| StoreError::CorruptRow(format!("booking {} not found", plan.pnr)))?;
        let before = Booking::try_from(row)?;

        // The Confirmed -> Cancelled edge fires exactly once.
        if before.booking_status != BookingStatus::Confirmed {
            return Ok(CancelOutcome::AlreadyCancelled);
        }

        let updated_at = Utc::now();
        sqlx::query(
            "UPDATE bookings SET booking_status = $1, updated_at = $2 WHERE pnr = $3",
        )
        .bind(BookingStatus::Cancelled.as_str())
        .bind(updated_at)
        .bind(plan.pnr.as_str())
        .execute(&mut *tx)
        .await
        .map_err(StoreError::Database)?;

        let effect = seat_effect(Some(before.booking_status), BookingStatus::Cancelled);
        let train_image = adjust_seats(&mut tx, before.train_id, effect).await?;

        let cancellation = &plan.cancellation;
        sqlx::query(
            "INSERT INTO cancellations (id, pnr, refund_amount, status, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(cancellation.id)
        .bind(cancellation.pnr.as_str())
        .bind(cancellation.refund_amount)
        .bind(cancellation.status.as_str())
        .bind(cancellation.created_at)
        .execute(&mut *tx)
        .await
        .map_err(StoreError::Database)?;

        let effect = cancellation_revenue_effect(cancellation.status, cancellation.refund_amount);
        let revenue_image = apply_revenue(&mut tx, effect).await?;

        tx.commit().await.map_err(StoreError::Database)?;

        let mut after = before.clone();
        after.booking_status = BookingStatus::Cancelled;
        after.updated_at = updated_at;
        self.changes.publish(
            ChangedTable::Bookings,
            ChangeOp::Update,
            Some(serde_json::to_value(&before).unwrap_or_default()),
            serde_json::to_value(&after).unwrap_or_default(),
        );
        self.changes.publish(
            ChangedTable::Cancellations,
            ChangeOp::Insert,
            None,
            serde_json::to_value(cancellation).unwrap_or_default(),
        );
        publish_train_images(&self.changes, train_image.into_iter().collect());
        publish_revenue_image(&self.changes, revenue_image);

        Ok(CancelOutcome::Applied)
    }

    async fn list_bookings(&self) -> Result<Vec<BookingView>, RepoError> {
        let rows = sqlx::query_as::<_, BookingViewRow>(
            "SELECT b.pnr, p.name AS passenger_name, p.contact AS passenger_contact, \
             t.name AS train_name, t.number AS train_number, t.travel_date, \
             b.travel_class, b.seat_no, b.booking_status, b.payment_status, b.created_at \
             FROM bookings b \
             JOIN passengers p ON p.id = b.passenger_id \
             JOIN trains t ON t.id = b.train_id \
             ORDER BY b.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Database)?;

        rows.into_iter()
            .map(|row| {
                Ok(BookingView {
                    pnr: Pnr::from(row.pnr),
                    passenger_name: row.passenger_name,
                    passenger_contact: Masked(row.passenger_contact),
                    train_name: row.train_name,
                    train_number: row.train_number,
                    travel_date: row.travel_date,
                    travel_class: TravelClass::parse(&row.travel_class).ok_or_else(|| {
                        RepoError::from(StoreError::CorruptRow(format!(
                            "unknown travel class {:?}",
                            row.travel_class
                        )))
                    })?,
                    seat_no: row.seat_no,
                    booking_status: BookingStatus::parse(&row.booking_status).ok_or_else(
                        || {
                            RepoError::from(StoreError::CorruptRow(format!(
                                "unknown booking status {:?}",
                                row.booking_status
                            )))
                        },
                    )?,
                    payment_status: PaymentStatus::parse(&row.payment_status).ok_or_else(
                        || {
                            RepoError::from(StoreError::CorruptRow(format!(
                                "unknown payment status {:?}",
                                row.payment_status
                            )))
                        },
                    )?,
                    created_at: row.created_at,
                })
            })
            .collect()
    }

    async fn list_cancellations(&self) -> Result<Vec<Cancellation>, RepoError> {
        let rows = sqlx::query_as::<_, CancellationRow>(
            "SELECT id, pnr, refund_amount, status, created_at FROM cancellations \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Database)?;

        rows.into_iter()
            .map(|row| {
                Ok(Cancellation {
                    id: row.id,
                    pnr: Pnr::from(row.pnr),
                    refund_amount: row.refund_amount,
                    status: CancellationStatus::parse(&row.status).ok_or_else(|| {
                        RepoError::from(StoreError::CorruptRow(format!(
                            "unknown cancellation status {:?}",
                            row.status
                        )))
                    })?,
                    created_at: row.created_at,
                })
            })
            .collect()
    }
}

fn publish_train_images(changes: &ChangeBroadcaster, images: Vec<(Train, Train)>) {
    for (before, after) in images {
        changes.publish(
            ChangedTable::Trains,
            ChangeOp::Update,
            Some(serde_json::to_value(&before).unwrap_or_default()),
            serde_json::to_value(&after).unwrap_or_default(),
        );
    }
}

fn publish_revenue_image(changes: &ChangeBroadcaster, image: Option<(i64, i64)>) {
    if let Some((before, after)) = image {
        changes.publish(
            ChangedTable::Revenue,
            ChangeOp::Update,
            Some(json!({ "total_revenue": before })),
            json!({ "total_revenue": after }),
        );
    }
}
