use crate::models::{BookingGroupPlan, BookingView, CancellationPlan};
use crate::repository::{BookingRepository, CancelOutcome};
use async_trait::async_trait;
use chrono::Utc;
use railix_core::booking::{Booking, BookingStatus, Cancellation, Passenger, Payment};
use railix_core::repository::{RepoError, RevenueRepository, TrainRepository};
use railix_core::train::{Fare, NewTrain, Train, TravelClass};
use railix_ledger::transitions::{
    cancellation_revenue_effect, payment_revenue_effect, seat_effect, RevenueEffect, SeatEffect,
};
use railix_ledger::{RevenueBalance, SeatCount};
use railix_shared::Pnr;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct State {
    trains: HashMap<Uuid, Train>,
    fares: HashMap<Uuid, Vec<Fare>>,
    passengers: HashMap<Uuid, Passenger>,
    bookings: Vec<Booking>,
    payments: Vec<Payment>,
    cancellations: Vec<Cancellation>,
    revenue: RevenueBalance,
}

/// In-memory implementation of all three repositories, applying the same
/// ledger effects the Postgres store applies. Used by service-level tests.
#[derive(Default)]
pub struct InMemoryRailway {
    state: Mutex<State>,
}

impl InMemoryRailway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available_seats(&self, train_id: Uuid) -> i64 {
        self.state.lock().unwrap().trains[&train_id].available_seats
    }

    pub fn revenue_total(&self) -> i64 {
        self.state.lock().unwrap().revenue.total()
    }

    pub fn list_bookings_sync(&self) -> Vec<BookingView> {
        let state = self.state.lock().unwrap();
        state.bookings.iter().map(|b| view_of(&state, b)).collect()
    }

    pub fn list_cancellations_sync(&self) -> Vec<Cancellation> {
        self.state.lock().unwrap().cancellations.clone()
    }
}

fn view_of(state: &State, booking: &Booking) -> BookingView {
    let passenger = &state.passengers[&booking.passenger_id];
    let train = &state.trains[&booking.train_id];
    BookingView {
        pnr: booking.pnr.clone(),
        passenger_name: passenger.name.clone(),
        passenger_contact: railix_shared::Masked(passenger.contact.clone()),
        train_name: train.name.clone(),
        train_number: train.number.clone(),
        travel_date: train.travel_date,
        travel_class: booking.travel_class,
        seat_no: booking.seat_no.clone(),
        booking_status: booking.booking_status,
        payment_status: booking.payment_status,
        created_at: booking.created_at,
    }
}

fn apply_seat_effect(train: &mut Train, effect: SeatEffect) {
    let mut seats = SeatCount::new(train.available_seats, train.total_seats);
    match effect {
        SeatEffect::Take(n) => {
            seats.decrement(n);
        }
        SeatEffect::Release(n) => {
            seats.increment(n);
        }
        SeatEffect::None => {}
    }
    train.available_seats = seats.available;
}

fn apply_revenue_effect(revenue: &mut RevenueBalance, effect: RevenueEffect) {
    match effect {
        RevenueEffect::Accrue(amount) => {
            revenue.accrue(amount);
        }
        RevenueEffect::Reverse(amount) => {
            revenue.reverse(amount);
        }
        RevenueEffect::None => {}
    }
}

#[async_trait]
impl TrainRepository for InMemoryRailway {
    async fn search_trains(
        &self,
        origin: Option<&str>,
        destination: Option<&str>,
        date: Option<chrono::NaiveDate>,
    ) -> Result<Vec<Train>, RepoError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .trains
            .values()
            .filter(|t| {
                origin.map_or(true, |o| t.origin.to_lowercase().contains(&o.to_lowercase()))
                    && destination.map_or(true, |d| {
                        t.destination.to_lowercase().contains(&d.to_lowercase())
                    })
                    && date.map_or(true, |d| t.travel_date == d)
            })
            .cloned()
            .collect())
    }

    async fn get_train(&self, id: Uuid) -> Result<Option<Train>, RepoError> {
        Ok(self.state.lock().unwrap().trains.get(&id).cloned())
    }

    async fn list_fares(&self, train_id: Uuid) -> Result<Vec<Fare>, RepoError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .fares
            .get(&train_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_train(&self, new: &NewTrain) -> Result<Train, RepoError> {
        let mut state = self.state.lock().unwrap();
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
        let fares = TravelClass::ALL
            .iter()
            .map(|class| Fare {
                id: Uuid::new_v4(),
                train_id: train.id,
                travel_class: *class,
                amount: class.fare_from_base(new.base_price),
            })
            .collect();
        state.fares.insert(train.id, fares);
        state.trains.insert(train.id, train.clone());
        Ok(train)
    }
}

#[async_trait]
impl BookingRepository for InMemoryRailway {
    async fn create_booking_group(&self, plan: &BookingGroupPlan) -> Result<Pnr, RepoError> {
        let mut state = self.state.lock().unwrap();

        for passenger in &plan.passengers {
            state.passengers.insert(passenger.id, passenger.clone());
        }
        for booking in &plan.bookings {
            let effect = seat_effect(None, booking.booking_status);
            let train = state
                .trains
                .get_mut(&booking.train_id)
                .ok_or("train disappeared mid-booking")?;
            apply_seat_effect(train, effect);
            state.bookings.push(booking.clone());
        }

        let effect = payment_revenue_effect(None, plan.payment.status, plan.payment.amount);
        apply_revenue_effect(&mut state.revenue, effect);
        state.payments.push(plan.payment.clone());

        Ok(plan.primary_pnr().clone())
    }

    async fn find_booking(&self, pnr: &Pnr) -> Result<Option<Booking>, RepoError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .bookings
            .iter()
            .find(|b| &b.pnr == pnr)
            .cloned())
    }

    async fn cancel_booking(&self, plan: &CancellationPlan) -> Result<CancelOutcome, RepoError> {
        let mut state = self.state.lock().unwrap();

        let Some(idx) = state.bookings.iter().position(|b| b.pnr == plan.pnr) else {
            return Err(format!("booking {} not found", plan.pnr).into());
        };
        let prev = state.bookings[idx].booking_status;
        if prev != BookingStatus::Confirmed {
            return Ok(CancelOutcome::AlreadyCancelled);
        }

        state.bookings[idx].booking_status = BookingStatus::Cancelled;
        state.bookings[idx].updated_at = Utc::now();
        let train_id = state.bookings[idx].train_id;

        let effect = seat_effect(Some(prev), BookingStatus::Cancelled);
        let train = state
            .trains
            .get_mut(&train_id)
            .ok_or("train disappeared mid-cancel")?;
        apply_seat_effect(train, effect);

        let effect = cancellation_revenue_effect(
            plan.cancellation.status,
            plan.cancellation.refund_amount,
        );
        apply_revenue_effect(&mut state.revenue, effect);
        state.cancellations.push(plan.cancellation.clone());

        Ok(CancelOutcome::Applied)
    }

    async fn list_bookings(&self) -> Result<Vec<BookingView>, RepoError> {
        Ok(self.list_bookings_sync())
    }

    async fn list_cancellations(&self) -> Result<Vec<Cancellation>, RepoError> {
        Ok(self.list_cancellations_sync())
    }
}

#[async_trait]
impl RevenueRepository for InMemoryRailway {
    async fn ensure_initialized(&self) -> Result<(), RepoError> {
        // The balance starts at zero; the explicit bootstrap is a no-op here.
        Ok(())
    }

    async fn total_revenue(&self) -> Result<i64, RepoError> {
        Ok(self.revenue_total())
    }
}
