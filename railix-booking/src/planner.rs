use crate::models::{BookingGroupPlan, BookingRequest, PassengerDetails};
use crate::service::BookingError;
use chrono::Utc;
use rand::Rng;
use railix_core::booking::{Booking, BookingStatus, Passenger, Payment, PaymentStatus};
use railix_core::train::{Fare, Train};
use railix_shared::Pnr;
use std::collections::HashSet;
use uuid::Uuid;

/// Highest berth number per coach; seat numbers are `<coach><1..=72>`.
const SEATS_PER_COACH: i64 = 72;

/// Builds the complete row set for one booking group.
///
/// Fare resolution takes the exact (train, class) match and otherwise falls
/// back to the first fare row for the train. Seat numbers are random and
/// deduplicated within the group only; there is no global collision check.
/// The single payment row references the first passenger's PNR and is marked
/// SUCCESSFUL unconditionally (no gateway integration).
pub fn plan_booking_group(
    req: &BookingRequest,
    train: &Train,
    fares: &[Fare],
) -> Result<BookingGroupPlan, BookingError> {
    if req.passengers.is_empty() {
        return Err(BookingError::Validation(
            "at least one passenger is required".into(),
        ));
    }
    // One coach's worth of distinct seat numbers bounds the group size;
    // otherwise the seat dedup below could never terminate.
    if req.passengers.len() as i64 > SEATS_PER_COACH {
        return Err(BookingError::Validation(format!(
            "a booking group holds at most {} passengers",
            SEATS_PER_COACH
        )));
    }
    if req.total_amount <= 0 {
        return Err(BookingError::Validation(
            "total amount must be positive".into(),
        ));
    }

    let fare = resolve_fare(train, fares, req)?;
    let now = Utc::now();

    let passengers: Vec<Passenger> = req
        .passengers
        .iter()
        .map(|p: &PassengerDetails| Passenger {
            id: Uuid::new_v4(),
            name: p.name.clone(),
            age: p.age,
            gender: p.gender,
            contact: p.contact.clone(),
            created_at: now,
        })
        .collect();

    let mut taken_seats = HashSet::new();
    let mut taken_pnrs = HashSet::new();
    let bookings: Vec<Booking> = passengers
        .iter()
        .map(|passenger| Booking {
            pnr: fresh_pnr(&mut taken_pnrs),
            passenger_id: passenger.id,
            train_id: train.id,
            fare_id: fare.id,
            travel_class: req.travel_class,
            seat_no: fresh_seat(req, &mut taken_seats),
            booking_status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Successful,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let payment = Payment {
        id: Uuid::new_v4(),
        pnr: bookings[0].pnr.clone(),
        amount: req.total_amount,
        method: req.payment_method.clone(),
        status: PaymentStatus::Successful,
        created_at: now,
    };

    Ok(BookingGroupPlan {
        passengers,
        fare: fare.clone(),
        bookings,
        payment,
    })
}

fn resolve_fare<'a>(
    train: &Train,
    fares: &'a [Fare],
    req: &BookingRequest,
) -> Result<&'a Fare, BookingError> {
    if let Some(exact) = fares.iter().find(|f| f.travel_class == req.travel_class) {
        return Ok(exact);
    }
    match fares.first() {
        Some(fallback) => {
            tracing::warn!(
                train_id = %train.id,
                requested = %req.travel_class,
                resolved = %fallback.travel_class,
                "no fare for requested class, falling back to first fare row"
            );
            Ok(fallback)
        }
        None => Err(BookingError::NoFares(train.id)),
    }
}

fn fresh_pnr(taken: &mut HashSet<Pnr>) -> Pnr {
    loop {
        let pnr = Pnr::generate();
        if taken.insert(pnr.clone()) {
            return pnr;
        }
    }
}

fn fresh_seat(req: &BookingRequest, taken: &mut HashSet<String>) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let seat = format!(
            "{}{}",
            req.travel_class.coach_prefix(),
            rng.gen_range(1..=SEATS_PER_COACH)
        );
        if taken.insert(seat.clone()) {
            return seat;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railix_core::booking::Gender;
    use railix_core::train::TravelClass;

    fn sample_train() -> Train {
        let now = Utc::now();
        Train {
            id: Uuid::new_v4(),
            name: "Coastal Express".into(),
            number: "12841".into(),
            origin: "Howrah".into(),
            destination: "Chennai".into(),
            departure_time: now,
            arrival_time: now,
            travel_date: now.date_naive(),
            total_seats: 100,
            available_seats: 100,
            created_at: now,
        }
    }

    fn sample_fares(train: &Train) -> Vec<Fare> {
        TravelClass::ALL
            .iter()
            .map(|class| Fare {
                id: Uuid::new_v4(),
                train_id: train.id,
                travel_class: *class,
                amount: class.fare_from_base(100_000),
            })
            .collect()
    }

    fn request(train: &Train, passengers: usize) -> BookingRequest {
        BookingRequest {
            passengers: (0..passengers)
                .map(|i| PassengerDetails {
                    name: format!("Passenger {}", i + 1),
                    age: 30,
                    gender: Gender::Other,
                    contact: "9000000000".into(),
                })
                .collect(),
            train_id: train.id,
            travel_class: TravelClass::Ac2Tier,
            payment_method: "UPI".into(),
            total_amount: 160_000,
        }
    }

    #[test]
    fn test_two_passengers_share_one_fare_and_one_payment() {
        let train = sample_train();
        let fares = sample_fares(&train);
        let plan = plan_booking_group(&request(&train, 2), &train, &fares).unwrap();

        assert_eq!(plan.passengers.len(), 2);
        assert_eq!(plan.bookings.len(), 2);
        assert_eq!(plan.fare.travel_class, TravelClass::Ac2Tier);
        assert!(plan.bookings.iter().all(|b| b.fare_id == plan.fare.id));
        // Exactly one payment, referencing the first booking's PNR.
        assert_eq!(plan.payment.pnr, plan.bookings[0].pnr);
        assert_eq!(plan.payment.amount, 160_000);
        assert_eq!(plan.payment.status, PaymentStatus::Successful);
    }

    #[test]
    fn test_bookings_start_confirmed_with_distinct_pnrs_and_seats() {
        let train = sample_train();
        let fares = sample_fares(&train);
        let plan = plan_booking_group(&request(&train, 5), &train, &fares).unwrap();

        let pnrs: HashSet<_> = plan.bookings.iter().map(|b| b.pnr.clone()).collect();
        let seats: HashSet<_> = plan.bookings.iter().map(|b| b.seat_no.clone()).collect();
        assert_eq!(pnrs.len(), 5);
        assert_eq!(seats.len(), 5);
        assert!(plan
            .bookings
            .iter()
            .all(|b| b.booking_status == BookingStatus::Confirmed));
        assert!(plan.bookings.iter().all(|b| b.seat_no.starts_with('A')));
    }

    #[test]
    fn test_fare_falls_back_when_class_is_missing() {
        let train = sample_train();
        let only_sleeper = vec![Fare {
            id: Uuid::new_v4(),
            train_id: train.id,
            travel_class: TravelClass::Sleeper,
            amount: 40_000,
        }];
        let plan = plan_booking_group(&request(&train, 1), &train, &only_sleeper).unwrap();
        assert_eq!(plan.fare.travel_class, TravelClass::Sleeper);
    }

    #[test]
    fn test_train_without_fares_is_a_hard_failure() {
        let train = sample_train();
        let err = plan_booking_group(&request(&train, 1), &train, &[]).unwrap_err();
        assert!(matches!(err, BookingError::NoFares(_)));
    }

    #[test]
    fn test_group_larger_than_one_coach_is_rejected() {
        let train = sample_train();
        let fares = sample_fares(&train);
        let err = plan_booking_group(&request(&train, 73), &train, &fares).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn test_group_filling_a_whole_coach_still_plans() {
        let train = sample_train();
        let fares = sample_fares(&train);
        let plan = plan_booking_group(&request(&train, 72), &train, &fares).unwrap();

        let seats: HashSet<_> = plan.bookings.iter().map(|b| b.seat_no.clone()).collect();
        assert_eq!(seats.len(), 72);
    }

    #[test]
    fn test_empty_passenger_list_is_rejected_before_any_write() {
        let train = sample_train();
        let fares = sample_fares(&train);
        let err = plan_booking_group(&request(&train, 0), &train, &fares).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }
}
