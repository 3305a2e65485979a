use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Travel classes, each with a fixed price multiplier against the train's
/// base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelClass {
    #[serde(rename = "AC First Class")]
    AcFirstClass,
    #[serde(rename = "AC 2 Tier")]
    Ac2Tier,
    #[serde(rename = "AC 3 Tier")]
    Ac3Tier,
    #[serde(rename = "Sleeper")]
    Sleeper,
}

impl TravelClass {
    pub const ALL: [TravelClass; 4] = [
        TravelClass::AcFirstClass,
        TravelClass::Ac2Tier,
        TravelClass::Ac3Tier,
        TravelClass::Sleeper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::AcFirstClass => "AC First Class",
            TravelClass::Ac2Tier => "AC 2 Tier",
            TravelClass::Ac3Tier => "AC 3 Tier",
            TravelClass::Sleeper => "Sleeper",
        }
    }

    pub fn parse(s: &str) -> Option<TravelClass> {
        TravelClass::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Fare for this class derived from the train's base price.
    /// Multipliers are tenths {10, 8, 6, 4}/10 so integer paise stay exact.
    pub fn fare_from_base(&self, base_price: i64) -> i64 {
        let tenths: i64 = match self {
            TravelClass::AcFirstClass => 10,
            TravelClass::Ac2Tier => 8,
            TravelClass::Ac3Tier => 6,
            TravelClass::Sleeper => 4,
        };
        base_price * tenths / 10
    }

    /// Coach letter prefix used when assigning seat numbers.
    pub fn coach_prefix(&self) -> char {
        match self {
            TravelClass::AcFirstClass => 'H',
            TravelClass::Ac2Tier => 'A',
            TravelClass::Ac3Tier => 'B',
            TravelClass::Sleeper => 'S',
        }
    }
}

impl std::fmt::Display for TravelClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub id: Uuid,
    pub name: String,
    pub number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub travel_date: NaiveDate,
    /// Immutable after creation.
    pub total_seats: i64,
    /// Invariant: 0 <= available_seats <= total_seats.
    pub available_seats: i64,
    pub created_at: DateTime<Utc>,
}

/// Amount per (train, class). One row per pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fare {
    pub id: Uuid,
    pub train_id: Uuid,
    pub travel_class: TravelClass,
    /// Integer paise.
    pub amount: i64,
}

/// Fields accepted when an admin registers a new train.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrain {
    pub name: String,
    pub number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub travel_date: NaiveDate,
    pub total_seats: i64,
    /// Base price in paise; per-class fares are derived at fixed multipliers.
    pub base_price: i64,
}
