use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Passenger Name Record: the unique booking identifier.
///
/// Ten decimal digits, first digit non-zero, generated server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pnr(String);

impl Pnr {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut digits = String::with_capacity(10);
        digits.push(char::from(b'1' + rng.gen_range(0..9u8)));
        for _ in 0..9 {
            digits.push(char::from(b'0' + rng.gen_range(0..10u8)));
        }
        Pnr(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Pnr {
    fn from(s: String) -> Self {
        Pnr(s)
    }
}

impl fmt::Display for Pnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
