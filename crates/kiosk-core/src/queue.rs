//! # Queue Numbers
//!
//! The ticket shown on the last screen, e.g. `B-482`.
//!
//! ```text
//!   letter  ─  three digits
//!   A..H       100..=999
//! ```
//!
//! Each number is drawn independently and uniformly. Two orders may get the
//! same number; the counter staff call both.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::{QUEUE_LETTERS, QUEUE_NUMBER_MAX, QUEUE_NUMBER_MIN};

/// A queue ticket identifier in the form `<A-H>-<100..999>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export)]
pub struct QueueNumber(String);

impl QueueNumber {
    /// Draws a fresh queue number.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::QueueNumber;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let ticket = QueueNumber::generate(&mut rng);
    /// assert_eq!(ticket.as_str().len(), 5);
    /// ```
    pub fn generate(rng: &mut impl Rng) -> Self {
        let letter = QUEUE_LETTERS[rng.gen_range(0..QUEUE_LETTERS.len())] as char;
        let number = rng.gen_range(QUEUE_NUMBER_MIN..=QUEUE_NUMBER_MAX);
        QueueNumber(format!("{}-{}", letter, number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The letter before the hyphen.
    pub fn letter(&self) -> char {
        self.0.as_bytes()[0] as char
    }

    /// The numeric part after the hyphen.
    pub fn number(&self) -> u16 {
        self.0[2..].parse().unwrap_or_default()
    }
}

impl fmt::Display for QueueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QueueNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidQueueNumber(s.to_string());

        let (letter, digits) = s.split_once('-').ok_or_else(invalid)?;

        if letter.len() != 1 || !QUEUE_LETTERS.contains(&letter.as_bytes()[0]) {
            return Err(invalid());
        }

        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let number: u16 = digits.parse().map_err(|_| invalid())?;
        if !(QUEUE_NUMBER_MIN..=QUEUE_NUMBER_MAX).contains(&number) {
            return Err(invalid());
        }

        Ok(QueueNumber(s.to_string()))
    }
}

impl TryFrom<String> for QueueNumber {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QueueNumber> for String {
    fn from(value: QueueNumber) -> Self {
        value.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
