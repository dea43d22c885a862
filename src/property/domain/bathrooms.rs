//! Bathroom counts in half steps.

use super::ParseBathroomCountError;
use serde::{Deserialize, Serialize};

/// Number of bathrooms, where a half bath counts as `0.5`.
///
/// Stored as a count of halves so the value stays exact and comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BathroomCount(u32);

impl BathroomCount {
    /// Creates a count of full bathrooms.
    #[must_use]
    pub const fn whole(bathrooms: u32) -> Self {
        Self(bathrooms.saturating_mul(2))
    }

    /// Creates a count from a number of half steps, so `5` is `2.5`.
    #[must_use]
    pub const fn from_halves(halves: u32) -> Self {
        Self(halves)
    }

    /// Returns the number of half steps.
    #[must_use]
    pub const fn halves(self) -> u32 {
        self.0
    }

    /// Returns the count as a decimal number of bathrooms.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "halving an exact integer count is lossless in f64"
    )]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl TryFrom<f64> for BathroomCount {
    type Error = ParseBathroomCountError;

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the doubled value is checked to be a small non-negative integer first"
    )]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled = value * 2.0;
        if !doubled.is_finite()
            || doubled < 0.0
            || doubled.fract().abs() > f64::EPSILON
            || doubled > f64::from(u32::MAX)
        {
            return Err(ParseBathroomCountError(value));
        }
        Ok(Self(doubled as u32))
    }
}

impl From<BathroomCount> for f64 {
    fn from(count: BathroomCount) -> Self {
        count.value()
    }
}
