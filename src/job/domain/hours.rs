//! Estimated clean duration.

use super::JobDomainError;
use crate::property::domain::{LaundryType, Property};
use serde::{Deserialize, Serialize};

const BASE_HOURS: f64 = -0.585;
const HOURS_PER_BEDROOM: f64 = 0.95;
const HOURS_PER_BATHROOM: f64 = 0.62;
const HOURS_PER_AREA_UNIT: f64 = 0.1905;
const SQUARE_FEET_PER_AREA_UNIT: f64 = 250.0;
const HOT_TUB_HOURS: f64 = 0.333;

const OFF_SITE_LAUNDRY_SMALL: f64 = 1.25;
const OFF_SITE_LAUNDRY_MEDIUM: f64 = 1.75;
const OFF_SITE_LAUNDRY_LARGE: f64 = 2.25;

/// Job size tier derived from the bedroom count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSize {
    /// Up to two bedrooms.
    Small,
    /// Three or four bedrooms.
    Medium,
    /// Five or more bedrooms.
    Large,
}

impl JobSize {
    /// Classifies a property by bedroom count.
    #[must_use]
    pub const fn for_bedrooms(bedrooms: u32) -> Self {
        match bedrooms {
            0..=2 => Self::Small,
            3..=4 => Self::Medium,
            _ => Self::Large,
        }
    }
}

/// Estimated duration of a clean in hours, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedHours(f64);

impl ExpectedHours {
    /// Wraps a stored duration.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::NonFiniteExpectedHours`] for NaN or infinite
    /// values.
    pub fn new(hours: f64) -> Result<Self, JobDomainError> {
        if !hours.is_finite() {
            return Err(JobDomainError::NonFiniteExpectedHours(hours));
        }
        Ok(Self(hours))
    }

    /// Estimates the clean duration from property attributes.
    ///
    /// The result is not clamped, so a property with no rooms yields a small
    /// negative estimate.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the duration model is a linear regression over room counts"
    )]
    pub fn estimate(property: &Property) -> Self {
        let mut hours = BASE_HOURS
            + HOURS_PER_BEDROOM * f64::from(property.bedrooms())
            + HOURS_PER_BATHROOM * property.bathrooms().value();

        if let Some(square_feet) = property.square_feet() {
            hours += HOURS_PER_AREA_UNIT * (f64::from(square_feet) / SQUARE_FEET_PER_AREA_UNIT);
        }

        if property.laundry_type() == LaundryType::OffSite {
            hours += match JobSize::for_bedrooms(property.bedrooms()) {
                JobSize::Small => OFF_SITE_LAUNDRY_SMALL,
                JobSize::Medium => OFF_SITE_LAUNDRY_MEDIUM,
                JobSize::Large => OFF_SITE_LAUNDRY_LARGE,
            };
        }

        if property.hot_tub_service_enabled() {
            hours += HOT_TUB_HOURS;
        }

        Self((hours * 100.0).round() / 100.0)
    }

    /// Returns the duration in hours.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}
