//! Error types for parsing property and subscription values from storage.

use thiserror::Error;

/// Error returned while parsing a laundry service type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown laundry type: {0}")]
pub struct ParseLaundryTypeError(pub String);

/// Error returned while parsing a subscription status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown subscription status: {0}")]
pub struct ParseSubscriptionStatusError(pub String);

/// Error returned for a bathroom count that is not a non-negative half step.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("invalid bathroom count: {0}")]
pub struct ParseBathroomCountError(pub f64);
