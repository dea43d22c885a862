//! Error types for job domain validation and parsing.

use super::JobId;
use thiserror::Error;

/// Errors returned while constructing or mutating job values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum JobDomainError {
    /// The expected duration is NaN or infinite.
    #[error("expected hours must be a finite number, got {0}")]
    NonFiniteExpectedHours(f64),

    /// Only jobs created from a calendar event can be archived as vanished.
    #[error("job {0} has no calendar event UID")]
    MissingCalendarEventUid(JobId),

    /// The payment intent identifier is empty after trimming.
    #[error("payment intent identifier must not be empty")]
    EmptyPaymentIntent,
}

/// Error returned while parsing a job status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseJobStatusError(pub String);

/// Error returned while parsing a payment status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown payment status: {0}")]
pub struct ParsePaymentStatusError(pub String);

/// Error returned while parsing a cancellation source from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown cancellation source: {0}")]
pub struct ParseCancellationSourceError(pub String);

/// Error returned while parsing an assignment role from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown assignment role: {0}")]
pub struct ParseAssignmentRoleError(pub String);
