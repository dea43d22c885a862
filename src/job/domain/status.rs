//! Job and payment status enumerations.

use super::{ParseJobStatusError, ParsePaymentStatusError};
use serde::{Deserialize, Serialize};

/// Scheduling state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// No cleaner has taken the job yet.
    #[serde(rename = "unassigned")]
    Unassigned,
    /// A cleaner is assigned.
    #[serde(rename = "assigned")]
    Assigned,
    /// The clean has started.
    #[serde(rename = "in-progress")]
    InProgress,
    /// The clean is finished.
    #[serde(rename = "completed")]
    Completed,
    /// The job was cancelled by an operator.
    #[serde(rename = "canceled")]
    Canceled,
}

impl JobStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Assigned => "assigned",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = ParseJobStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unassigned" => Ok(Self::Unassigned),
            "assigned" => Ok(Self::Assigned),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(ParseJobStatusError(value.to_owned())),
        }
    }
}

/// Payment state owned by the payment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No payment has been attempted.
    Pending,
    /// Funds are held but not captured.
    Authorized,
    /// Funds are captured.
    Captured,
    /// Authorization failed.
    Failed,
    /// Authorization succeeded but capture failed.
    CaptureFailed,
}

impl PaymentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::Captured => "captured",
            Self::Failed => "failed",
            Self::CaptureFailed => "capture_failed",
        }
    }
}

impl TryFrom<&str> for PaymentStatus {
    type Error = ParsePaymentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "authorized" => Ok(Self::Authorized),
            "captured" => Ok(Self::Captured),
            "failed" => Ok(Self::Failed),
            "capture_failed" => Ok(Self::CaptureFailed),
            _ => Err(ParsePaymentStatusError(value.to_owned())),
        }
    }
}
