//! Archive snapshots of jobs whose calendar event disappeared.

use super::{
    AddonsSnapshot, CancelledJobId, ExpectedHours, Job, JobDomainError, JobId, JobStatus,
    ParseCancellationSourceError, PaymentStatus,
};
use crate::calendar::domain::CalendarEventUid;
use crate::property::domain::{PropertyId, SubscriptionId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Reason recorded when a booking is no longer on the calendar.
pub const VANISHED_EVENT_REASON: &str = "Calendar event no longer exists";

/// What triggered an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationSource {
    /// Reconciliation found the event missing from the feed.
    AutoDetected,
    /// An operator cancelled the job.
    Manual,
}

impl CancellationSource {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoDetected => "auto_detected",
            Self::Manual => "manual",
        }
    }
}

impl TryFrom<&str> for CancellationSource {
    type Error = ParseCancellationSourceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto_detected" => Ok(Self::AutoDetected),
            "manual" => Ok(Self::Manual),
            _ => Err(ParseCancellationSourceError(value.to_owned())),
        }
    }
}

/// Immutable snapshot of a job at the moment it was cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelledJob {
    id: CancelledJobId,
    original_job_id: JobId,
    subscription_id: SubscriptionId,
    property_id: PropertyId,
    calendar_event_uid: CalendarEventUid,
    check_in_time: DateTime<Utc>,
    check_out_time: DateTime<Utc>,
    status: JobStatus,
    expected_hours: ExpectedHours,
    addons_snapshot: AddonsSnapshot,
    payment_intent_id: Option<String>,
    payment_status: PaymentStatus,
    payment_failed: bool,
    notes: Option<String>,
    original_created_at: DateTime<Utc>,
    original_updated_at: DateTime<Utc>,
    cancelled_at: DateTime<Utc>,
    cancellation_source: CancellationSource,
    cancellation_reason: String,
}

/// Parameter object for reconstructing a persisted archive entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedCancelledJobData {
    /// Persisted archive identifier.
    pub id: CancelledJobId,
    /// Persisted snapshot of the live job.
    pub job: Job,
    /// Persisted cancellation timestamp.
    pub cancelled_at: DateTime<Utc>,
    /// Persisted cancellation source.
    pub cancellation_source: CancellationSource,
    /// Persisted cancellation reason.
    pub cancellation_reason: String,
}

impl CancelledJob {
    /// Archives a job whose calendar event no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::MissingCalendarEventUid`] for jobs that were
    /// not created from a calendar.
    pub fn from_vanished(job: &Job, clock: &impl Clock) -> Result<Self, JobDomainError> {
        Self::snapshot(
            job,
            clock.utc(),
            CancellationSource::AutoDetected,
            VANISHED_EVENT_REASON.to_owned(),
        )
    }

    /// Reconstructs an archive entry from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::MissingCalendarEventUid`] when the stored
    /// snapshot lacks a calendar event UID.
    pub fn from_persisted(data: PersistedCancelledJobData) -> Result<Self, JobDomainError> {
        let mut archived = Self::snapshot(
            &data.job,
            data.cancelled_at,
            data.cancellation_source,
            data.cancellation_reason,
        )?;
        archived.id = data.id;
        Ok(archived)
    }

    fn snapshot(
        job: &Job,
        cancelled_at: DateTime<Utc>,
        cancellation_source: CancellationSource,
        cancellation_reason: String,
    ) -> Result<Self, JobDomainError> {
        let calendar_event_uid = job
            .calendar_event_uid()
            .cloned()
            .ok_or(JobDomainError::MissingCalendarEventUid(job.id()))?;
        Ok(Self {
            id: CancelledJobId::new(),
            original_job_id: job.id(),
            subscription_id: job.subscription_id(),
            property_id: job.property_id(),
            calendar_event_uid,
            check_in_time: job.check_in_time(),
            check_out_time: job.check_out_time(),
            status: job.status(),
            expected_hours: job.expected_hours(),
            addons_snapshot: job.addons_snapshot().clone(),
            payment_intent_id: job.payment_intent_id().map(str::to_owned),
            payment_status: job.payment_status(),
            payment_failed: job.payment_failed(),
            notes: job.notes().map(str::to_owned),
            original_created_at: job.created_at(),
            original_updated_at: job.updated_at(),
            cancelled_at,
            cancellation_source,
            cancellation_reason,
        })
    }

    /// Returns the archive identifier.
    #[must_use]
    pub const fn id(&self) -> CancelledJobId {
        self.id
    }

    /// Returns the identifier the job had while live.
    #[must_use]
    pub const fn original_job_id(&self) -> JobId {
        self.original_job_id
    }

    /// Returns the owning subscription.
    #[must_use]
    pub const fn subscription_id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// Returns the property.
    #[must_use]
    pub const fn property_id(&self) -> PropertyId {
        self.property_id
    }

    /// Returns the UID of the vanished calendar event.
    #[must_use]
    pub const fn calendar_event_uid(&self) -> &CalendarEventUid {
        &self.calendar_event_uid
    }

    /// Returns the archived earliest start.
    #[must_use]
    pub const fn check_in_time(&self) -> DateTime<Utc> {
        self.check_in_time
    }

    /// Returns the archived deadline.
    #[must_use]
    pub const fn check_out_time(&self) -> DateTime<Utc> {
        self.check_out_time
    }

    /// Returns the status the job had when archived.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the archived duration estimate.
    #[must_use]
    pub const fn expected_hours(&self) -> ExpectedHours {
        self.expected_hours
    }

    /// Returns the archived addon snapshot.
    #[must_use]
    pub const fn addons_snapshot(&self) -> &AddonsSnapshot {
        &self.addons_snapshot
    }

    /// Returns the archived payment intent identifier.
    #[must_use]
    pub fn payment_intent_id(&self) -> Option<&str> {
        self.payment_intent_id.as_deref()
    }

    /// Returns the archived payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Returns the archived payment failure flag.
    #[must_use]
    pub const fn payment_failed(&self) -> bool {
        self.payment_failed
    }

    /// Returns the archived notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns when the live job was created.
    #[must_use]
    pub const fn original_created_at(&self) -> DateTime<Utc> {
        self.original_created_at
    }

    /// Returns when the live job was last updated.
    #[must_use]
    pub const fn original_updated_at(&self) -> DateTime<Utc> {
        self.original_updated_at
    }

    /// Returns when the job was archived.
    #[must_use]
    pub const fn cancelled_at(&self) -> DateTime<Utc> {
        self.cancelled_at
    }

    /// Returns what triggered the cancellation.
    #[must_use]
    pub const fn cancellation_source(&self) -> CancellationSource {
        self.cancellation_source
    }

    /// Returns the recorded cancellation reason.
    #[must_use]
    pub fn cancellation_reason(&self) -> &str {
        &self.cancellation_reason
    }
}
