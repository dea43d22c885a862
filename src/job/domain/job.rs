//! Scheduled cleaning jobs and the drafts they are created from.

use super::{AddonsSnapshot, ExpectedHours, JobDomainError, JobId, JobStatus, PaymentStatus};
use crate::calendar::domain::CalendarEventUid;
use crate::property::domain::{PropertyId, SubscriptionId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A job computed from one calendar event, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    /// Owning subscription.
    pub subscription_id: SubscriptionId,
    /// Property to clean.
    pub property_id: PropertyId,
    /// UID of the booking that produced the job.
    pub calendar_event_uid: CalendarEventUid,
    /// Earliest time the clean may start (guest departure).
    pub check_in_time: DateTime<Utc>,
    /// Time the clean must be finished by (next guest arrival).
    pub check_out_time: DateTime<Utc>,
    /// Estimated clean duration.
    pub expected_hours: ExpectedHours,
    /// Service options frozen at sync time.
    pub addons_snapshot: AddonsSnapshot,
}

/// One scheduled cleaning.
///
/// `check_out_time` is the cleaning deadline, not the guest's checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    subscription_id: SubscriptionId,
    property_id: PropertyId,
    calendar_event_uid: Option<CalendarEventUid>,
    check_in_time: DateTime<Utc>,
    check_out_time: DateTime<Utc>,
    status: JobStatus,
    expected_hours: ExpectedHours,
    addons_snapshot: AddonsSnapshot,
    payment_intent_id: Option<String>,
    payment_status: PaymentStatus,
    payment_failed: bool,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted job.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedJobData {
    /// Persisted job identifier.
    pub id: JobId,
    /// Persisted owning subscription.
    pub subscription_id: SubscriptionId,
    /// Persisted property.
    pub property_id: PropertyId,
    /// Persisted calendar event UID, absent for manual jobs.
    pub calendar_event_uid: Option<CalendarEventUid>,
    /// Persisted earliest start.
    pub check_in_time: DateTime<Utc>,
    /// Persisted deadline.
    pub check_out_time: DateTime<Utc>,
    /// Persisted scheduling status.
    pub status: JobStatus,
    /// Persisted duration estimate.
    pub expected_hours: ExpectedHours,
    /// Persisted addon snapshot.
    pub addons_snapshot: AddonsSnapshot,
    /// Persisted payment intent identifier.
    pub payment_intent_id: Option<String>,
    /// Persisted payment status.
    pub payment_status: PaymentStatus,
    /// Persisted payment failure flag.
    pub payment_failed: bool,
    /// Persisted operator notes.
    pub notes: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates an unassigned job from a draft.
    #[must_use]
    pub fn from_draft(draft: JobDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: JobId::new(),
            subscription_id: draft.subscription_id,
            property_id: draft.property_id,
            calendar_event_uid: Some(draft.calendar_event_uid),
            check_in_time: draft.check_in_time,
            check_out_time: draft.check_out_time,
            status: JobStatus::Unassigned,
            expected_hours: draft.expected_hours,
            addons_snapshot: draft.addons_snapshot,
            payment_intent_id: None,
            payment_status: PaymentStatus::Pending,
            payment_failed: false,
            notes: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a job from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedJobData) -> Self {
        Self {
            id: data.id,
            subscription_id: data.subscription_id,
            property_id: data.property_id,
            calendar_event_uid: data.calendar_event_uid,
            check_in_time: data.check_in_time,
            check_out_time: data.check_out_time,
            status: data.status,
            expected_hours: data.expected_hours,
            addons_snapshot: data.addons_snapshot,
            payment_intent_id: data.payment_intent_id,
            payment_status: data.payment_status,
            payment_failed: data.payment_failed,
            notes: data.notes,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the owning subscription.
    #[must_use]
    pub const fn subscription_id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// Returns the property to clean.
    #[must_use]
    pub const fn property_id(&self) -> PropertyId {
        self.property_id
    }

    /// Returns the calendar event UID, if the job came from a calendar.
    #[must_use]
    pub const fn calendar_event_uid(&self) -> Option<&CalendarEventUid> {
        self.calendar_event_uid.as_ref()
    }

    /// Returns the earliest time the clean may start.
    #[must_use]
    pub const fn check_in_time(&self) -> DateTime<Utc> {
        self.check_in_time
    }

    /// Returns the cleaning deadline.
    #[must_use]
    pub const fn check_out_time(&self) -> DateTime<Utc> {
        self.check_out_time
    }

    /// Returns the scheduling status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the estimated duration.
    #[must_use]
    pub const fn expected_hours(&self) -> ExpectedHours {
        self.expected_hours
    }

    /// Returns the frozen addon snapshot.
    #[must_use]
    pub const fn addons_snapshot(&self) -> &AddonsSnapshot {
        &self.addons_snapshot
    }

    /// Returns the payment intent identifier, if any.
    #[must_use]
    pub fn payment_intent_id(&self) -> Option<&str> {
        self.payment_intent_id.as_deref()
    }

    /// Returns the payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Returns `true` when the last payment attempt failed.
    #[must_use]
    pub const fn payment_failed(&self) -> bool {
        self.payment_failed
    }

    /// Returns operator notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the calendar-derived fields with those of a newer job for the
    /// same event.
    ///
    /// Identity, status, and payment fields are kept; the update timestamp is
    /// taken from `incoming`.
    pub fn refresh_from(&mut self, incoming: &Self) {
        self.check_in_time = incoming.check_in_time;
        self.check_out_time = incoming.check_out_time;
        self.expected_hours = incoming.expected_hours;
        self.addons_snapshot = incoming.addons_snapshot.clone();
        self.updated_at = incoming.updated_at;
    }

    /// Records the outcome of a payment made by the payment collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::EmptyPaymentIntent`] when the intent
    /// identifier is blank.
    pub fn record_payment(
        &mut self,
        payment_intent_id: &str,
        status: PaymentStatus,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        let trimmed = payment_intent_id.trim();
        if trimmed.is_empty() {
            return Err(JobDomainError::EmptyPaymentIntent);
        }
        self.payment_intent_id = Some(trimmed.to_owned());
        self.payment_status = status;
        self.payment_failed = matches!(status, PaymentStatus::Failed | PaymentStatus::CaptureFailed);
        self.updated_at = clock.utc();
        Ok(())
    }
}
