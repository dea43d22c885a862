//! Diesel row models for job persistence.

use super::schema::{cancelled_jobs, jobs, jobs_to_cleaners};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Row model for live jobs, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobRow {
    /// Job identifier.
    pub id: uuid::Uuid,
    /// Owning subscription.
    pub subscription_id: uuid::Uuid,
    /// Property to clean.
    pub property_id: uuid::Uuid,
    /// Calendar event UID.
    pub calendar_event_uid: Option<String>,
    /// Earliest start of the clean.
    pub check_in_time: DateTime<Utc>,
    /// Cleaning deadline.
    pub check_out_time: DateTime<Utc>,
    /// Scheduling status.
    pub status: String,
    /// Estimated duration in hours.
    pub expected_hours: f64,
    /// Versioned addon snapshot.
    pub addons_snapshot: Value,
    /// Payment intent identifier.
    pub payment_intent_id: Option<String>,
    /// Payment status.
    pub payment_status: String,
    /// Whether the last payment attempt failed.
    pub payment_failed: bool,
    /// Operator notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row model for archived jobs, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = cancelled_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CancelledJobRow {
    /// Archive identifier.
    pub id: uuid::Uuid,
    /// Identifier of the live job.
    pub original_job_id: uuid::Uuid,
    /// Owning subscription.
    pub subscription_id: uuid::Uuid,
    /// Property.
    pub property_id: uuid::Uuid,
    /// UID of the vanished calendar event.
    pub calendar_event_uid: String,
    /// Archived earliest start.
    pub check_in_time: DateTime<Utc>,
    /// Archived deadline.
    pub check_out_time: DateTime<Utc>,
    /// Archived status.
    pub status: String,
    /// Archived duration estimate.
    pub expected_hours: f64,
    /// Archived addon snapshot.
    pub addons_snapshot: Value,
    /// Archived payment intent identifier.
    pub payment_intent_id: Option<String>,
    /// Archived payment status.
    pub payment_status: String,
    /// Archived payment failure flag.
    pub payment_failed: bool,
    /// Archived notes.
    pub notes: Option<String>,
    /// Creation timestamp of the live job.
    pub original_created_at: DateTime<Utc>,
    /// Last update timestamp of the live job.
    pub original_updated_at: DateTime<Utc>,
    /// Archive timestamp.
    pub cancelled_at: DateTime<Utc>,
    /// What triggered the cancellation.
    pub cancellation_source: String,
    /// Cancellation reason.
    pub cancellation_reason: String,
}

/// Row model for cleaner assignments, used for reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = jobs_to_cleaners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssignmentRow {
    /// Assigned job.
    pub job_id: uuid::Uuid,
    /// Assigned cleaner.
    pub cleaner_id: uuid::Uuid,
    /// Cleaner role on the job.
    pub role: String,
    /// Whether the urgent pickup bonus applies.
    pub urgent_bonus: bool,
    /// Assignment timestamp.
    pub created_at: DateTime<Utc>,
}
