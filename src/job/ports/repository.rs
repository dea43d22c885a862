//! Repository ports for jobs, their archive, and cleaner assignments.

use crate::calendar::domain::CalendarEventUid;
use crate::job::domain::{CancelledJob, Job, JobAssignment, JobId};
use crate::property::domain::SubscriptionId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job repository operations.
pub type JobRepositoryResult<T> = Result<T, JobRepositoryError>;

/// Job persistence contract.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Inserts jobs or refreshes existing ones sharing a calendar event UID.
    ///
    /// On conflict only the check-in time, deadline, expected hours, addon
    /// snapshot, and update timestamp change. The call is atomic for the
    /// whole slice. Returns the number of rows inserted or updated.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::MissingCalendarEventUid`] if any job
    /// lacks a UID.
    async fn upsert_by_calendar_uid(&self, jobs: &[Job]) -> JobRepositoryResult<usize>;

    /// Finds a job by identifier.
    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>>;

    /// Finds the live job for a calendar event.
    async fn find_by_calendar_uid(
        &self,
        uid: &CalendarEventUid,
    ) -> JobRepositoryResult<Option<Job>>;

    /// Lists every live job of a subscription ordered by deadline.
    async fn list_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Vec<Job>>;

    /// Lists the live jobs of a subscription that carry a calendar event UID.
    async fn find_with_calendar_uid_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Vec<Job>>;

    /// Finds the job with the earliest deadline, breaking ties by creation
    /// time.
    async fn find_earliest_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Option<Job>>;

    /// Persists the payment fields of an existing job.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::NotFound`] when the job does not exist.
    async fn update_payment(&self, job: &Job) -> JobRepositoryResult<()>;

    /// Moves a job into the archive.
    ///
    /// Deleting the job's assignments, inserting the archive row, and
    /// deleting the live row happen in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::NotFound`] when the live job is already
    /// gone; nothing is written in that case.
    async fn archive_cancelled(&self, cancelled: &CancelledJob) -> JobRepositoryResult<()>;

    /// Lists archive entries for a subscription, most recent first.
    async fn list_cancelled_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Vec<CancelledJob>>;
}

/// Cleaner assignment persistence contract.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Stores an assignment, replacing any existing one for the same job and
    /// cleaner.
    async fn assign(&self, assignment: &JobAssignment) -> JobRepositoryResult<()>;

    /// Lists the assignments of a job.
    async fn find_by_job(&self, job_id: JobId) -> JobRepositoryResult<Vec<JobAssignment>>;

    /// Deletes every assignment of a job and returns how many were removed.
    async fn delete_for_job(&self, job_id: JobId) -> JobRepositoryResult<usize>;
}

/// Errors returned by job repositories.
#[derive(Debug, Clone, Error)]
pub enum JobRepositoryError {
    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// A job without a calendar event UID was given to a UID-keyed write.
    #[error("job {0} has no calendar event UID")]
    MissingCalendarEventUid(JobId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for JobRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
