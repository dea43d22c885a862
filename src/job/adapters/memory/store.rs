//! In-memory job, archive, and assignment store.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::calendar::domain::CalendarEventUid;
use crate::job::{
    domain::{CancelledJob, Job, JobAssignment, JobId},
    ports::{AssignmentRepository, JobRepository, JobRepositoryError, JobRepositoryResult},
};
use crate::property::domain::SubscriptionId;

/// Thread-safe in-memory store implementing the job and assignment ports.
///
/// Writes can be made to fail on demand so callers' error isolation can be
/// exercised.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobStore {
    state: Arc<RwLock<InMemoryJobState>>,
}

#[derive(Debug, Default)]
struct InMemoryJobState {
    jobs: Vec<Job>,
    cancelled: Vec<CancelledJob>,
    assignments: Vec<JobAssignment>,
    failing_upsert_uids: HashSet<CalendarEventUid>,
    failing_archive_jobs: HashSet<JobId>,
}

#[derive(Debug, thiserror::Error)]
#[error("injected failure: {0}")]
struct InjectedFailure(String);

impl InMemoryJobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes any upsert containing `uid` fail without writing.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::Persistence`] when lock acquisition
    /// fails.
    pub fn fail_upserts_containing(&self, uid: CalendarEventUid) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_upsert_uids.insert(uid);
        Ok(())
    }

    /// Makes archiving the given job fail without writing.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::Persistence`] when lock acquisition
    /// fails.
    pub fn fail_archive_for(&self, job_id: JobId) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_archive_jobs.insert(job_id);
        Ok(())
    }

    /// Returns the number of live jobs across all subscriptions.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::Persistence`] when lock acquisition
    /// fails.
    pub fn job_count(&self) -> JobRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.jobs.len())
    }
}

fn lock_error(err: impl ToString) -> JobRepositoryError {
    JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn injected(message: String) -> JobRepositoryError {
    JobRepositoryError::persistence(InjectedFailure(message))
}

fn sorted_by_deadline(mut jobs: Vec<Job>) -> Vec<Job> {
    jobs.sort_by_key(|job| (job.check_out_time(), job.created_at()));
    jobs
}

#[async_trait]
impl JobRepository for InMemoryJobStore {
    async fn upsert_by_calendar_uid(&self, jobs: &[Job]) -> JobRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;

        for job in jobs {
            let uid = job
                .calendar_event_uid()
                .ok_or(JobRepositoryError::MissingCalendarEventUid(job.id()))?;
            if state.failing_upsert_uids.contains(uid) {
                return Err(injected(format!("upsert rejected for {uid}")));
            }
        }

        for job in jobs {
            let existing = state
                .jobs
                .iter_mut()
                .find(|stored| stored.calendar_event_uid() == job.calendar_event_uid());
            match existing {
                Some(stored) => stored.refresh_from(job),
                None => state.jobs.push(job.clone()),
            }
        }
        Ok(jobs.len())
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.jobs.iter().find(|job| job.id() == id).cloned())
    }

    async fn find_by_calendar_uid(
        &self,
        uid: &CalendarEventUid,
    ) -> JobRepositoryResult<Option<Job>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .jobs
            .iter()
            .find(|job| job.calendar_event_uid() == Some(uid))
            .cloned())
    }

    async fn list_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Vec<Job>> {
        let state = self.state.read().map_err(lock_error)?;
        let jobs = state
            .jobs
            .iter()
            .filter(|job| job.subscription_id() == subscription_id)
            .cloned()
            .collect();
        Ok(sorted_by_deadline(jobs))
    }

    async fn find_with_calendar_uid_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Vec<Job>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .jobs
            .iter()
            .filter(|job| {
                job.subscription_id() == subscription_id && job.calendar_event_uid().is_some()
            })
            .cloned()
            .collect())
    }

    async fn find_earliest_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Option<Job>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .jobs
            .iter()
            .filter(|job| job.subscription_id() == subscription_id)
            .min_by_key(|job| (job.check_out_time(), job.created_at()))
            .cloned())
    }

    async fn update_payment(&self, job: &Job) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .jobs
            .iter_mut()
            .find(|stored| stored.id() == job.id())
            .ok_or(JobRepositoryError::NotFound(job.id()))?;
        *stored = job.clone();
        Ok(())
    }

    async fn archive_cancelled(&self, cancelled: &CancelledJob) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let job_id = cancelled.original_job_id();

        if state.failing_archive_jobs.contains(&job_id) {
            return Err(injected(format!("archive rejected for job {job_id}")));
        }
        let position = state
            .jobs
            .iter()
            .position(|job| job.id() == job_id)
            .ok_or(JobRepositoryError::NotFound(job_id))?;

        state.assignments.retain(|assignment| assignment.job_id() != job_id);
        state.cancelled.push(cancelled.clone());
        state.jobs.remove(position);
        Ok(())
    }

    async fn list_cancelled_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Vec<CancelledJob>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut cancelled: Vec<CancelledJob> = state
            .cancelled
            .iter()
            .filter(|entry| entry.subscription_id() == subscription_id)
            .cloned()
            .collect();
        cancelled.sort_by_key(|entry| std::cmp::Reverse(entry.cancelled_at()));
        Ok(cancelled)
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryJobStore {
    async fn assign(&self, assignment: &JobAssignment) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.jobs.iter().any(|job| job.id() == assignment.job_id()) {
            return Err(JobRepositoryError::NotFound(assignment.job_id()));
        }
        state.assignments.retain(|existing| {
            existing.job_id() != assignment.job_id()
                || existing.cleaner_id() != assignment.cleaner_id()
        });
        state.assignments.push(assignment.clone());
        Ok(())
    }

    async fn find_by_job(&self, job_id: JobId) -> JobRepositoryResult<Vec<JobAssignment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .assignments
            .iter()
            .filter(|assignment| assignment.job_id() == job_id)
            .cloned()
            .collect())
    }

    async fn delete_for_job(&self, job_id: JobId) -> JobRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_error)?;
        let before = state.assignments.len();
        state.assignments.retain(|assignment| assignment.job_id() != job_id);
        Ok(before - state.assignments.len())
    }
}
