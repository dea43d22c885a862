//! Detection and archival of jobs whose booking left the calendar.

use super::context::{ContextResolutionError, ContextResolver, SyncContext, SyncTarget};
use crate::calendar::ports::{CalendarFetchError, CalendarSource};
use crate::job::{
    domain::{CancelledJob, Job, JobDomainError},
    ports::{JobRepository, JobRepositoryError},
};
use crate::property::ports::{PropertyRepository, SubscriptionRepository};
use crate::sync::domain::{CancellationReport, ItemError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, debug, info, info_span, warn};

/// Errors that abort a detection run before any job is archived.
#[derive(Debug, Error)]
pub enum CancellationDetectionError {
    /// The target could not be resolved.
    #[error(transparent)]
    Context(#[from] ContextResolutionError),
    /// The calendar could not be fetched or parsed.
    #[error(transparent)]
    Fetch(#[from] CalendarFetchError),
    /// The stored jobs could not be loaded.
    #[error(transparent)]
    Repository(#[from] JobRepositoryError),
}

/// Failure to archive one vanished job. Siblings are unaffected.
#[derive(Debug, Error)]
pub enum JobCancellationError {
    /// The archive snapshot could not be built.
    #[error(transparent)]
    Domain(#[from] JobDomainError),
    /// The archive transaction failed and was rolled back.
    #[error(transparent)]
    Repository(#[from] JobRepositoryError),
}

/// Result type for cancellation detection.
pub type CancellationDetectionResult<T> = Result<T, CancellationDetectionError>;

/// Archives stored jobs whose calendar event UID is no longer in the feed.
///
/// Never creates jobs.
#[derive(Clone)]
pub struct CancellationDetector<S, P, F, J, C>
where
    S: SubscriptionRepository,
    P: PropertyRepository,
    F: CalendarSource,
    J: JobRepository,
    C: Clock + Send + Sync,
{
    resolver: ContextResolver<S, P>,
    source: Arc<F>,
    jobs: Arc<J>,
    clock: Arc<C>,
}

impl<S, P, F, J, C> CancellationDetector<S, P, F, J, C>
where
    S: SubscriptionRepository,
    P: PropertyRepository,
    F: CalendarSource,
    J: JobRepository,
    C: Clock + Send + Sync,
{
    /// Creates a detector.
    #[must_use]
    pub const fn new(
        resolver: ContextResolver<S, P>,
        source: Arc<F>,
        jobs: Arc<J>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            resolver,
            source,
            jobs,
            clock,
        }
    }

    /// Reconciles the stored jobs of `target` against its calendar.
    ///
    /// Each vanished job is archived in its own transaction; a failure is
    /// reported for that job and the remaining jobs are still processed.
    ///
    /// # Errors
    ///
    /// Returns [`CancellationDetectionError`] when the target cannot be
    /// resolved, the feed cannot be fetched, or the stored jobs cannot be
    /// loaded. Nothing is archived in those cases.
    pub async fn detect(
        &self,
        target: SyncTarget,
    ) -> CancellationDetectionResult<CancellationReport> {
        let context = self.resolver.resolve(target).await?;
        let span = info_span!(
            "cancellation_detection",
            subscription_id = %context.subscription_id(),
            url = %context.calendar_url(),
        );
        self.detect_resolved(&context).instrument(span).await
    }

    async fn detect_resolved(
        &self,
        context: &SyncContext,
    ) -> CancellationDetectionResult<CancellationReport> {
        let feed = self.source.fetch(context.calendar_url()).await.inspect_err(|err| {
            warn!(error = %err, "calendar fetch failed; detection aborted");
        })?;
        let existing = self
            .jobs
            .find_with_calendar_uid_for_subscription(context.subscription_id())
            .await?;

        if existing.is_empty() {
            debug!("no stored jobs to check");
            return Ok(CancellationReport {
                success: true,
                message: "No existing jobs to check for cancellations".to_owned(),
                total_processed: 0,
                total_cancelled: 0,
                ids: Vec::new(),
                errors: Vec::new(),
            });
        }

        let current = feed.uids();
        let vanished: Vec<&Job> = existing
            .iter()
            .filter(|job| {
                job.calendar_event_uid()
                    .is_some_and(|uid| !current.contains(uid.as_str()))
            })
            .collect();

        let mut ids = Vec::with_capacity(vanished.len());
        let mut errors = Vec::new();
        for job in vanished {
            match self.cancel_job(job).await {
                Ok(()) => {
                    info!(job_id = %job.id(), "job archived as cancelled");
                    ids.push(job.id().to_string());
                }
                Err(err) => {
                    warn!(job_id = %job.id(), error = %err, "could not archive cancelled job");
                    errors.push(ItemError::new(job.id(), err));
                }
            }
        }

        let message = if ids.is_empty() && errors.is_empty() {
            "No cancelled jobs detected".to_owned()
        } else {
            format!("Cancelled {} of {} jobs", ids.len(), existing.len())
        };
        Ok(CancellationReport {
            success: true,
            message,
            total_processed: existing.len(),
            total_cancelled: ids.len(),
            ids,
            errors,
        })
    }

    async fn cancel_job(&self, job: &Job) -> Result<(), JobCancellationError> {
        let cancelled = CancelledJob::from_vanished(job, &*self.clock)?;
        self.jobs.archive_cancelled(&cancelled).await?;
        Ok(())
    }
}
