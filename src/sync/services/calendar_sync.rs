//! Calendar-to-job synchronization for one subscription.

use super::context::{ContextResolutionError, ContextResolver, SyncContext, SyncTarget};
use super::writer::BatchUpsertWriter;
use crate::calendar::ports::{CalendarFetchError, CalendarSource};
use crate::job::{
    domain::{Job, JobDomainError, JobId, PaymentStatus},
    ports::{JobRepository, JobRepositoryError},
};
use crate::property::{
    domain::SubscriptionId,
    ports::{PropertyRepository, SubscriptionRepository},
};
use crate::sync::SyncSettings;
use crate::sync::domain::{ItemError, SyncReport, TimeResolver, build_job_drafts};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, debug, info, info_span, warn};

const UNREADABLE_START: &str = "event has no readable start date";

/// Service-level errors for calendar synchronization.
#[derive(Debug, Error)]
pub enum CalendarSyncError {
    /// The target could not be resolved; nothing was fetched or written.
    #[error(transparent)]
    Context(#[from] ContextResolutionError),
    /// The calendar could not be fetched or parsed; nothing was written.
    #[error(transparent)]
    Fetch(#[from] CalendarFetchError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] JobDomainError),
    /// A job lookup or update failed.
    #[error(transparent)]
    Repository(#[from] JobRepositoryError),
}

/// Result type for calendar sync operations.
pub type CalendarSyncResult<T> = Result<T, CalendarSyncError>;

/// Fetches a subscription's calendar and upserts one job per booking.
#[derive(Clone)]
pub struct CalendarSyncService<S, P, F, J, C>
where
    S: SubscriptionRepository,
    P: PropertyRepository,
    F: CalendarSource,
    J: JobRepository,
    C: Clock + Send + Sync,
{
    resolver: ContextResolver<S, P>,
    subscriptions: Arc<S>,
    source: Arc<F>,
    jobs: Arc<J>,
    writer: BatchUpsertWriter<J>,
    clock: Arc<C>,
    settings: SyncSettings,
}

impl<S, P, F, J, C> CalendarSyncService<S, P, F, J, C>
where
    S: SubscriptionRepository,
    P: PropertyRepository,
    F: CalendarSource,
    J: JobRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sync service.
    #[must_use]
    pub fn new(
        resolver: ContextResolver<S, P>,
        subscriptions: Arc<S>,
        source: Arc<F>,
        jobs: Arc<J>,
        clock: Arc<C>,
        settings: SyncSettings,
    ) -> Self {
        let writer = BatchUpsertWriter::new(Arc::clone(&jobs), settings.batch_size());
        Self {
            resolver,
            subscriptions,
            source,
            jobs,
            writer,
            clock,
            settings,
        }
    }

    /// Synchronizes the calendar of `target` into the job table.
    ///
    /// Once the target is resolved the attempt is recorded on the
    /// subscription, whether or not it succeeds. Failed batches and
    /// unschedulable events are reported, not returned as errors.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarSyncError::Context`] when the target cannot be
    /// resolved and [`CalendarSyncError::Fetch`] when the feed cannot be
    /// retrieved.
    pub async fn sync(&self, target: SyncTarget) -> CalendarSyncResult<SyncReport> {
        let context = self.resolver.resolve(target).await?;
        let span = info_span!(
            "calendar_sync",
            subscription_id = %context.subscription_id(),
            url = %context.calendar_url(),
        );
        self.sync_resolved(&context).instrument(span).await
    }

    async fn sync_resolved(&self, context: &SyncContext) -> CalendarSyncResult<SyncReport> {
        let feed = match self.source.fetch(context.calendar_url()).await {
            Ok(feed) => feed,
            Err(err) => {
                warn!(error = %err, "calendar fetch failed; sync aborted");
                self.record_attempt(context.subscription_id(), true).await;
                return Err(err.into());
            }
        };

        if feed.is_empty() {
            info!("calendar is empty");
            self.record_attempt(context.subscription_id(), false).await;
            return Ok(SyncReport {
                success: true,
                message: "Calendar is empty; nothing to sync".to_owned(),
                total_synced: 0,
                total_attempted: 0,
                ids: Vec::new(),
                errors: Vec::new(),
            });
        }

        let resolver = TimeResolver::new(&self.settings);
        let earliest_start =
            resolver.horizon_start(self.clock.utc(), self.settings.horizon_days());
        let schedule = build_job_drafts(
            feed.events(),
            context.subscription_id(),
            context.property(),
            &resolver,
            earliest_start,
        );
        debug!(
            events = feed.events().len(),
            unschedulable = feed.unschedulable_uids().len(),
            drafts = schedule.drafts.len(),
            outside_horizon = schedule.outside_horizon,
            skipped = schedule.skipped.len(),
            "calendar transformed"
        );
        for skipped in &schedule.skipped {
            warn!(uid = %skipped.uid(), error = %skipped, "event skipped");
        }

        let jobs: Vec<Job> = schedule
            .drafts
            .into_iter()
            .map(|draft| Job::from_draft(draft, &*self.clock))
            .collect();
        let outcome = self.writer.write(&jobs).await;
        let failed = !outcome.errors.is_empty();
        self.record_attempt(context.subscription_id(), failed).await;

        info!(
            written = outcome.written,
            attempted = outcome.attempted,
            failed_batches = outcome.errors.len(),
            "calendar sync finished"
        );

        let mut errors: Vec<ItemError> = outcome
            .errors
            .iter()
            .map(|err| ItemError::new(format!("batch-{}", err.batch_index), err))
            .collect();
        errors.extend(
            schedule
                .skipped
                .iter()
                .map(|skipped| ItemError::new(skipped.uid(), skipped)),
        );
        errors.extend(
            feed.unschedulable_uids()
                .iter()
                .map(|uid| ItemError::new(uid, UNREADABLE_START)),
        );

        Ok(SyncReport {
            success: true,
            message: format!("Synced {} of {} jobs", outcome.written, outcome.attempted),
            total_synced: outcome.written,
            total_attempted: outcome.attempted,
            ids: outcome
                .written_uids
                .iter()
                .map(|uid| uid.as_str().to_owned())
                .collect(),
            errors,
        })
    }

    /// Marks the subscription's earliest job as paid with `payment_intent_id`.
    ///
    /// Returns the updated job, or `None` when the subscription has no jobs.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarSyncError::Domain`] for a blank intent identifier and
    /// [`CalendarSyncError::Repository`] when the lookup or update fails.
    pub async fn attach_initial_payment(
        &self,
        subscription_id: SubscriptionId,
        payment_intent_id: &str,
    ) -> CalendarSyncResult<Option<JobId>> {
        let Some(mut job) = self
            .jobs
            .find_earliest_for_subscription(subscription_id)
            .await?
        else {
            info!(%subscription_id, "no job to attach the initial payment to");
            return Ok(None);
        };
        job.record_payment(payment_intent_id, PaymentStatus::Captured, &*self.clock)?;
        self.jobs.update_payment(&job).await?;
        info!(%subscription_id, job_id = %job.id(), "initial payment attached");
        Ok(Some(job.id()))
    }

    async fn record_attempt(&self, subscription_id: SubscriptionId, failed: bool) {
        if let Err(err) = self
            .subscriptions
            .record_sync_attempt(subscription_id, self.clock.utc(), failed)
            .await
        {
            warn!(%subscription_id, error = %err, "could not record sync attempt");
        }
    }
}
