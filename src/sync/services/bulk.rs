//! Reconciliation of every active subscription.

use super::cancellation::CancellationDetector;
use super::context::SyncTarget;
use crate::calendar::ports::CalendarSource;
use crate::job::ports::JobRepository;
use crate::property::{
    domain::Subscription,
    ports::{PropertyRepository, SubscriptionRepository},
};
use crate::sync::domain::{BulkCancellationReport, ItemError, SubscriptionCancellationReport};
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the cancellation detector for each active subscription in turn.
#[derive(Clone)]
pub struct BulkCancellationOrchestrator<S, P, F, J, C>
where
    S: SubscriptionRepository,
    P: PropertyRepository,
    F: CalendarSource,
    J: JobRepository,
    C: Clock + Send + Sync,
{
    subscriptions: Arc<S>,
    properties: Arc<P>,
    detector: CancellationDetector<S, P, F, J, C>,
}

impl<S, P, F, J, C> BulkCancellationOrchestrator<S, P, F, J, C>
where
    S: SubscriptionRepository,
    P: PropertyRepository,
    F: CalendarSource,
    J: JobRepository,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator.
    #[must_use]
    pub const fn new(
        subscriptions: Arc<S>,
        properties: Arc<P>,
        detector: CancellationDetector<S, P, F, J, C>,
    ) -> Self {
        Self {
            subscriptions,
            properties,
            detector,
        }
    }

    /// Reconciles every active subscription sequentially.
    ///
    /// Failures are captured in the report; one subscription never stops the
    /// others.
    pub async fn reconcile_all(&self) -> BulkCancellationReport {
        let subscriptions = match self.subscriptions.list_active().await {
            Ok(subscriptions) => subscriptions,
            Err(err) => {
                warn!(error = %err, "could not list active subscriptions");
                return BulkCancellationReport {
                    success: false,
                    message: format!("Failed to list active subscriptions: {err}"),
                    total_subscriptions: 0,
                    subscriptions_processed: 0,
                    total_jobs_processed: 0,
                    total_jobs_cancelled: 0,
                    subscription_results: Vec::new(),
                    errors: Vec::new(),
                };
            }
        };

        let mut report = BulkCancellationReport {
            success: true,
            message: String::new(),
            total_subscriptions: subscriptions.len(),
            subscriptions_processed: 0,
            total_jobs_processed: 0,
            total_jobs_cancelled: 0,
            subscription_results: Vec::with_capacity(subscriptions.len()),
            errors: Vec::new(),
        };

        for subscription in &subscriptions {
            let line = self.reconcile_one(subscription, &mut report).await;
            report.subscription_results.push(line);
        }

        report.message = format!(
            "Reconciled {} of {} active subscriptions; {} jobs cancelled",
            report.subscriptions_processed, report.total_subscriptions, report.total_jobs_cancelled
        );
        info!(
            subscriptions = report.total_subscriptions,
            processed = report.subscriptions_processed,
            cancelled = report.total_jobs_cancelled,
            "bulk reconciliation finished"
        );
        report
    }

    async fn reconcile_one(
        &self,
        subscription: &Subscription,
        report: &mut BulkCancellationReport,
    ) -> SubscriptionCancellationReport {
        let subscription_id = subscription.id();
        let failed = |bulk: &mut BulkCancellationReport, error: String| {
            warn!(%subscription_id, %error, "subscription skipped");
            bulk.errors.push(ItemError::new(subscription_id, error));
            SubscriptionCancellationReport {
                subscription_id,
                processed: 0,
                cancelled: 0,
                errors: 1,
            }
        };

        match self.properties.find_by_id(subscription.property_id()).await {
            Ok(Some(property)) if property.calendar_url().is_some() => {}
            Ok(Some(_)) => return failed(report, "No calendar URL configured".to_owned()),
            Ok(None) => return failed(report, "Property not found".to_owned()),
            Err(err) => return failed(report, err.to_string()),
        }

        match self
            .detector
            .detect(SyncTarget::Subscription(subscription_id))
            .await
        {
            Ok(outcome) => {
                report.subscriptions_processed += 1;
                report.total_jobs_processed += outcome.total_processed;
                report.total_jobs_cancelled += outcome.total_cancelled;
                SubscriptionCancellationReport {
                    subscription_id,
                    processed: outcome.total_processed,
                    cancelled: outcome.total_cancelled,
                    errors: outcome.errors.len(),
                }
            }
            Err(err) => failed(report, err.to_string()),
        }
    }
}
