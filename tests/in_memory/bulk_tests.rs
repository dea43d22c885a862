//! In-memory integration tests for bulk reconciliation.

use super::helpers::{Scheduler, feed, scheduler};
use rstest::rstest;
use turnover::sync::services::SyncTarget;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscription_without_calendar_is_reported_and_skipped(
    scheduler: Scheduler,
) -> Result<(), eyre::Report> {
    let first_url = feed("first")?;
    let second_url = feed("second")?;
    let first = scheduler.add_subscription(Some(&first_url))?;
    let second = scheduler.add_subscription(Some(&second_url))?;
    let missing = scheduler.add_subscription(None)?;
    scheduler.publish(&first_url, &["f1", "f2"])?;
    scheduler.publish(&second_url, &["s1"])?;
    let sync = scheduler.sync_service();
    sync.sync(SyncTarget::Subscription(first)).await?;
    sync.sync(SyncTarget::Subscription(second)).await?;
    scheduler.publish(&first_url, &["f2"])?;

    let report = scheduler.orchestrator().reconcile_all().await;

    eyre::ensure!(report.success, "bulk run failed: {}", report.message);
    eyre::ensure!(report.total_subscriptions == 3, "total {}", report.total_subscriptions);
    eyre::ensure!(
        report.subscriptions_processed == 2,
        "processed {}",
        report.subscriptions_processed
    );
    eyre::ensure!(report.total_jobs_processed == 3, "jobs {}", report.total_jobs_processed);
    eyre::ensure!(
        report.total_jobs_cancelled == 1,
        "cancelled {}",
        report.total_jobs_cancelled
    );
    eyre::ensure!(report.subscription_results.len() == 3, "one line per subscription");
    let error = report
        .errors
        .first()
        .ok_or_else(|| eyre::eyre!("missing error for subscription without calendar"))?;
    eyre::ensure!(error.id == missing.to_string(), "error keyed by wrong subscription");
    eyre::ensure!(error.error == "No calendar URL configured", "message {}", error.error);
    eyre::ensure!(report.errors.len() == 1, "unexpected errors: {:?}", report.errors);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_calendar_does_not_stop_other_subscriptions(
    scheduler: Scheduler,
) -> Result<(), eyre::Report> {
    let down_url = feed("down")?;
    let up_url = feed("up")?;
    let down = scheduler.add_subscription(Some(&down_url))?;
    let up = scheduler.add_subscription(Some(&up_url))?;
    scheduler.publish(&down_url, &["d1"])?;
    scheduler.publish(&up_url, &["u1", "u2"])?;
    let sync = scheduler.sync_service();
    sync.sync(SyncTarget::Subscription(down)).await?;
    sync.sync(SyncTarget::Subscription(up)).await?;
    scheduler.source.set_failure(&down_url, "connection refused")?;
    scheduler.publish(&up_url, &["u2"])?;

    let report = scheduler.orchestrator().reconcile_all().await;

    eyre::ensure!(
        report.subscriptions_processed == 1,
        "processed {}",
        report.subscriptions_processed
    );
    eyre::ensure!(
        report.total_jobs_cancelled == 1,
        "cancelled {}",
        report.total_jobs_cancelled
    );
    eyre::ensure!(
        scheduler.live_uids(down).await? == ["d1"],
        "failed subscription was modified"
    );
    eyre::ensure!(
        scheduler.archived_uids(up).await? == ["u1"],
        "healthy subscription not reconciled"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn no_active_subscriptions_yields_an_empty_report(scheduler: Scheduler) {
    let report = scheduler.orchestrator().reconcile_all().await;

    assert!(report.success);
    assert_eq!(report.total_subscriptions, 0);
    assert!(report.subscription_results.is_empty());
    assert!(report.errors.is_empty());
}
