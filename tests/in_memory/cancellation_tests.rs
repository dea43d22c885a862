//! In-memory integration tests for cancellation detection.

use super::helpers::{Scheduler, feed, scheduler};
use rstest::rstest;
use turnover::calendar::domain::CalendarEventUid;
use turnover::job::{
    domain::{AssignmentRole, CancellationSource, CleanerId, JobAssignment, VANISHED_EVENT_REASON},
    ports::{AssignmentRepository, JobRepository},
};
use turnover::sync::services::SyncTarget;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn vanished_booking_is_archived_and_new_one_ignored(
    scheduler: Scheduler,
) -> Result<(), eyre::Report> {
    let url = feed("abc")?;
    let subscription_id = scheduler.add_subscription(Some(&url))?;
    scheduler.publish(&url, &["A", "B", "C"])?;
    scheduler
        .sync_service()
        .sync(SyncTarget::Subscription(subscription_id))
        .await?;
    let b_before = scheduler
        .jobs
        .find_by_calendar_uid(&CalendarEventUid::new("B")?)
        .await?;
    scheduler.publish(&url, &["B", "C", "D"])?;

    let report = scheduler
        .detector()
        .detect(SyncTarget::Subscription(subscription_id))
        .await?;

    eyre::ensure!(report.success, "detection failed: {}", report.message);
    eyre::ensure!(report.total_processed == 3, "processed {}", report.total_processed);
    eyre::ensure!(report.total_cancelled == 1, "cancelled {}", report.total_cancelled);
    eyre::ensure!(
        scheduler.live_uids(subscription_id).await? == ["B", "C"],
        "detection must not create or touch other jobs"
    );
    let b_after = scheduler
        .jobs
        .find_by_calendar_uid(&CalendarEventUid::new("B")?)
        .await?;
    eyre::ensure!(b_before == b_after, "job B was modified");

    let archive = scheduler
        .jobs
        .list_cancelled_for_subscription(subscription_id)
        .await?;
    let archived = archive
        .first()
        .ok_or_else(|| eyre::eyre!("archive is empty"))?;
    eyre::ensure!(archived.calendar_event_uid().as_str() == "A", "wrong job archived");
    eyre::ensure!(
        archived.cancellation_source() == CancellationSource::AutoDetected,
        "wrong cancellation source"
    );
    eyre::ensure!(
        archived.cancellation_reason() == VANISHED_EVENT_REASON,
        "wrong cancellation reason"
    );
    eyre::ensure!(
        report.ids == [archived.original_job_id().to_string()],
        "report ids do not match the archive"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archiving_removes_cleaner_assignments(scheduler: Scheduler) -> Result<(), eyre::Report> {
    let url = feed("assigned")?;
    let subscription_id = scheduler.add_subscription(Some(&url))?;
    scheduler.publish(&url, &["gone", "kept"])?;
    scheduler
        .sync_service()
        .sync(SyncTarget::Subscription(subscription_id))
        .await?;
    let gone = scheduler
        .jobs
        .find_by_calendar_uid(&CalendarEventUid::new("gone")?)
        .await?
        .ok_or_else(|| eyre::eyre!("job missing"))?;
    scheduler
        .jobs
        .assign(&JobAssignment::new(
            gone.id(),
            CleanerId::new(),
            AssignmentRole::Primary,
            &*scheduler.clock,
        ))
        .await?;
    scheduler.publish(&url, &["kept"])?;

    scheduler
        .detector()
        .detect(SyncTarget::Subscription(subscription_id))
        .await?;

    eyre::ensure!(
        scheduler.jobs.find_by_job(gone.id()).await?.is_empty(),
        "assignments survived the archive"
    );
    eyre::ensure!(
        scheduler.jobs.find_by_id(gone.id()).await?.is_none(),
        "live job survived the archive"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_detection_pass_cancels_nothing(scheduler: Scheduler) -> Result<(), eyre::Report> {
    let url = feed("twice")?;
    let subscription_id = scheduler.add_subscription(Some(&url))?;
    scheduler.publish(&url, &["a", "b"])?;
    scheduler
        .sync_service()
        .sync(SyncTarget::Subscription(subscription_id))
        .await?;
    scheduler.publish(&url, &["b"])?;
    let detector = scheduler.detector();

    detector
        .detect(SyncTarget::Subscription(subscription_id))
        .await?;
    let report = detector
        .detect(SyncTarget::Subscription(subscription_id))
        .await?;

    eyre::ensure!(report.total_processed == 1, "processed {}", report.total_processed);
    eyre::ensure!(report.total_cancelled == 0, "cancelled {}", report.total_cancelled);
    eyre::ensure!(
        scheduler.archived_uids(subscription_id).await? == ["a"],
        "archive should hold exactly one entry"
    );
    Ok(())
}
