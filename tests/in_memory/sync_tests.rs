//! In-memory integration tests for calendar synchronization.

use super::helpers::{Scheduler, feed, scheduler};
use rstest::rstest;
use turnover::calendar::domain::{CalendarDate, CalendarEvent, CalendarEventUid};
use turnover::job::{domain::JobStatus, ports::JobRepository};
use turnover::property::domain::{
    BathroomCount, LaundryType, Property, PropertyId, Subscription, SubscriptionId,
    SubscriptionStatus,
};
use turnover::sync::services::SyncTarget;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resyncing_an_unchanged_calendar_is_idempotent(
    scheduler: Scheduler,
) -> Result<(), eyre::Report> {
    let url = feed("idempotent")?;
    let subscription_id = scheduler.add_subscription(Some(&url))?;
    scheduler.publish(&url, &["a", "b", "c"])?;
    let service = scheduler.sync_service();

    service.sync(SyncTarget::Subscription(subscription_id)).await?;
    let first = scheduler.jobs.list_for_subscription(subscription_id).await?;
    let report = service.sync(SyncTarget::Subscription(subscription_id)).await?;
    let second = scheduler.jobs.list_for_subscription(subscription_id).await?;

    eyre::ensure!(
        report.total_synced == 3,
        "expected 3 upserts, got {}",
        report.total_synced
    );
    eyre::ensure!(first == second, "resync changed stored jobs");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moved_booking_refreshes_the_job_in_place(
    scheduler: Scheduler,
) -> Result<(), eyre::Report> {
    let url = feed("moved")?;
    let subscription_id = scheduler.add_subscription(Some(&url))?;
    scheduler.publish(&url, &["a"])?;
    let service = scheduler.sync_service();
    service.sync(SyncTarget::Subscription(subscription_id)).await?;
    let uid = CalendarEventUid::new("a")?;
    let before = scheduler
        .jobs
        .find_by_calendar_uid(&uid)
        .await?
        .ok_or_else(|| eyre::eyre!("job a missing after first sync"))?;

    scheduler.source.set_events(
        &url,
        vec![CalendarEvent::all_day(
            uid.clone(),
            CalendarDate::new(2026, 12, 2)?,
            CalendarDate::new(2026, 12, 6)?,
        )],
    )?;
    service.sync(SyncTarget::Subscription(subscription_id)).await?;
    let after = scheduler
        .jobs
        .find_by_calendar_uid(&uid)
        .await?
        .ok_or_else(|| eyre::eyre!("job a missing after second sync"))?;

    eyre::ensure!(after.id() == before.id(), "job identity changed");
    eyre::ensure!(after.status() == JobStatus::Unassigned, "status changed");
    eyre::ensure!(
        after.check_in_time() > before.check_in_time(),
        "check-in time was not refreshed"
    );
    eyre::ensure!(after.created_at() == before.created_at(), "creation time changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn property_target_syncs_into_its_active_subscription(
    scheduler: Scheduler,
) -> Result<(), eyre::Report> {
    let url = feed("by-property")?;
    let property = Property::new(
        PropertyId::new(),
        1,
        BathroomCount::whole(1),
        LaundryType::OffSite,
    )
    .with_calendar_url(url.clone());
    let property_id = property.id();
    let paused = Subscription::new(SubscriptionId::new(), property_id, SubscriptionStatus::Paused);
    let active = Subscription::new(SubscriptionId::new(), property_id, SubscriptionStatus::Active);
    let active_id = active.id();
    scheduler.directory.insert_property(property)?;
    scheduler.directory.insert_subscription(paused)?;
    scheduler.directory.insert_subscription(active)?;
    scheduler.publish(&url, &["x", "y"])?;

    scheduler
        .sync_service()
        .sync(SyncTarget::Property(property_id))
        .await?;

    let uids = scheduler.live_uids(active_id).await?;
    eyre::ensure!(uids == ["x", "y"], "unexpected jobs: {uids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sync_report_serialises_in_camel_case(scheduler: Scheduler) -> Result<(), eyre::Report> {
    let url = feed("json")?;
    let subscription_id = scheduler.add_subscription(Some(&url))?;
    scheduler.publish(&url, &["a"])?;

    let report = scheduler
        .sync_service()
        .sync(SyncTarget::Subscription(subscription_id))
        .await?;
    let json = serde_json::to_value(&report)?;

    eyre::ensure!(json["success"] == true, "success flag missing: {json}");
    eyre::ensure!(json["totalSynced"] == 1, "totalSynced missing: {json}");
    eyre::ensure!(json["totalAttempted"] == 1, "totalAttempted missing: {json}");
    eyre::ensure!(json["ids"][0] == "a", "ids missing: {json}");
    Ok(())
}
