//! Tests for the in-memory job store.

use crate::calendar::domain::CalendarEventUid;
use crate::job::{
    adapters::memory::InMemoryJobStore,
    domain::{
        AddonsSnapshot, AssignmentRole, CancelledJob, CleanerId, ExpectedHours, Job,
        JobAssignment, JobDraft,
    },
    ports::{AssignmentRepository, JobRepository, JobRepositoryError},
};
use crate::property::domain::{
    BathroomCount, LaundryType, Property, PropertyId, SubscriptionId,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemoryJobStore {
    InMemoryJobStore::new()
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 11, 1, 14, 0, 0)
        .single()
        .expect("valid time")
}

fn job_for(subscription_id: SubscriptionId, uid: &str, deadline_days: i64) -> Job {
    let property = Property::new(
        PropertyId::new(),
        2,
        BathroomCount::whole(1),
        LaundryType::InUnit,
    );
    Job::from_draft(
        JobDraft {
            subscription_id,
            property_id: property.id(),
            calendar_event_uid: CalendarEventUid::new(uid).expect("valid uid"),
            check_in_time: base_time(),
            check_out_time: base_time() + Duration::days(deadline_days),
            expected_hours: ExpectedHours::estimate(&property),
            addons_snapshot: AddonsSnapshot::capture(&property),
        },
        &DefaultClock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upserting_the_same_uid_twice_keeps_one_row(store: InMemoryJobStore) {
    let subscription_id = SubscriptionId::new();
    let first = job_for(subscription_id, "a@example.com", 2);
    let second = job_for(subscription_id, "a@example.com", 3);

    store
        .upsert_by_calendar_uid(std::slice::from_ref(&first))
        .await
        .expect("first upsert should succeed");
    store
        .upsert_by_calendar_uid(std::slice::from_ref(&second))
        .await
        .expect("second upsert should succeed");

    let jobs = store
        .list_for_subscription(subscription_id)
        .await
        .expect("listing should succeed");
    assert_eq!(jobs.len(), 1);
    let stored = jobs.first().expect("one job");
    assert_eq!(stored.id(), first.id());
    assert_eq!(stored.check_out_time(), second.check_out_time());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_upsert_failure_writes_nothing(store: InMemoryJobStore) {
    let subscription_id = SubscriptionId::new();
    let good = job_for(subscription_id, "good@example.com", 2);
    let bad = job_for(subscription_id, "bad@example.com", 3);
    store
        .fail_upserts_containing(CalendarEventUid::new("bad@example.com").expect("valid uid"))
        .expect("injection should succeed");

    let result = store.upsert_by_calendar_uid(&[good, bad]).await;

    assert!(matches!(result, Err(JobRepositoryError::Persistence(_))));
    assert_eq!(store.job_count().expect("count should succeed"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn earliest_job_is_found_by_deadline(store: InMemoryJobStore) {
    let subscription_id = SubscriptionId::new();
    let later = job_for(subscription_id, "later@example.com", 9);
    let sooner = job_for(subscription_id, "sooner@example.com", 4);
    store
        .upsert_by_calendar_uid(&[later, sooner.clone()])
        .await
        .expect("upsert should succeed");

    let earliest = store
        .find_earliest_for_subscription(subscription_id)
        .await
        .expect("lookup should succeed");
    assert_eq!(earliest.map(|job| job.id()), Some(sooner.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archiving_removes_job_and_assignments(store: InMemoryJobStore) {
    let subscription_id = SubscriptionId::new();
    let job = job_for(subscription_id, "gone@example.com", 2);
    store
        .upsert_by_calendar_uid(std::slice::from_ref(&job))
        .await
        .expect("upsert should succeed");
    store
        .assign(&JobAssignment::new(
            job.id(),
            CleanerId::new(),
            AssignmentRole::Primary,
            &DefaultClock,
        ))
        .await
        .expect("assignment should succeed");

    let cancelled = CancelledJob::from_vanished(&job, &DefaultClock).expect("job has uid");
    store
        .archive_cancelled(&cancelled)
        .await
        .expect("archive should succeed");

    assert!(store.find_by_id(job.id()).await.expect("lookup").is_none());
    assert!(store.find_by_job(job.id()).await.expect("lookup").is_empty());
    let archived = store
        .list_cancelled_for_subscription(subscription_id)
        .await
        .expect("listing should succeed");
    assert_eq!(archived, vec![cancelled]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_archive_failure_keeps_the_live_job(store: InMemoryJobStore) {
    let subscription_id = SubscriptionId::new();
    let job = job_for(subscription_id, "stuck@example.com", 2);
    store
        .upsert_by_calendar_uid(std::slice::from_ref(&job))
        .await
        .expect("upsert should succeed");
    store
        .fail_archive_for(job.id())
        .expect("injection should succeed");

    let cancelled = CancelledJob::from_vanished(&job, &DefaultClock).expect("job has uid");
    let result = store.archive_cancelled(&cancelled).await;

    assert!(result.is_err());
    assert!(store.find_by_id(job.id()).await.expect("lookup").is_some());
    assert!(
        store
            .list_cancelled_for_subscription(subscription_id)
            .await
            .expect("listing should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigning_to_unknown_job_fails(store: InMemoryJobStore) {
    let job = job_for(SubscriptionId::new(), "never-stored@example.com", 2);
    let result = store
        .assign(&JobAssignment::new(
            job.id(),
            CleanerId::new(),
            AssignmentRole::Backup,
            &DefaultClock,
        ))
        .await;
    assert!(matches!(result, Err(JobRepositoryError::NotFound(id)) if id == job.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassigning_a_cleaner_replaces_the_role(store: InMemoryJobStore) {
    let job = job_for(SubscriptionId::new(), "busy@example.com", 2);
    store
        .upsert_by_calendar_uid(std::slice::from_ref(&job))
        .await
        .expect("upsert should succeed");
    let cleaner_id = CleanerId::new();
    store
        .assign(&JobAssignment::new(job.id(), cleaner_id, AssignmentRole::Backup, &DefaultClock))
        .await
        .expect("first assignment should succeed");
    store
        .assign(
            &JobAssignment::new(job.id(), cleaner_id, AssignmentRole::OnCall, &DefaultClock)
                .with_urgent_bonus(),
        )
        .await
        .expect("second assignment should succeed");

    let assignments = store.find_by_job(job.id()).await.expect("lookup");

    assert_eq!(assignments.len(), 1);
    let assignment = assignments.first().expect("one assignment");
    assert_eq!(assignment.role(), AssignmentRole::OnCall);
    assert!(assignment.urgent_bonus());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_assignments_reports_the_count(store: InMemoryJobStore) {
    let job = job_for(SubscriptionId::new(), "team@example.com", 2);
    store
        .upsert_by_calendar_uid(std::slice::from_ref(&job))
        .await
        .expect("upsert should succeed");
    for role in [AssignmentRole::Primary, AssignmentRole::LaundryLead] {
        store
            .assign(&JobAssignment::new(job.id(), CleanerId::new(), role, &DefaultClock))
            .await
            .expect("assignment should succeed");
    }

    let removed = store.delete_for_job(job.id()).await.expect("delete");

    assert_eq!(removed, 2);
    assert!(store.find_by_job(job.id()).await.expect("lookup").is_empty());
}
