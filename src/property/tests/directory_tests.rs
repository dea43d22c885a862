//! Tests for the in-memory property directory.

use crate::property::{
    adapters::memory::InMemoryPropertyDirectory,
    domain::{
        BathroomCount, LaundryType, Property, PropertyId, Subscription, SubscriptionId,
        SubscriptionStatus,
    },
    ports::{PropertyRepository, PropertyRepositoryError, SubscriptionRepository},
};
use chrono::Utc;
use rstest::{fixture, rstest};

#[fixture]
fn directory() -> InMemoryPropertyDirectory {
    InMemoryPropertyDirectory::new()
}

fn subscription_with(status: SubscriptionStatus, property_id: PropertyId) -> Subscription {
    Subscription::new(SubscriptionId::new(), property_id, status)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_property_is_found(directory: InMemoryPropertyDirectory) {
    let property = Property::new(
        PropertyId::new(),
        2,
        BathroomCount::whole(1),
        LaundryType::InUnit,
    );
    directory
        .insert_property(property.clone())
        .expect("insert should succeed");

    let found = PropertyRepository::find_by_id(&directory, property.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(found, Some(property));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_active_skips_inactive_and_keeps_insertion_order(
    directory: InMemoryPropertyDirectory,
) {
    let first = subscription_with(SubscriptionStatus::Active, PropertyId::new());
    let paused = subscription_with(SubscriptionStatus::Paused, PropertyId::new());
    let second = subscription_with(SubscriptionStatus::Active, PropertyId::new());
    for subscription in [&first, &paused, &second] {
        directory
            .insert_subscription(subscription.clone())
            .expect("insert should succeed");
    }

    let active = directory.list_active().await.expect("listing should succeed");
    let ids: Vec<_> = active.iter().map(Subscription::id).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_subscription_lookup_ignores_paused(directory: InMemoryPropertyDirectory) {
    let property_id = PropertyId::new();
    directory
        .insert_subscription(subscription_with(SubscriptionStatus::Paused, property_id))
        .expect("insert should succeed");

    let found = directory
        .find_active_for_property(property_id)
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sync_attempt_is_recorded(directory: InMemoryPropertyDirectory) {
    let subscription = subscription_with(SubscriptionStatus::Active, PropertyId::new());
    directory
        .insert_subscription(subscription.clone())
        .expect("insert should succeed");
    let attempted_at = Utc::now();

    directory
        .record_sync_attempt(subscription.id(), attempted_at, true)
        .await
        .expect("recording should succeed");

    let stored = SubscriptionRepository::find_by_id(&directory, subscription.id())
        .await
        .expect("lookup should succeed")
        .expect("subscription should exist");
    assert_eq!(stored.last_sync_attempt(), Some(attempted_at));
    assert!(stored.calendar_sync_failed());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recording_unknown_subscription_fails(directory: InMemoryPropertyDirectory) {
    let id = SubscriptionId::new();
    let result = directory.record_sync_attempt(id, Utc::now(), false).await;
    assert!(matches!(
        result,
        Err(PropertyRepositoryError::SubscriptionNotFound(missing)) if missing == id
    ));
}
