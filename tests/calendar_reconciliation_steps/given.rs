//! Given steps for calendar reconciliation BDD scenarios.

use super::world::{ReconciliationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use turnover::calendar::domain::CalendarUrl;
use turnover::property::domain::{
    BathroomCount, LaundryType, Property, PropertyId, Subscription, SubscriptionId,
    SubscriptionStatus,
};
use turnover::sync::services::SyncTarget;

#[given(r#"a subscribed property whose calendar lists bookings "{uids}""#)]
fn subscribed_property_with_bookings(
    world: &mut ReconciliationWorld,
    uids: String,
) -> Result<(), eyre::Report> {
    let url = CalendarUrl::new("https://calendar.example.com/scenario.ics")
        .wrap_err("construct scenario calendar URL")?;
    let property = Property::new(
        PropertyId::new(),
        2,
        BathroomCount::whole(2),
        LaundryType::OffSite,
    )
    .with_calendar_url(url.clone());
    let subscription =
        Subscription::new(SubscriptionId::new(), property.id(), SubscriptionStatus::Active);

    world.subscription_id = Some(subscription.id());
    world.calendar_url = Some(url);
    world.directory.insert_property(property)?;
    world.directory.insert_subscription(subscription)?;
    world.publish(&uids)
}

#[given("the calendar has been synchronised")]
fn calendar_synchronised(world: &mut ReconciliationWorld) -> Result<(), eyre::Report> {
    let subscription_id = world.subscription()?;
    run_async(world.sync.sync(SyncTarget::Subscription(subscription_id)))
        .wrap_err("initial sync for scenario")?;
    Ok(())
}
