//! When steps for calendar reconciliation BDD scenarios.

use super::world::{ReconciliationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use turnover::sync::services::SyncTarget;

#[when("the calendar is synchronised twice")]
fn synchronise_twice(world: &mut ReconciliationWorld) -> Result<(), eyre::Report> {
    let target = SyncTarget::Subscription(world.subscription()?);
    run_async(world.sync.sync(target)).wrap_err("first sync")?;
    run_async(world.sync.sync(target)).wrap_err("second sync")?;
    Ok(())
}

#[when(r#"the calendar now lists bookings "{uids}""#)]
fn calendar_now_lists(world: &mut ReconciliationWorld, uids: String) -> Result<(), eyre::Report> {
    world.publish(&uids)
}

#[when("the calendar becomes unreachable")]
fn calendar_unreachable(world: &mut ReconciliationWorld) -> Result<(), eyre::Report> {
    let url = world.calendar()?;
    world.source.set_failure(&url, "connection refused")?;
    Ok(())
}

#[when("cancellations are detected")]
fn detect_cancellations(world: &mut ReconciliationWorld) -> Result<(), eyre::Report> {
    let target = SyncTarget::Subscription(world.subscription()?);
    world.last_detection = Some(run_async(world.detector.detect(target)));
    Ok(())
}
