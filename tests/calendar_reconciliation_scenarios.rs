//! Behaviour tests for calendar synchronization and cancellation detection.

mod calendar_reconciliation_steps;

use calendar_reconciliation_steps::world::{ReconciliationWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/calendar_reconciliation.feature",
    name = "Bookings become jobs exactly once"
)]
#[tokio::test(flavor = "multi_thread")]
async fn bookings_become_jobs_once(world: ReconciliationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/calendar_reconciliation.feature",
    name = "Vanished bookings are archived"
)]
#[tokio::test(flavor = "multi_thread")]
async fn vanished_bookings_are_archived(world: ReconciliationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/calendar_reconciliation.feature",
    name = "Unreachable calendar aborts detection"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_calendar_aborts_detection(world: ReconciliationWorld) {
    let _ = world;
}
