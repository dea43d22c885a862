//! Then steps for calendar reconciliation BDD scenarios.

use super::world::{ReconciliationWorld, run_async};
use rstest_bdd_macros::then;
use turnover::job::{
    domain::{CancellationSource, Job, JobStatus},
    ports::JobRepository,
};
use turnover::sync::services::CancellationDetectionError;

fn live_jobs(world: &ReconciliationWorld) -> Result<Vec<Job>, eyre::Report> {
    let subscription_id = world.subscription()?;
    Ok(run_async(world.jobs.list_for_subscription(subscription_id))?)
}

#[then("the property has {count:usize} live jobs")]
fn property_has_jobs(world: &ReconciliationWorld, count: usize) -> Result<(), eyre::Report> {
    let jobs = live_jobs(world)?;
    if jobs.len() != count {
        return Err(eyre::eyre!("expected {count} live jobs, found {}", jobs.len()));
    }
    Ok(())
}

#[then("every live job is unassigned")]
fn every_job_unassigned(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    if let Some(job) = live_jobs(world)?
        .iter()
        .find(|job| job.status() != JobStatus::Unassigned)
    {
        return Err(eyre::eyre!(
            "job {} has status {}",
            job.id(),
            job.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"booking "{uid}" is archived as auto-detected"#)]
fn booking_archived(world: &ReconciliationWorld, uid: String) -> Result<(), eyre::Report> {
    let subscription_id = world.subscription()?;
    let archive = run_async(world.jobs.list_cancelled_for_subscription(subscription_id))?;
    let entry = archive
        .iter()
        .find(|cancelled| cancelled.calendar_event_uid().as_str() == uid)
        .ok_or_else(|| eyre::eyre!("booking {uid} is not in the archive"))?;
    if entry.cancellation_source() != CancellationSource::AutoDetected {
        return Err(eyre::eyre!(
            "expected auto-detected cancellation, found {}",
            entry.cancellation_source().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the live jobs are "{uids}""#)]
fn live_jobs_are(world: &ReconciliationWorld, uids: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = uids.split(',').map(str::trim).collect();
    let jobs = live_jobs(world)?;
    let actual: Vec<&str> = jobs
        .iter()
        .filter_map(|job| job.calendar_event_uid().map(|uid| uid.as_str()))
        .collect();
    if actual != expected {
        return Err(eyre::eyre!("expected live jobs {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("detection fails without archiving anything")]
fn detection_failed(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_detection
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing detection result in scenario world"))?;
    if !matches!(result, Err(CancellationDetectionError::Fetch(_))) {
        return Err(eyre::eyre!("expected a fetch failure, got {result:?}"));
    }
    let subscription_id = world.subscription()?;
    let archive = run_async(world.jobs.list_cancelled_for_subscription(subscription_id))?;
    if !archive.is_empty() {
        return Err(eyre::eyre!("archive should be empty, found {}", archive.len()));
    }
    Ok(())
}
