//! Shared wiring for in-memory sync and reconciliation tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::Arc;
use turnover::calendar::{
    adapters::memory::InMemoryCalendarSource,
    domain::{CalendarDate, CalendarEvent, CalendarEventUid, CalendarUrl},
};
use turnover::job::{adapters::memory::InMemoryJobStore, ports::JobRepository};
use turnover::property::{
    adapters::memory::InMemoryPropertyDirectory,
    domain::{
        BathroomCount, LaundryType, Property, PropertyId, Subscription, SubscriptionId,
        SubscriptionStatus,
    },
};
use turnover::sync::SyncSettings;
use turnover::sync::services::{
    BulkCancellationOrchestrator, CalendarSyncService, CancellationDetector, ContextResolver,
};

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

type Directory = InMemoryPropertyDirectory;

/// Sync service over in-memory adapters.
pub type TestSyncService =
    CalendarSyncService<Directory, Directory, InMemoryCalendarSource, InMemoryJobStore, FixedClock>;

/// Cancellation detector over in-memory adapters.
pub type TestDetector =
    CancellationDetector<Directory, Directory, InMemoryCalendarSource, InMemoryJobStore, FixedClock>;

/// Bulk orchestrator over in-memory adapters.
pub type TestOrchestrator = BulkCancellationOrchestrator<
    Directory,
    Directory,
    InMemoryCalendarSource,
    InMemoryJobStore,
    FixedClock,
>;

/// In-memory stores shared by the services under test.
pub struct Scheduler {
    /// Properties and subscriptions.
    pub directory: Arc<Directory>,
    /// Calendar feeds keyed by URL.
    pub source: Arc<InMemoryCalendarSource>,
    /// Live jobs, the archive, and assignments.
    pub jobs: Arc<InMemoryJobStore>,
    /// Pinned clock.
    pub clock: Arc<FixedClock>,
}

/// Provides empty stores with the clock on 24 November 2026, 10:00 in New
/// York, so the horizon opens on 1 December.
#[fixture]
pub fn scheduler() -> Scheduler {
    let now = Utc
        .with_ymd_and_hms(2026, 11, 24, 15, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    Scheduler {
        directory: Arc::new(InMemoryPropertyDirectory::new()),
        source: Arc::new(InMemoryCalendarSource::new()),
        jobs: Arc::new(InMemoryJobStore::new()),
        clock: Arc::new(FixedClock(now)),
    }
}

impl Scheduler {
    fn resolver(&self) -> ContextResolver<Directory, Directory> {
        ContextResolver::new(Arc::clone(&self.directory), Arc::clone(&self.directory))
    }

    /// Builds a sync service with default settings.
    pub fn sync_service(&self) -> TestSyncService {
        CalendarSyncService::new(
            self.resolver(),
            Arc::clone(&self.directory),
            Arc::clone(&self.source),
            Arc::clone(&self.jobs),
            Arc::clone(&self.clock),
            SyncSettings::default(),
        )
    }

    /// Builds a cancellation detector.
    pub fn detector(&self) -> TestDetector {
        CancellationDetector::new(
            self.resolver(),
            Arc::clone(&self.source),
            Arc::clone(&self.jobs),
            Arc::clone(&self.clock),
        )
    }

    /// Builds a bulk orchestrator.
    pub fn orchestrator(&self) -> TestOrchestrator {
        BulkCancellationOrchestrator::new(
            Arc::clone(&self.directory),
            Arc::clone(&self.directory),
            self.detector(),
        )
    }

    /// Stores a property and an active subscription for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects either record.
    pub fn add_subscription(
        &self,
        calendar_url: Option<&CalendarUrl>,
    ) -> Result<SubscriptionId, eyre::Report> {
        let mut property = Property::new(
            PropertyId::new(),
            3,
            BathroomCount::whole(2),
            LaundryType::InUnit,
        );
        if let Some(url) = calendar_url {
            property = property.with_calendar_url(url.clone());
        }
        let subscription =
            Subscription::new(SubscriptionId::new(), property.id(), SubscriptionStatus::Active);
        let id = subscription.id();
        self.directory.insert_property(property)?;
        self.directory.insert_subscription(subscription)?;
        Ok(id)
    }

    /// Publishes back-to-back three-night stays in December 2026.
    ///
    /// # Errors
    ///
    /// Returns an error if a UID or date is invalid.
    pub fn publish(&self, url: &CalendarUrl, uids: &[&str]) -> Result<(), eyre::Report> {
        let events = uids
            .iter()
            .zip(0_u32..)
            .map(|(uid, offset)| stay(uid, 2 + offset * 3))
            .collect::<Result<Vec<_>, _>>()?;
        self.source.set_events(url, events)?;
        Ok(())
    }

    /// Returns the UIDs of the live jobs of a subscription in deadline order.
    ///
    /// # Errors
    ///
    /// Returns an error if the job store fails.
    pub async fn live_uids(
        &self,
        subscription_id: SubscriptionId,
    ) -> Result<Vec<String>, eyre::Report> {
        Ok(self
            .jobs
            .list_for_subscription(subscription_id)
            .await?
            .iter()
            .filter_map(|job| job.calendar_event_uid().map(|uid| uid.as_str().to_owned()))
            .collect())
    }

    /// Returns the UIDs in the archive of a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the job store fails.
    pub async fn archived_uids(
        &self,
        subscription_id: SubscriptionId,
    ) -> Result<Vec<String>, eyre::Report> {
        let mut uids: Vec<String> = self
            .jobs
            .list_cancelled_for_subscription(subscription_id)
            .await?
            .iter()
            .map(|cancelled| cancelled.calendar_event_uid().as_str().to_owned())
            .collect();
        uids.sort();
        Ok(uids)
    }
}

/// Builds a calendar URL under a test host.
///
/// # Errors
///
/// Returns an error if the URL is rejected.
pub fn feed(name: &str) -> Result<CalendarUrl, eyre::Report> {
    Ok(CalendarUrl::new(format!("https://calendar.example.com/{name}.ics"))?)
}

fn stay(uid: &str, first_day: u32) -> Result<CalendarEvent, eyre::Report> {
    Ok(CalendarEvent::all_day(
        CalendarEventUid::new(uid)?,
        CalendarDate::new(2026, 12, first_day)?,
        CalendarDate::new(2026, 12, first_day + 2)?,
    ))
}
