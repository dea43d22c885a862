//! Shared world state for calendar reconciliation BDD scenarios.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::Arc;
use turnover::calendar::{
    adapters::memory::InMemoryCalendarSource,
    domain::{CalendarDate, CalendarEvent, CalendarEventUid, CalendarUrl},
};
use turnover::job::adapters::memory::InMemoryJobStore;
use turnover::property::{
    adapters::memory::InMemoryPropertyDirectory,
    domain::SubscriptionId,
};
use turnover::sync::SyncSettings;
use turnover::sync::domain::CancellationReport;
use turnover::sync::services::{
    CalendarSyncService, CancellationDetectionError, CancellationDetector, ContextResolver,
};

/// Clock pinned to 24 November 2026, 10:00 in New York.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioClock;

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 24, 15, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

type Directory = InMemoryPropertyDirectory;

/// Sync service used by the BDD world.
pub type ScenarioSyncService = CalendarSyncService<
    Directory,
    Directory,
    InMemoryCalendarSource,
    InMemoryJobStore,
    ScenarioClock,
>;

/// Cancellation detector used by the BDD world.
pub type ScenarioDetector = CancellationDetector<
    Directory,
    Directory,
    InMemoryCalendarSource,
    InMemoryJobStore,
    ScenarioClock,
>;

/// Scenario world for calendar reconciliation behaviour tests.
pub struct ReconciliationWorld {
    pub directory: Arc<Directory>,
    pub source: Arc<InMemoryCalendarSource>,
    pub jobs: Arc<InMemoryJobStore>,
    pub sync: ScenarioSyncService,
    pub detector: ScenarioDetector,
    pub calendar_url: Option<CalendarUrl>,
    pub subscription_id: Option<SubscriptionId>,
    pub last_detection: Option<Result<CancellationReport, CancellationDetectionError>>,
}

impl ReconciliationWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryPropertyDirectory::new());
        let source = Arc::new(InMemoryCalendarSource::new());
        let jobs = Arc::new(InMemoryJobStore::new());
        let clock = Arc::new(ScenarioClock);
        let resolver = ContextResolver::new(Arc::clone(&directory), Arc::clone(&directory));
        let sync = CalendarSyncService::new(
            resolver.clone(),
            Arc::clone(&directory),
            Arc::clone(&source),
            Arc::clone(&jobs),
            Arc::clone(&clock),
            SyncSettings::default(),
        );
        let detector =
            CancellationDetector::new(resolver, Arc::clone(&source), Arc::clone(&jobs), clock);
        Self {
            directory,
            source,
            jobs,
            sync,
            detector,
            calendar_url: None,
            subscription_id: None,
            last_detection: None,
        }
    }

    /// Returns the subscription created by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no subscription has been set up.
    pub fn subscription(&self) -> Result<SubscriptionId, eyre::Report> {
        self.subscription_id
            .ok_or_else(|| eyre::eyre!("missing subscription in scenario world"))
    }

    /// Returns the calendar URL created by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no calendar has been set up.
    pub fn calendar(&self) -> Result<CalendarUrl, eyre::Report> {
        self.calendar_url
            .clone()
            .ok_or_else(|| eyre::eyre!("missing calendar in scenario world"))
    }

    /// Publishes back-to-back stays for a comma-separated list of UIDs.
    ///
    /// # Errors
    ///
    /// Returns an error when a UID is blank or the source rejects the feed.
    pub fn publish(&self, uids: &str) -> Result<(), eyre::Report> {
        let url = self.calendar()?;
        let events = uids
            .split(',')
            .zip(0_u32..)
            .map(|(uid, offset)| {
                Ok(CalendarEvent::all_day(
                    CalendarEventUid::new(uid.trim())?,
                    CalendarDate::new(2026, 12, 2 + offset * 3)?,
                    CalendarDate::new(2026, 12, 4 + offset * 3)?,
                ))
            })
            .collect::<Result<Vec<_>, eyre::Report>>()?;
        self.source.set_events(&url, events)?;
        Ok(())
    }
}

impl Default for ReconciliationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReconciliationWorld {
    ReconciliationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
