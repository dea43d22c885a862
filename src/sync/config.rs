//! Deployment settings for calendar synchronization.

use chrono::NaiveTime;
use chrono_tz::Tz;
use std::num::NonZeroUsize;

const DEFAULT_HORIZON_DAYS: u32 = 7;
const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

/// Operating timezone, canonical times, and limits for synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    timezone: Tz,
    departure_time: NaiveTime,
    arrival_time: NaiveTime,
    horizon_days: u32,
    batch_size: NonZeroUsize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::New_York,
            departure_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            arrival_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN),
            horizon_days: DEFAULT_HORIZON_DAYS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SyncSettings {
    /// Sets the operating timezone used for date-only values and the horizon.
    #[must_use]
    pub const fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Sets the local time given to date-only guest departures.
    #[must_use]
    pub const fn with_departure_time(mut self, departure_time: NaiveTime) -> Self {
        self.departure_time = departure_time;
        self
    }

    /// Sets the local time given to date-only guest arrivals.
    #[must_use]
    pub const fn with_arrival_time(mut self, arrival_time: NaiveTime) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the minimum lead time, in days, before an event is scheduled.
    #[must_use]
    pub const fn with_horizon_days(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// Sets how many jobs are written per upsert statement.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: NonZeroUsize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Returns the operating timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the local time given to date-only departures.
    #[must_use]
    pub const fn departure_time(&self) -> NaiveTime {
        self.departure_time
    }

    /// Returns the local time given to date-only arrivals.
    #[must_use]
    pub const fn arrival_time(&self) -> NaiveTime {
        self.arrival_time
    }

    /// Returns the sync horizon in days.
    #[must_use]
    pub const fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Returns the upsert batch size.
    #[must_use]
    pub const fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }
}
