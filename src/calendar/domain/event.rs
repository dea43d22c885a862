//! Calendar event records and their timestamp values.

use super::{CalendarDomainError, CalendarEventUid};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A date-only calendar value (`VALUE=DATE`).
///
/// Carries just the year, month, and day. It has no time of day and no
/// offset; a canonical local time is attached when the value is resolved in
/// the deployment's operating timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Largest host offset, in hours, that
    /// [`from_shifted_midnight`](Self::from_shifted_midnight) will undo.
    pub const MAX_HOST_OFFSET_HOURS: u32 = 14;

    /// Creates a calendar date from its components.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarDomainError::InvalidDate`] when the components do
    /// not form a real date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarDomainError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(CalendarDomainError::InvalidDate { year, month, day })
    }

    /// Wraps an existing naive date.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Recovers the intended date from a midnight instant that was shifted
    /// by the producing host's timezone.
    ///
    /// A date-only value rendered as "local midnight" on a host west of UTC
    /// arrives as e.g. `06:00Z`. When the UTC hour is a small positive offset
    /// (at most [`MAX_HOST_OFFSET_HOURS`](Self::MAX_HOST_OFFSET_HOURS)) it is
    /// subtracted before the date is taken; otherwise the UTC date is used
    /// as is.
    #[must_use]
    pub fn from_shifted_midnight(instant: DateTime<Utc>) -> Self {
        let offset_hours = instant.hour();
        let normalized = if offset_hours > 0 && offset_hours <= Self::MAX_HOST_OFFSET_HOURS {
            instant - Duration::hours(i64::from(offset_hours))
        } else {
            instant
        };
        Self(normalized.date_naive())
    }

    /// Returns the wrapped naive date.
    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }

    /// Combines the date with a wall-clock time.
    #[must_use]
    pub const fn at(self, time: NaiveTime) -> NaiveDateTime {
        self.0.and_time(time)
    }

    /// Returns the following calendar day.
    #[must_use]
    pub fn next_day(self) -> Self {
        self.0.succ_opt().map_or(self, Self)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

/// A `DTSTART`/`DTEND` value with its iCalendar value type preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventTimestamp {
    /// Date-only (all-day) value.
    Date {
        /// The calendar date.
        date: CalendarDate,
    },
    /// Date-time anchored to UTC.
    Instant {
        /// The absolute instant.
        at: DateTime<Utc>,
    },
    /// Date-time expressed as wall-clock time.
    Local {
        /// Wall-clock date and time.
        date_time: NaiveDateTime,
        /// IANA zone named by the `TZID` parameter; `None` for floating times.
        tzid: Option<String>,
    },
}

impl EventTimestamp {
    /// Creates a date-only timestamp.
    #[must_use]
    pub const fn date(date: CalendarDate) -> Self {
        Self::Date { date }
    }

    /// Creates an absolute timestamp.
    #[must_use]
    pub const fn instant(at: DateTime<Utc>) -> Self {
        Self::Instant { at }
    }

    /// Creates a wall-clock timestamp.
    #[must_use]
    pub const fn local(date_time: NaiveDateTime, tzid: Option<String>) -> Self {
        Self::Local { date_time, tzid }
    }

    /// Returns `true` when the value has no time of day.
    #[must_use]
    pub const fn is_date_only(&self) -> bool {
        matches!(self, Self::Date { .. })
    }
}

/// One `VEVENT` from a property's calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    uid: CalendarEventUid,
    start: EventTimestamp,
    end: EventTimestamp,
}

impl CalendarEvent {
    /// Creates a calendar event.
    #[must_use]
    pub const fn new(uid: CalendarEventUid, start: EventTimestamp, end: EventTimestamp) -> Self {
        Self { uid, start, end }
    }

    /// Creates an all-day event spanning `start` to `end`.
    #[must_use]
    pub const fn all_day(uid: CalendarEventUid, start: CalendarDate, end: CalendarDate) -> Self {
        Self::new(uid, EventTimestamp::date(start), EventTimestamp::date(end))
    }

    /// Creates a timed event between two instants.
    #[must_use]
    pub const fn timed(uid: CalendarEventUid, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(uid, EventTimestamp::instant(start), EventTimestamp::instant(end))
    }

    /// Returns the external event identifier.
    #[must_use]
    pub const fn uid(&self) -> &CalendarEventUid {
        &self.uid
    }

    /// Returns the start (guest arrival) value.
    #[must_use]
    pub const fn start(&self) -> &EventTimestamp {
        &self.start
    }

    /// Returns the end (guest departure) value.
    #[must_use]
    pub const fn end(&self) -> &EventTimestamp {
        &self.end
    }

    /// Returns `true` when the event starts on a date-only value.
    #[must_use]
    pub const fn is_all_day(&self) -> bool {
        self.start.is_date_only()
    }
}
