//! Event-to-job transformation.
//!
//! Each booking produces one clean: it may start when the guest departs and
//! must finish before the next guest arrives. Date-only values carry no time
//! of day, so they are given the configured departure or arrival time in the
//! operating timezone before being converted to an instant.

use super::{LocalTimeGap, ScheduleError};
use crate::calendar::domain::{CalendarEvent, CalendarEventUid, EventTimestamp};
use crate::job::domain::{AddonsSnapshot, ExpectedHours, JobDraft};
use crate::property::domain::{Property, SubscriptionId};
use crate::sync::SyncSettings;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::HashSet;
use tracing::debug;

/// Converts calendar values to instants in the operating timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeResolver {
    timezone: Tz,
    departure_time: NaiveTime,
    arrival_time: NaiveTime,
}

impl TimeResolver {
    /// Creates a resolver from deployment settings.
    #[must_use]
    pub const fn new(settings: &SyncSettings) -> Self {
        Self {
            timezone: settings.timezone(),
            departure_time: settings.departure_time(),
            arrival_time: settings.arrival_time(),
        }
    }

    /// Returns the operating timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Resolves a guest departure; date-only values get the departure time.
    ///
    /// # Errors
    ///
    /// Returns [`LocalTimeGap`] when the wall-clock time does not exist.
    pub fn resolve_departure(
        &self,
        value: &EventTimestamp,
    ) -> Result<DateTime<Utc>, LocalTimeGap> {
        self.resolve(value, self.departure_time)
    }

    /// Resolves a guest arrival; date-only values get the arrival time.
    ///
    /// # Errors
    ///
    /// Returns [`LocalTimeGap`] when the wall-clock time does not exist.
    pub fn resolve_arrival(
        &self,
        value: &EventTimestamp,
    ) -> Result<DateTime<Utc>, LocalTimeGap> {
        self.resolve(value, self.arrival_time)
    }

    /// Returns the arrival time on `date` in the operating timezone.
    ///
    /// # Errors
    ///
    /// Returns [`LocalTimeGap`] when the wall-clock time does not exist.
    pub fn arrival_on(&self, date: NaiveDate) -> Result<DateTime<Utc>, LocalTimeGap> {
        localize(date.and_time(self.arrival_time), self.timezone)
    }

    /// Returns the calendar date of `instant` in the operating timezone.
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// Returns the first date eligible for scheduling: today in the operating
    /// timezone plus `horizon_days`.
    #[must_use]
    pub fn horizon_start(&self, now: DateTime<Utc>, horizon_days: u32) -> NaiveDate {
        self.local_date(now)
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    fn resolve(
        &self,
        value: &EventTimestamp,
        date_only_time: NaiveTime,
    ) -> Result<DateTime<Utc>, LocalTimeGap> {
        match value {
            EventTimestamp::Date { date } => localize(date.at(date_only_time), self.timezone),
            EventTimestamp::Instant { at } => Ok(*at),
            EventTimestamp::Local { date_time, tzid } => {
                let zone = tzid
                    .as_deref()
                    .and_then(|name| name.parse::<Tz>().ok())
                    .unwrap_or(self.timezone);
                localize(*date_time, zone)
            }
        }
    }
}

/// Maps a wall-clock time to an instant, taking the earlier reading when the
/// time is ambiguous.
fn localize(local: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>, LocalTimeGap> {
    zone.from_local_datetime(&local)
        .earliest()
        .map(|resolved| resolved.with_timezone(&Utc))
        .ok_or_else(|| LocalTimeGap {
            local,
            timezone: zone.name().to_owned(),
        })
}

/// Result of transforming one calendar feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// One draft per event inside the horizon, sorted by guest arrival.
    pub drafts: Vec<JobDraft>,
    /// Events that could not be scheduled.
    pub skipped: Vec<ScheduleError>,
    /// Number of events dropped for starting before the horizon.
    pub outside_horizon: usize,
}

#[derive(Debug, Clone)]
struct ResolvedStay {
    uid: CalendarEventUid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    fallback_deadline: DateTime<Utc>,
}

fn resolve_stay(
    resolver: &TimeResolver,
    event: &CalendarEvent,
) -> Result<ResolvedStay, ScheduleError> {
    let to_error = |gap| ScheduleError::NonexistentLocalTime {
        uid: event.uid().clone(),
        gap,
    };
    let start = resolver.resolve_arrival(event.start()).map_err(to_error)?;
    let end = resolver.resolve_departure(event.end()).map_err(to_error)?;
    let end_date = match event.end() {
        EventTimestamp::Date { date } => date.as_naive(),
        EventTimestamp::Instant { .. } | EventTimestamp::Local { .. } => resolver.local_date(end),
    };
    let same_day_arrival = resolver.arrival_on(end_date).map_err(to_error)?;
    let fallback_deadline = if same_day_arrival > end {
        same_day_arrival
    } else {
        debug!(
            uid = %event.uid(),
            "departure is not before the arrival time; deadline moved to the next day"
        );
        let next_day = end_date.succ_opt().unwrap_or(end_date);
        resolver.arrival_on(next_day).map_err(to_error)?
    };
    Ok(ResolvedStay {
        uid: event.uid().clone(),
        start,
        end,
        fallback_deadline,
    })
}

/// Builds job drafts for the events of one subscription's calendar.
///
/// Events are sorted by resolved arrival and those arriving before
/// `earliest_start` (a date in the operating timezone) are dropped. Each
/// remaining event's job may start at its departure and is due at the next
/// remaining event's arrival, or at the arrival time on its own departure
/// date when it is the last one. A last departure at or after that arrival
/// time is due at the arrival time on the following day instead.
#[must_use]
pub fn build_job_drafts(
    events: &[CalendarEvent],
    subscription_id: SubscriptionId,
    property: &Property,
    resolver: &TimeResolver,
    earliest_start: NaiveDate,
) -> Schedule {
    let mut skipped = Vec::new();
    let mut seen = HashSet::new();
    let mut stays = Vec::with_capacity(events.len());

    for event in events {
        if !seen.insert(event.uid()) {
            skipped.push(ScheduleError::DuplicateUid {
                uid: event.uid().clone(),
            });
            continue;
        }
        match resolve_stay(resolver, event) {
            Ok(stay) => stays.push(stay),
            Err(err) => skipped.push(err),
        }
    }

    stays.sort_by_key(|stay| stay.start);
    let resolved_count = stays.len();
    stays.retain(|stay| resolver.local_date(stay.start) >= earliest_start);
    let outside_horizon = resolved_count - stays.len();

    let expected_hours = ExpectedHours::estimate(property);
    let addons_snapshot = AddonsSnapshot::capture(property);
    let next_arrivals = stays
        .iter()
        .skip(1)
        .map(|next| Some(next.start))
        .chain(std::iter::once(None));

    let drafts = stays
        .iter()
        .zip(next_arrivals)
        .map(|(stay, next_arrival)| JobDraft {
            subscription_id,
            property_id: property.id(),
            calendar_event_uid: stay.uid.clone(),
            check_in_time: stay.end,
            check_out_time: next_arrival.unwrap_or(stay.fallback_deadline),
            expected_hours,
            addons_snapshot: addons_snapshot.clone(),
        })
        .collect();

    Schedule {
        drafts,
        skipped,
        outside_horizon,
    }
}
