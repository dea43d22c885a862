//! iCalendar text parsing into [`FetchedCalendar`] records.

use crate::calendar::{
    domain::{CalendarDate, CalendarEvent, CalendarEventUid, EventTimestamp, FetchedCalendar},
    ports::{CalendarFetchError, CalendarFetchResult},
};
use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event,
};
use tracing::{debug, warn};

const ALL_DAY_FLAG: &str = "X-MICROSOFT-CDO-ALLDAYEVENT";

/// Parses an iCalendar document and returns its `VEVENT` components.
///
/// Events without a `UID` are skipped. Date-times on events flagged with
/// `X-MICROSOFT-CDO-ALLDAYEVENT:TRUE` are read back as dates; a UTC instant
/// there is a host-shifted midnight and goes through
/// [`CalendarDate::from_shifted_midnight`]. Events whose `DTSTART` is missing or
/// unreadable keep their UID in the result but yield no schedulable event. A
/// missing `DTEND` falls back to the following day for all-day events and to
/// `DTSTART` for timed events.
///
/// # Errors
///
/// Returns [`CalendarFetchError::Parse`] when the text is not an iCalendar
/// document.
pub fn parse_calendar(text: &str) -> CalendarFetchResult<FetchedCalendar> {
    let body = text.trim_start_matches('\u{feff}').trim_start();
    let starts_with_calendar = body
        .get(..15)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("BEGIN:VCALENDAR"));
    if !starts_with_calendar {
        return Err(CalendarFetchError::Parse(
            "document does not begin with BEGIN:VCALENDAR".to_owned(),
        ));
    }

    let calendar: Calendar = body.parse().map_err(CalendarFetchError::Parse)?;
    let mut events = Vec::new();
    let mut unschedulable = Vec::new();
    for component in &calendar.components {
        let CalendarComponent::Event(event) = component else {
            continue;
        };
        let Some(uid) = event
            .get_uid()
            .and_then(|raw| CalendarEventUid::new(raw).ok())
        else {
            warn!("skipping VEVENT without UID");
            continue;
        };
        let all_day = flagged_all_day(event);
        let Some(start) = event
            .get_start()
            .map(|value| to_timestamp(value, all_day))
        else {
            warn!(%uid, "VEVENT has no readable DTSTART; kept for cancellation checks only");
            unschedulable.push(uid);
            continue;
        };
        let end = event
            .get_end()
            .map_or_else(|| default_end(&start), |value| to_timestamp(value, all_day));
        events.push(CalendarEvent::new(uid, start, end));
    }

    debug!(
        events = events.len(),
        unschedulable = unschedulable.len(),
        "parsed calendar feed"
    );
    Ok(FetchedCalendar::new(events, unschedulable))
}

fn default_end(start: &EventTimestamp) -> EventTimestamp {
    match start {
        EventTimestamp::Date { date } => EventTimestamp::date(date.next_day()),
        other => other.clone(),
    }
}

fn flagged_all_day(event: &Event) -> bool {
    event
        .property_value(ALL_DAY_FLAG)
        .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("TRUE"))
}

fn to_timestamp(value: DatePerhapsTime, all_day: bool) -> EventTimestamp {
    match value {
        DatePerhapsTime::Date(date) => EventTimestamp::date(CalendarDate::from_naive(date)),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(at)) if all_day => {
            EventTimestamp::date(CalendarDate::from_shifted_midnight(at))
        }
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(at)) => EventTimestamp::instant(at),
        DatePerhapsTime::DateTime(
            CalendarDateTime::Floating(date_time)
            | CalendarDateTime::WithTimezone { date_time, .. },
        ) if all_day => EventTimestamp::date(CalendarDate::from_naive(date_time.date())),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(date_time)) => {
            EventTimestamp::local(date_time, None)
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            EventTimestamp::local(date_time, Some(tzid))
        }
    }
}
