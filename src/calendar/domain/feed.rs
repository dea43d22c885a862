//! The contents of one fetched calendar feed.

use super::{CalendarEvent, CalendarEventUid};
use std::collections::HashSet;

/// Every `VEVENT` identifier in a feed, plus the events that can be scheduled.
///
/// An event whose dates cannot be read is still listed in the feed, so its
/// UID counts as present even though no job can be built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedCalendar {
    events: Vec<CalendarEvent>,
    unschedulable: Vec<CalendarEventUid>,
}

impl FetchedCalendar {
    /// Creates a feed from its schedulable events and the UIDs of events
    /// whose dates could not be read.
    #[must_use]
    pub const fn new(events: Vec<CalendarEvent>, unschedulable: Vec<CalendarEventUid>) -> Self {
        Self {
            events,
            unschedulable,
        }
    }

    /// Creates a feed in which every event is schedulable.
    #[must_use]
    pub const fn from_events(events: Vec<CalendarEvent>) -> Self {
        Self::new(events, Vec::new())
    }

    /// Returns the events with readable dates.
    #[must_use]
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Returns the UIDs of events whose dates could not be read.
    #[must_use]
    pub fn unschedulable_uids(&self) -> &[CalendarEventUid] {
        &self.unschedulable
    }

    /// Returns every UID present in the feed.
    #[must_use]
    pub fn uids(&self) -> HashSet<&str> {
        self.events
            .iter()
            .map(|event| event.uid().as_str())
            .chain(self.unschedulable.iter().map(CalendarEventUid::as_str))
            .collect()
    }

    /// Returns `true` when the feed lists no events at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.unschedulable.is_empty()
    }
}

impl From<Vec<CalendarEvent>> for FetchedCalendar {
    fn from(events: Vec<CalendarEvent>) -> Self {
        Self::from_events(events)
    }
}
