//! Errors raised while turning individual calendar events into jobs.

use crate::calendar::domain::CalendarEventUid;
use chrono::NaiveDateTime;
use thiserror::Error;

/// A wall-clock time that falls in a daylight-saving gap.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("local time {local} does not exist in {timezone}")]
pub struct LocalTimeGap {
    /// Wall-clock time that could not be mapped.
    pub local: NaiveDateTime,
    /// Zone the time was resolved in.
    pub timezone: String,
}

/// A calendar event that could not be scheduled.
///
/// These never abort a sync; the event is skipped and reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// One of the event's times does not exist in its zone.
    #[error("event {uid}: {gap}")]
    NonexistentLocalTime {
        /// Offending event.
        uid: CalendarEventUid,
        /// The unmappable time.
        #[source]
        gap: LocalTimeGap,
    },

    /// The feed lists the same UID more than once; the first entry wins.
    #[error("event {uid} appears more than once in the feed")]
    DuplicateUid {
        /// Repeated event UID.
        uid: CalendarEventUid,
    },
}

impl ScheduleError {
    /// Returns the UID of the skipped event.
    #[must_use]
    pub const fn uid(&self) -> &CalendarEventUid {
        match self {
            Self::NonexistentLocalTime { uid, .. } | Self::DuplicateUid { uid } => uid,
        }
    }
}
