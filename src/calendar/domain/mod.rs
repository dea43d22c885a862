//! Domain model for calendar feeds.
//!
//! Events keep the distinction between date-only and date-time values so
//! that canonical local times can be attached later in one explicit
//! timezone lookup.

mod error;
mod event;
mod feed;
mod ids;

pub use error::CalendarDomainError;
pub use event::{CalendarDate, CalendarEvent, EventTimestamp};
pub use feed::FetchedCalendar;
pub use ids::{CalendarEventUid, CalendarUrl};
