//! Error types for calendar domain validation.

use thiserror::Error;

/// Errors returned while constructing calendar domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalendarDomainError {
    /// The calendar URL is empty or uses an unsupported scheme.
    #[error("invalid calendar URL '{0}', expected http, https, or webcal")]
    InvalidCalendarUrl(String),

    /// The event UID is empty after trimming.
    #[error("calendar event UID must not be empty")]
    EmptyEventUid,

    /// The year, month, and day do not form a valid calendar date.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Calendar month (1-12).
        month: u32,
        /// Day of month.
        day: u32,
    },
}
