//! Port contracts for calendar feed retrieval.

pub mod source;

pub use source::{CalendarFetchError, CalendarFetchResult, CalendarSource};
