//! Adapter implementations for the calendar source port.

pub mod memory;

mod http;
mod parser;

pub use http::{HttpCalendarSource, HttpSourceConfig};
pub use parser::parse_calendar;
