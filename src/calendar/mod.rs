//! Calendar feed retrieval and parsing.
//!
//! Fetches a property's iCalendar feed and exposes its `VEVENT` components
//! with the date-only versus date-time distinction preserved:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - HTTP, parser, and in-memory adapters in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
