//! Cleaning jobs, their archive, and cleaner assignments.
//!
//! A job mirrors one booking from a property's calendar and is correlated
//! with it solely through the calendar event UID:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - In-memory and `PostgreSQL` adapters in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
