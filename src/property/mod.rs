//! Properties and subscriptions as read by the scheduler.
//!
//! Property attributes size each clean and the subscription decides whether
//! a property is synchronized at all:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - In-memory and `PostgreSQL` adapters in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
