//! Calendar synchronization and cancellation reconciliation.
//!
//! A sync turns the bookings in a property's calendar feed into cleaning
//! jobs; reconciliation archives jobs whose booking has left the feed:
//!
//! - Deployment settings in [`SyncSettings`]
//! - The event-to-job transformation and run reports in [`domain`]
//! - Resolution, writing, and orchestration in [`services`]
//!
//! # Concurrency
//!
//! A sync and a cancellation pass for the same subscription must not run at
//! the same time: a job refreshed by one could be archived by the other. The
//! services take no lock; callers run at most one of them per subscription
//! at a time.

mod config;
pub mod domain;
pub mod services;

pub use config::SyncSettings;

#[cfg(test)]
mod tests;
