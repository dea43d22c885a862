//! Turnover: calendar-driven cleaning job scheduling.
//!
//! This crate keeps a table of cleaning jobs in step with the booking
//! calendars of short-term rental properties. Each booking in a property's
//! iCalendar feed yields one job between the guest's departure and the next
//! guest's arrival; jobs whose booking leaves the feed are archived.
//!
//! # Architecture
//!
//! Turnover follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, `PostgreSQL`,
//!   in-memory)
//!
//! # Modules
//!
//! - [`calendar`]: Feed retrieval and iCalendar parsing
//! - [`property`]: Properties and their subscriptions
//! - [`job`]: Cleaning jobs, their archive, and cleaner assignments
//! - [`sync`]: Synchronization and cancellation reconciliation

pub mod calendar;
pub mod job;
pub mod property;
pub mod sync;
