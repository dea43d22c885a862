//! Step definitions for calendar reconciliation scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
