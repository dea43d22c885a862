//! Adapter implementations for property and subscription access.

pub mod memory;
pub mod postgres;
