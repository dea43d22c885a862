//! In-memory adapters for job persistence.

mod store;

pub use store::InMemoryJobStore;
