//! In-memory adapters for property and subscription access.

mod directory;

pub use directory::InMemoryPropertyDirectory;
