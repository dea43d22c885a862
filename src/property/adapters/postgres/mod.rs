//! `PostgreSQL` adapters for property and subscription access.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresPropertyDirectory, PropertyPgPool};
