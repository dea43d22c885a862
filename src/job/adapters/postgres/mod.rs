//! `PostgreSQL` adapters for job persistence.

mod models;
mod repository;
mod schema;

pub use repository::{JobPgPool, PostgresJobStore};
