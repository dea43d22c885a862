//! Port contracts for job persistence.

pub mod repository;

pub use repository::{
    AssignmentRepository, JobRepository, JobRepositoryError, JobRepositoryResult,
};
