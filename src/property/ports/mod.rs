//! Port contracts for property and subscription access.

pub mod repository;

pub use repository::{
    PropertyRepository, PropertyRepositoryError, PropertyRepositoryResult, SubscriptionRepository,
};
