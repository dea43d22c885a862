//! Repository ports for property and subscription lookup.

use crate::property::domain::{Property, PropertyId, Subscription, SubscriptionId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for property and subscription repository operations.
pub type PropertyRepositoryResult<T> = Result<T, PropertyRepositoryError>;

/// Read access to properties.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Finds a property by identifier.
    ///
    /// Returns `None` when the property does not exist.
    async fn find_by_id(&self, id: PropertyId) -> PropertyRepositoryResult<Option<Property>>;
}

/// Read access to subscriptions plus their sync bookkeeping.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Finds a subscription by identifier.
    ///
    /// Returns `None` when the subscription does not exist.
    async fn find_by_id(
        &self,
        id: SubscriptionId,
    ) -> PropertyRepositoryResult<Option<Subscription>>;

    /// Finds an active subscription for the property.
    ///
    /// Returns `None` when the property has no active subscription.
    async fn find_active_for_property(
        &self,
        property_id: PropertyId,
    ) -> PropertyRepositoryResult<Option<Subscription>>;

    /// Lists every active subscription.
    async fn list_active(&self) -> PropertyRepositoryResult<Vec<Subscription>>;

    /// Stores the outcome of a calendar sync attempt.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyRepositoryError::SubscriptionNotFound`] when the
    /// subscription does not exist.
    async fn record_sync_attempt(
        &self,
        id: SubscriptionId,
        attempted_at: DateTime<Utc>,
        failed: bool,
    ) -> PropertyRepositoryResult<()>;
}

/// Errors returned by property and subscription repositories.
#[derive(Debug, Clone, Error)]
pub enum PropertyRepositoryError {
    /// The subscription was not found.
    #[error("subscription not found: {0}")]
    SubscriptionNotFound(SubscriptionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PropertyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
