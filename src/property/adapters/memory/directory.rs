//! In-memory property and subscription directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::property::{
    domain::{Property, PropertyId, Subscription, SubscriptionId},
    ports::{
        PropertyRepository, PropertyRepositoryError, PropertyRepositoryResult,
        SubscriptionRepository,
    },
};

/// Thread-safe in-memory store for properties and subscriptions.
///
/// Subscriptions are listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPropertyDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    properties: HashMap<PropertyId, Property>,
    subscriptions: Vec<Subscription>,
}

impl InMemoryPropertyDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a property.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyRepositoryError::Persistence`] when lock acquisition
    /// fails.
    pub fn insert_property(&self, property: Property) -> PropertyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.properties.insert(property.id(), property);
        Ok(())
    }

    /// Inserts or replaces a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyRepositoryError::Persistence`] when lock acquisition
    /// fails.
    pub fn insert_subscription(&self, subscription: Subscription) -> PropertyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(existing) = state
            .subscriptions
            .iter_mut()
            .find(|candidate| candidate.id() == subscription.id())
        {
            *existing = subscription;
        } else {
            state.subscriptions.push(subscription);
        }
        Ok(())
    }
}

fn lock_error(err: impl ToString) -> PropertyRepositoryError {
    PropertyRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyDirectory {
    async fn find_by_id(&self, id: PropertyId) -> PropertyRepositoryResult<Option<Property>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.properties.get(&id).cloned())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryPropertyDirectory {
    async fn find_by_id(
        &self,
        id: SubscriptionId,
    ) -> PropertyRepositoryResult<Option<Subscription>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .subscriptions
            .iter()
            .find(|subscription| subscription.id() == id)
            .cloned())
    }

    async fn find_active_for_property(
        &self,
        property_id: PropertyId,
    ) -> PropertyRepositoryResult<Option<Subscription>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .subscriptions
            .iter()
            .find(|subscription| {
                subscription.property_id() == property_id && subscription.status().is_active()
            })
            .cloned())
    }

    async fn list_active(&self) -> PropertyRepositoryResult<Vec<Subscription>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .subscriptions
            .iter()
            .filter(|subscription| subscription.status().is_active())
            .cloned()
            .collect())
    }

    async fn record_sync_attempt(
        &self,
        id: SubscriptionId,
        attempted_at: DateTime<Utc>,
        failed: bool,
    ) -> PropertyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let subscription = state
            .subscriptions
            .iter_mut()
            .find(|subscription| subscription.id() == id)
            .ok_or(PropertyRepositoryError::SubscriptionNotFound(id))?;
        *subscription = Subscription::from_persisted(
            subscription.id(),
            subscription.property_id(),
            subscription.status(),
            Some(attempted_at),
            failed,
        );
        Ok(())
    }
}
