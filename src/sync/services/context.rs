//! Resolution of a sync target to its subscription, property, and feed.

use crate::calendar::domain::CalendarUrl;
use crate::property::{
    domain::{Property, PropertyId, SubscriptionId},
    ports::{PropertyRepository, PropertyRepositoryError, SubscriptionRepository},
};
use std::sync::Arc;
use thiserror::Error;

/// What a caller asked to synchronize or reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncTarget {
    /// A subscription and, through it, its property.
    Subscription(SubscriptionId),
    /// A property and its active subscription.
    Property(PropertyId),
}

impl SyncTarget {
    /// Chooses a target from optional identifiers, preferring the
    /// subscription when both are given.
    ///
    /// # Errors
    ///
    /// Returns [`ContextResolutionError::MissingTarget`] when neither is
    /// given.
    pub const fn from_parts(
        subscription_id: Option<SubscriptionId>,
        property_id: Option<PropertyId>,
    ) -> Result<Self, ContextResolutionError> {
        match (subscription_id, property_id) {
            (Some(id), _) => Ok(Self::Subscription(id)),
            (None, Some(id)) => Ok(Self::Property(id)),
            (None, None) => Err(ContextResolutionError::MissingTarget),
        }
    }
}

/// Subscription, property, and feed that a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncContext {
    subscription_id: SubscriptionId,
    property: Property,
    calendar_url: CalendarUrl,
}

impl SyncContext {
    /// Returns the subscription whose jobs are written.
    #[must_use]
    pub const fn subscription_id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// Returns the property identifier.
    #[must_use]
    pub const fn property_id(&self) -> PropertyId {
        self.property.id()
    }

    /// Returns the property as loaded during resolution.
    #[must_use]
    pub const fn property(&self) -> &Property {
        &self.property
    }

    /// Returns the calendar feed to fetch.
    #[must_use]
    pub const fn calendar_url(&self) -> &CalendarUrl {
        &self.calendar_url
    }
}

/// Reasons a target could not be resolved. None of them has side effects.
#[derive(Debug, Clone, Error)]
pub enum ContextResolutionError {
    /// Neither a subscription nor a property was given.
    #[error("either a subscription or a property must be given")]
    MissingTarget,

    /// The subscription does not exist.
    #[error("subscription not found: {0}")]
    SubscriptionNotFound(SubscriptionId),

    /// The property does not exist.
    #[error("property not found: {0}")]
    PropertyNotFound(PropertyId),

    /// The property has no calendar feed.
    #[error("no calendar URL configured for property {0}")]
    NoCalendarConfigured(PropertyId),

    /// The property has no active subscription.
    #[error("no active subscription for property {0}")]
    NoActiveSubscription(PropertyId),

    /// A lookup failed.
    #[error(transparent)]
    Repository(#[from] PropertyRepositoryError),
}

/// Read-only resolver from [`SyncTarget`] to [`SyncContext`].
#[derive(Clone)]
pub struct ContextResolver<S, P>
where
    S: SubscriptionRepository,
    P: PropertyRepository,
{
    subscriptions: Arc<S>,
    properties: Arc<P>,
}

impl<S, P> ContextResolver<S, P>
where
    S: SubscriptionRepository,
    P: PropertyRepository,
{
    /// Creates a resolver over the subscription and property stores.
    #[must_use]
    pub const fn new(subscriptions: Arc<S>, properties: Arc<P>) -> Self {
        Self {
            subscriptions,
            properties,
        }
    }

    /// Resolves a target.
    ///
    /// A subscription target does not check the subscription's status; a
    /// property target requires an active subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ContextResolutionError`] when a record is missing, the
    /// property has no calendar, or a lookup fails.
    pub async fn resolve(
        &self,
        target: SyncTarget,
    ) -> Result<SyncContext, ContextResolutionError> {
        match target {
            SyncTarget::Subscription(subscription_id) => {
                let subscription = self
                    .subscriptions
                    .find_by_id(subscription_id)
                    .await?
                    .ok_or(ContextResolutionError::SubscriptionNotFound(subscription_id))?;
                let property = self.load_property(subscription.property_id()).await?;
                let calendar_url = require_calendar(&property)?;
                Ok(SyncContext {
                    subscription_id,
                    property,
                    calendar_url,
                })
            }
            SyncTarget::Property(property_id) => {
                let property = self.load_property(property_id).await?;
                let calendar_url = require_calendar(&property)?;
                let subscription = self
                    .subscriptions
                    .find_active_for_property(property_id)
                    .await?
                    .ok_or(ContextResolutionError::NoActiveSubscription(property_id))?;
                Ok(SyncContext {
                    subscription_id: subscription.id(),
                    property,
                    calendar_url,
                })
            }
        }
    }

    async fn load_property(
        &self,
        property_id: PropertyId,
    ) -> Result<Property, ContextResolutionError> {
        self.properties
            .find_by_id(property_id)
            .await?
            .ok_or(ContextResolutionError::PropertyNotFound(property_id))
    }
}

fn require_calendar(property: &Property) -> Result<CalendarUrl, ContextResolutionError> {
    property
        .calendar_url()
        .cloned()
        .ok_or(ContextResolutionError::NoCalendarConfigured(property.id()))
}
