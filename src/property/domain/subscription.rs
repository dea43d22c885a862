//! Subscription linking a customer to a property.

use super::{ParseSubscriptionStatusError, PropertyId, SubscriptionId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Billing state of a subscription.
///
/// Only [`SubscriptionStatus::Active`] subscriptions are synchronized or
/// reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Subscription is in good standing.
    Active,
    /// Subscription is temporarily paused by the customer.
    Paused,
    /// Payment is overdue.
    PastDue,
    /// Subscription has ended.
    Canceled,
}

impl SubscriptionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
        }
    }

    /// Returns `true` for subscriptions eligible for calendar sync.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl TryFrom<&str> for SubscriptionStatus {
    type Error = ParseSubscriptionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "past_due" => Ok(Self::PastDue),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(ParseSubscriptionStatusError(value.to_owned())),
        }
    }
}

/// A customer's cleaning subscription for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    id: SubscriptionId,
    property_id: PropertyId,
    status: SubscriptionStatus,
    last_sync_attempt: Option<DateTime<Utc>>,
    calendar_sync_failed: bool,
}

impl Subscription {
    /// Creates a subscription that has never been synchronized.
    #[must_use]
    pub const fn new(
        id: SubscriptionId,
        property_id: PropertyId,
        status: SubscriptionStatus,
    ) -> Self {
        Self {
            id,
            property_id,
            status,
            last_sync_attempt: None,
            calendar_sync_failed: false,
        }
    }

    /// Reconstructs a subscription including its sync bookkeeping.
    #[must_use]
    pub const fn from_persisted(
        id: SubscriptionId,
        property_id: PropertyId,
        status: SubscriptionStatus,
        last_sync_attempt: Option<DateTime<Utc>>,
        calendar_sync_failed: bool,
    ) -> Self {
        Self {
            id,
            property_id,
            status,
            last_sync_attempt,
            calendar_sync_failed,
        }
    }

    /// Returns the subscription identifier.
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns the subscribed property.
    #[must_use]
    pub const fn property_id(&self) -> PropertyId {
        self.property_id
    }

    /// Returns the billing status.
    #[must_use]
    pub const fn status(&self) -> SubscriptionStatus {
        self.status
    }

    /// Returns when a calendar sync was last attempted.
    #[must_use]
    pub const fn last_sync_attempt(&self) -> Option<DateTime<Utc>> {
        self.last_sync_attempt
    }

    /// Returns `true` when the most recent calendar sync failed.
    #[must_use]
    pub const fn calendar_sync_failed(&self) -> bool {
        self.calendar_sync_failed
    }

    /// Records the outcome of a calendar sync attempt.
    pub fn record_sync_attempt(&mut self, failed: bool, clock: &impl Clock) {
        self.last_sync_attempt = Some(clock.utc());
        self.calendar_sync_failed = failed;
    }
}
