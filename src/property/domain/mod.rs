//! Domain model for properties and their subscriptions.
//!
//! Both are owned by onboarding and billing; the scheduler only reads them,
//! apart from the sync bookkeeping kept on each subscription.

mod bathrooms;
mod error;
mod ids;
mod property;
mod subscription;

pub use bathrooms::BathroomCount;
pub use error::{ParseBathroomCountError, ParseLaundryTypeError, ParseSubscriptionStatusError};
pub use ids::{PropertyId, SubscriptionId};
pub use property::{LaundryType, PersistedPropertyData, Property};
pub use subscription::{Subscription, SubscriptionStatus};
