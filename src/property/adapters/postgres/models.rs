//! Diesel row models for properties and subscriptions.

use super::schema::{properties, subscriptions};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for property records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = properties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PropertyRow {
    /// Property identifier.
    pub id: uuid::Uuid,
    /// Booking calendar feed URL.
    pub calendar_url: Option<String>,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count, with half baths as `0.5`.
    pub bathrooms: f64,
    /// Square footage.
    pub square_feet: Option<i32>,
    /// Laundry service type.
    pub laundry_type: String,
    /// Laundry loads per clean.
    pub laundry_loads: Option<i32>,
    /// Whether hot tub service is part of each clean.
    pub hot_tub_service_enabled: bool,
    /// Hot tub drain cadence.
    pub hot_tub_drain_cadence: Option<String>,
}

/// Query result row for subscription records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubscriptionRow {
    /// Subscription identifier.
    pub id: uuid::Uuid,
    /// Subscribed property.
    pub property_id: uuid::Uuid,
    /// Billing status.
    pub status: String,
    /// Time of the last calendar sync attempt.
    pub last_sync_attempt: Option<DateTime<Utc>>,
    /// Whether the last calendar sync failed.
    pub calendar_sync_failed: bool,
}
