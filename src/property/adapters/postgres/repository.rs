//! `PostgreSQL` repository implementation for properties and subscriptions.

use super::{
    models::{PropertyRow, SubscriptionRow},
    schema::{properties, subscriptions},
};
use crate::calendar::domain::CalendarUrl;
use crate::property::{
    domain::{
        BathroomCount, LaundryType, PersistedPropertyData, Property, PropertyId, Subscription,
        SubscriptionId, SubscriptionStatus,
    },
    ports::{
        PropertyRepository, PropertyRepositoryError, PropertyRepositoryResult,
        SubscriptionRepository,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by property adapters.
pub type PropertyPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed property and subscription directory.
#[derive(Debug, Clone)]
pub struct PostgresPropertyDirectory {
    pool: PropertyPgPool,
}

impl PostgresPropertyDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PropertyPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PropertyRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PropertyRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PropertyRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PropertyRepositoryError::persistence)?
    }
}

#[async_trait]
impl PropertyRepository for PostgresPropertyDirectory {
    async fn find_by_id(&self, id: PropertyId) -> PropertyRepositoryResult<Option<Property>> {
        self.run_blocking(move |connection| {
            let row = properties::table
                .filter(properties::id.eq(id.into_inner()))
                .select(PropertyRow::as_select())
                .first::<PropertyRow>(connection)
                .optional()
                .map_err(PropertyRepositoryError::persistence)?;
            row.map(row_to_property).transpose()
        })
        .await
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresPropertyDirectory {
    async fn find_by_id(
        &self,
        id: SubscriptionId,
    ) -> PropertyRepositoryResult<Option<Subscription>> {
        self.run_blocking(move |connection| {
            let row = subscriptions::table
                .filter(subscriptions::id.eq(id.into_inner()))
                .select(SubscriptionRow::as_select())
                .first::<SubscriptionRow>(connection)
                .optional()
                .map_err(PropertyRepositoryError::persistence)?;
            row.map(row_to_subscription).transpose()
        })
        .await
    }

    async fn find_active_for_property(
        &self,
        property_id: PropertyId,
    ) -> PropertyRepositoryResult<Option<Subscription>> {
        self.run_blocking(move |connection| {
            let row = subscriptions::table
                .filter(subscriptions::property_id.eq(property_id.into_inner()))
                .filter(subscriptions::status.eq(SubscriptionStatus::Active.as_str()))
                .select(SubscriptionRow::as_select())
                .first::<SubscriptionRow>(connection)
                .optional()
                .map_err(PropertyRepositoryError::persistence)?;
            row.map(row_to_subscription).transpose()
        })
        .await
    }

    async fn list_active(&self) -> PropertyRepositoryResult<Vec<Subscription>> {
        self.run_blocking(move |connection| {
            let rows = subscriptions::table
                .filter(subscriptions::status.eq(SubscriptionStatus::Active.as_str()))
                .order(subscriptions::id.asc())
                .select(SubscriptionRow::as_select())
                .load::<SubscriptionRow>(connection)
                .map_err(PropertyRepositoryError::persistence)?;
            rows.into_iter().map(row_to_subscription).collect()
        })
        .await
    }

    async fn record_sync_attempt(
        &self,
        id: SubscriptionId,
        attempted_at: DateTime<Utc>,
        failed: bool,
    ) -> PropertyRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(subscriptions::table.find(id.into_inner()))
                .set((
                    subscriptions::last_sync_attempt.eq(Some(attempted_at)),
                    subscriptions::calendar_sync_failed.eq(failed),
                ))
                .execute(connection)
                .map_err(PropertyRepositoryError::persistence)?;
            if updated == 0 {
                return Err(PropertyRepositoryError::SubscriptionNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_count(value: i32) -> PropertyRepositoryResult<u32> {
    u32::try_from(value).map_err(PropertyRepositoryError::persistence)
}

fn row_to_property(row: PropertyRow) -> PropertyRepositoryResult<Property> {
    let PropertyRow {
        id,
        calendar_url,
        bedrooms,
        bathrooms,
        square_feet,
        laundry_type,
        laundry_loads,
        hot_tub_service_enabled,
        hot_tub_drain_cadence,
    } = row;

    let calendar_url = calendar_url
        .filter(|url| !url.trim().is_empty())
        .map(CalendarUrl::new)
        .transpose()
        .map_err(PropertyRepositoryError::persistence)?;
    let laundry_type =
        LaundryType::try_from(laundry_type.as_str()).map_err(PropertyRepositoryError::persistence)?;

    let data = PersistedPropertyData {
        id: PropertyId::from_uuid(id),
        calendar_url,
        bedrooms: to_count(bedrooms)?,
        bathrooms: BathroomCount::try_from(bathrooms)
            .map_err(PropertyRepositoryError::persistence)?,
        square_feet: square_feet.map(to_count).transpose()?,
        laundry_type,
        laundry_loads: laundry_loads.map(to_count).transpose()?,
        hot_tub_service_enabled,
        hot_tub_drain_cadence,
    };
    Ok(Property::from_persisted(data))
}

fn row_to_subscription(row: SubscriptionRow) -> PropertyRepositoryResult<Subscription> {
    let status = SubscriptionStatus::try_from(row.status.as_str())
        .map_err(PropertyRepositoryError::persistence)?;
    Ok(Subscription::from_persisted(
        SubscriptionId::from_uuid(row.id),
        PropertyId::from_uuid(row.property_id),
        status,
        row.last_sync_attempt,
        row.calendar_sync_failed,
    ))
}
