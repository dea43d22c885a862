//! Diesel schema for properties and subscriptions.

diesel::table! {
    /// Rental properties with the attributes used to size a clean.
    properties (id) {
        /// Property identifier.
        id -> Uuid,
        /// Booking calendar feed URL.
        calendar_url -> Nullable<Text>,
        /// Bedroom count.
        bedrooms -> Int4,
        /// Bathroom count.
        bathrooms -> Float8,
        /// Square footage.
        square_feet -> Nullable<Int4>,
        /// Laundry service type.
        #[max_length = 20]
        laundry_type -> Varchar,
        /// Laundry loads per clean.
        laundry_loads -> Nullable<Int4>,
        /// Whether hot tub service is part of each clean.
        hot_tub_service_enabled -> Bool,
        /// Hot tub drain cadence.
        #[max_length = 50]
        hot_tub_drain_cadence -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Customer subscriptions with calendar sync bookkeeping.
    subscriptions (id) {
        /// Subscription identifier.
        id -> Uuid,
        /// Subscribed property.
        property_id -> Uuid,
        /// Billing status.
        #[max_length = 20]
        status -> Varchar,
        /// Time of the last calendar sync attempt.
        last_sync_attempt -> Nullable<Timestamptz>,
        /// Whether the last calendar sync failed.
        calendar_sync_failed -> Bool,
    }
}
