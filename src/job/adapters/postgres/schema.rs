//! Diesel schema for jobs, the job archive, and assignments.

diesel::table! {
    /// Live cleaning jobs keyed externally by calendar event UID.
    jobs (id) {
        /// Job identifier.
        id -> Uuid,
        /// Owning subscription.
        subscription_id -> Uuid,
        /// Property to clean.
        property_id -> Uuid,
        /// Calendar event UID, unique across live jobs.
        calendar_event_uid -> Nullable<Text>,
        /// Earliest start of the clean.
        check_in_time -> Timestamptz,
        /// Cleaning deadline.
        check_out_time -> Timestamptz,
        /// Scheduling status.
        #[max_length = 20]
        status -> Varchar,
        /// Estimated duration in hours.
        expected_hours -> Float8,
        /// Versioned addon snapshot.
        addons_snapshot -> Jsonb,
        /// Payment intent identifier.
        #[max_length = 255]
        payment_intent_id -> Nullable<Varchar>,
        /// Payment status.
        #[max_length = 20]
        payment_status -> Varchar,
        /// Whether the last payment attempt failed.
        payment_failed -> Bool,
        /// Operator notes.
        notes -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Immutable snapshots of jobs whose calendar event vanished.
    cancelled_jobs (id) {
        /// Archive identifier.
        id -> Uuid,
        /// Identifier of the live job.
        original_job_id -> Uuid,
        /// Owning subscription.
        subscription_id -> Uuid,
        /// Property.
        property_id -> Uuid,
        /// UID of the vanished calendar event.
        calendar_event_uid -> Text,
        /// Archived earliest start.
        check_in_time -> Timestamptz,
        /// Archived deadline.
        check_out_time -> Timestamptz,
        /// Archived status.
        #[max_length = 20]
        status -> Varchar,
        /// Archived duration estimate.
        expected_hours -> Float8,
        /// Archived addon snapshot.
        addons_snapshot -> Jsonb,
        /// Archived payment intent identifier.
        #[max_length = 255]
        payment_intent_id -> Nullable<Varchar>,
        /// Archived payment status.
        #[max_length = 20]
        payment_status -> Varchar,
        /// Archived payment failure flag.
        payment_failed -> Bool,
        /// Archived notes.
        notes -> Nullable<Text>,
        /// Creation timestamp of the live job.
        original_created_at -> Timestamptz,
        /// Last update timestamp of the live job.
        original_updated_at -> Timestamptz,
        /// Archive timestamp.
        cancelled_at -> Timestamptz,
        /// What triggered the cancellation.
        #[max_length = 20]
        cancellation_source -> Varchar,
        /// Cancellation reason.
        cancellation_reason -> Text,
    }
}

diesel::table! {
    /// Cleaner assignments per job.
    jobs_to_cleaners (job_id, cleaner_id) {
        /// Assigned job.
        job_id -> Uuid,
        /// Assigned cleaner.
        cleaner_id -> Uuid,
        /// Cleaner role on the job.
        #[max_length = 20]
        role -> Varchar,
        /// Whether the urgent pickup bonus applies.
        urgent_bonus -> Bool,
        /// Assignment timestamp.
        created_at -> Timestamptz,
    }
}
