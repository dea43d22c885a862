//! `PostgreSQL` repository implementation for jobs, the archive, and
//! assignments.

use super::{
    models::{AssignmentRow, CancelledJobRow, JobRow},
    schema::{cancelled_jobs, jobs, jobs_to_cleaners},
};
use crate::calendar::domain::CalendarEventUid;
use crate::job::{
    domain::{
        AddonsSnapshot, AssignmentRole, CancellationSource, CancelledJob, CancelledJobId,
        CleanerId, ExpectedHours, Job, JobAssignment, JobId, JobStatus, PaymentStatus,
        PersistedCancelledJobData, PersistedJobData,
    },
    ports::{AssignmentRepository, JobRepository, JobRepositoryError, JobRepositoryResult},
};
use crate::property::domain::{PropertyId, SubscriptionId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;

/// `PostgreSQL` connection pool type used by job adapters.
pub type JobPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed job, archive, and assignment store.
#[derive(Debug, Clone)]
pub struct PostgresJobStore {
    pool: JobPgPool,
}

impl PostgresJobStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: JobPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> JobRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> JobRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(JobRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(JobRepositoryError::persistence)?
    }
}

#[async_trait]
impl JobRepository for PostgresJobStore {
    async fn upsert_by_calendar_uid(&self, jobs_to_write: &[Job]) -> JobRepositoryResult<usize> {
        if let Some(job) = jobs_to_write
            .iter()
            .find(|job| job.calendar_event_uid().is_none())
        {
            return Err(JobRepositoryError::MissingCalendarEventUid(job.id()));
        }
        let rows = jobs_to_write
            .iter()
            .map(job_to_row)
            .collect::<JobRepositoryResult<Vec<_>>>()?;
        if rows.is_empty() {
            return Ok(0);
        }

        self.run_blocking(move |connection| {
            let written = diesel::insert_into(jobs::table)
                .values(&rows)
                .on_conflict(jobs::calendar_event_uid)
                .do_update()
                .set((
                    jobs::check_in_time.eq(excluded(jobs::check_in_time)),
                    jobs::check_out_time.eq(excluded(jobs::check_out_time)),
                    jobs::expected_hours.eq(excluded(jobs::expected_hours)),
                    jobs::addons_snapshot.eq(excluded(jobs::addons_snapshot)),
                    jobs::updated_at.eq(excluded(jobs::updated_at)),
                ))
                .execute(connection)?;
            Ok(written)
        })
        .await
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        self.run_blocking(move |connection| {
            let row = jobs::table
                .find(id.into_inner())
                .select(JobRow::as_select())
                .first::<JobRow>(connection)
                .optional()?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn find_by_calendar_uid(
        &self,
        uid: &CalendarEventUid,
    ) -> JobRepositoryResult<Option<Job>> {
        let lookup = uid.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = jobs::table
                .filter(jobs::calendar_event_uid.eq(lookup))
                .select(JobRow::as_select())
                .first::<JobRow>(connection)
                .optional()?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn list_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Vec<Job>> {
        self.run_blocking(move |connection| {
            let rows = jobs::table
                .filter(jobs::subscription_id.eq(subscription_id.into_inner()))
                .order((jobs::check_out_time.asc(), jobs::created_at.asc()))
                .select(JobRow::as_select())
                .load::<JobRow>(connection)?;
            rows.into_iter().map(row_to_job).collect()
        })
        .await
    }

    async fn find_with_calendar_uid_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Vec<Job>> {
        self.run_blocking(move |connection| {
            let rows = jobs::table
                .filter(jobs::subscription_id.eq(subscription_id.into_inner()))
                .filter(jobs::calendar_event_uid.is_not_null())
                .select(JobRow::as_select())
                .load::<JobRow>(connection)?;
            rows.into_iter().map(row_to_job).collect()
        })
        .await
    }

    async fn find_earliest_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Option<Job>> {
        self.run_blocking(move |connection| {
            let row = jobs::table
                .filter(jobs::subscription_id.eq(subscription_id.into_inner()))
                .order((jobs::check_out_time.asc(), jobs::created_at.asc()))
                .select(JobRow::as_select())
                .first::<JobRow>(connection)
                .optional()?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn update_payment(&self, job: &Job) -> JobRepositoryResult<()> {
        let job_id = job.id();
        let payment_intent_id = job.payment_intent_id().map(str::to_owned);
        let payment_status = job.payment_status().as_str();
        let payment_failed = job.payment_failed();
        let updated_at = job.updated_at();

        self.run_blocking(move |connection| {
            let updated = diesel::update(jobs::table.find(job_id.into_inner()))
                .set((
                    jobs::payment_intent_id.eq(payment_intent_id),
                    jobs::payment_status.eq(payment_status),
                    jobs::payment_failed.eq(payment_failed),
                    jobs::updated_at.eq(updated_at),
                ))
                .execute(connection)?;
            if updated == 0 {
                return Err(JobRepositoryError::NotFound(job_id));
            }
            Ok(())
        })
        .await
    }

    async fn archive_cancelled(&self, cancelled: &CancelledJob) -> JobRepositoryResult<()> {
        let job_id = cancelled.original_job_id();
        let archive_row = cancelled_to_row(cancelled)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, JobRepositoryError, _>(|tx| {
                diesel::delete(
                    jobs_to_cleaners::table.filter(jobs_to_cleaners::job_id.eq(job_id.into_inner())),
                )
                .execute(tx)?;
                diesel::insert_into(cancelled_jobs::table)
                    .values(&archive_row)
                    .execute(tx)?;
                let deleted = diesel::delete(jobs::table.find(job_id.into_inner())).execute(tx)?;
                if deleted == 0 {
                    return Err(JobRepositoryError::NotFound(job_id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn list_cancelled_for_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> JobRepositoryResult<Vec<CancelledJob>> {
        self.run_blocking(move |connection| {
            let rows = cancelled_jobs::table
                .filter(cancelled_jobs::subscription_id.eq(subscription_id.into_inner()))
                .order(cancelled_jobs::cancelled_at.desc())
                .select(CancelledJobRow::as_select())
                .load::<CancelledJobRow>(connection)?;
            rows.into_iter().map(row_to_cancelled).collect()
        })
        .await
    }
}

#[async_trait]
impl AssignmentRepository for PostgresJobStore {
    async fn assign(&self, assignment: &JobAssignment) -> JobRepositoryResult<()> {
        let job_id = assignment.job_id();
        let row = assignment_to_row(assignment);

        self.run_blocking(move |connection| {
            let job_exists: i64 = jobs::table
                .filter(jobs::id.eq(job_id.into_inner()))
                .count()
                .get_result(connection)?;
            if job_exists == 0 {
                return Err(JobRepositoryError::NotFound(job_id));
            }

            diesel::insert_into(jobs_to_cleaners::table)
                .values(&row)
                .on_conflict((jobs_to_cleaners::job_id, jobs_to_cleaners::cleaner_id))
                .do_update()
                .set((
                    jobs_to_cleaners::role.eq(excluded(jobs_to_cleaners::role)),
                    jobs_to_cleaners::urgent_bonus.eq(excluded(jobs_to_cleaners::urgent_bonus)),
                ))
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn find_by_job(&self, job_id: JobId) -> JobRepositoryResult<Vec<JobAssignment>> {
        self.run_blocking(move |connection| {
            let rows = jobs_to_cleaners::table
                .filter(jobs_to_cleaners::job_id.eq(job_id.into_inner()))
                .order(jobs_to_cleaners::created_at.asc())
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)?;
            rows.into_iter().map(row_to_assignment).collect()
        })
        .await
    }

    async fn delete_for_job(&self, job_id: JobId) -> JobRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                jobs_to_cleaners::table.filter(jobs_to_cleaners::job_id.eq(job_id.into_inner())),
            )
            .execute(connection)?;
            Ok(deleted)
        })
        .await
    }
}

fn job_to_row(job: &Job) -> JobRepositoryResult<JobRow> {
    let addons_snapshot =
        serde_json::to_value(job.addons_snapshot()).map_err(JobRepositoryError::persistence)?;

    Ok(JobRow {
        id: job.id().into_inner(),
        subscription_id: job.subscription_id().into_inner(),
        property_id: job.property_id().into_inner(),
        calendar_event_uid: job.calendar_event_uid().map(|uid| uid.as_str().to_owned()),
        check_in_time: job.check_in_time(),
        check_out_time: job.check_out_time(),
        status: job.status().as_str().to_owned(),
        expected_hours: job.expected_hours().value(),
        addons_snapshot,
        payment_intent_id: job.payment_intent_id().map(str::to_owned),
        payment_status: job.payment_status().as_str().to_owned(),
        payment_failed: job.payment_failed(),
        notes: job.notes().map(str::to_owned),
        created_at: job.created_at(),
        updated_at: job.updated_at(),
    })
}

fn row_to_job(row: JobRow) -> JobRepositoryResult<Job> {
    let JobRow {
        id,
        subscription_id,
        property_id,
        calendar_event_uid,
        check_in_time,
        check_out_time,
        status,
        expected_hours,
        addons_snapshot,
        payment_intent_id,
        payment_status,
        payment_failed,
        notes,
        created_at,
        updated_at,
    } = row;

    let calendar_event_uid = calendar_event_uid
        .map(CalendarEventUid::new)
        .transpose()
        .map_err(JobRepositoryError::persistence)?;

    let data = PersistedJobData {
        id: JobId::from_uuid(id),
        subscription_id: SubscriptionId::from_uuid(subscription_id),
        property_id: PropertyId::from_uuid(property_id),
        calendar_event_uid,
        check_in_time,
        check_out_time,
        status: JobStatus::try_from(status.as_str()).map_err(JobRepositoryError::persistence)?,
        expected_hours: ExpectedHours::new(expected_hours)
            .map_err(JobRepositoryError::persistence)?,
        addons_snapshot: serde_json::from_value::<AddonsSnapshot>(addons_snapshot)
            .map_err(JobRepositoryError::persistence)?,
        payment_intent_id,
        payment_status: PaymentStatus::try_from(payment_status.as_str())
            .map_err(JobRepositoryError::persistence)?,
        payment_failed,
        notes,
        created_at,
        updated_at,
    };
    Ok(Job::from_persisted(data))
}

fn cancelled_to_row(cancelled: &CancelledJob) -> JobRepositoryResult<CancelledJobRow> {
    let addons_snapshot = serde_json::to_value(cancelled.addons_snapshot())
        .map_err(JobRepositoryError::persistence)?;

    Ok(CancelledJobRow {
        id: cancelled.id().into_inner(),
        original_job_id: cancelled.original_job_id().into_inner(),
        subscription_id: cancelled.subscription_id().into_inner(),
        property_id: cancelled.property_id().into_inner(),
        calendar_event_uid: cancelled.calendar_event_uid().as_str().to_owned(),
        check_in_time: cancelled.check_in_time(),
        check_out_time: cancelled.check_out_time(),
        status: cancelled.status().as_str().to_owned(),
        expected_hours: cancelled.expected_hours().value(),
        addons_snapshot,
        payment_intent_id: cancelled.payment_intent_id().map(str::to_owned),
        payment_status: cancelled.payment_status().as_str().to_owned(),
        payment_failed: cancelled.payment_failed(),
        notes: cancelled.notes().map(str::to_owned),
        original_created_at: cancelled.original_created_at(),
        original_updated_at: cancelled.original_updated_at(),
        cancelled_at: cancelled.cancelled_at(),
        cancellation_source: cancelled.cancellation_source().as_str().to_owned(),
        cancellation_reason: cancelled.cancellation_reason().to_owned(),
    })
}

fn row_to_cancelled(row: CancelledJobRow) -> JobRepositoryResult<CancelledJob> {
    let live = row_to_job(JobRow {
        id: row.original_job_id,
        subscription_id: row.subscription_id,
        property_id: row.property_id,
        calendar_event_uid: Some(row.calendar_event_uid),
        check_in_time: row.check_in_time,
        check_out_time: row.check_out_time,
        status: row.status,
        expected_hours: row.expected_hours,
        addons_snapshot: row.addons_snapshot,
        payment_intent_id: row.payment_intent_id,
        payment_status: row.payment_status,
        payment_failed: row.payment_failed,
        notes: row.notes,
        created_at: row.original_created_at,
        updated_at: row.original_updated_at,
    })?;
    let cancellation_source = CancellationSource::try_from(row.cancellation_source.as_str())
        .map_err(JobRepositoryError::persistence)?;

    CancelledJob::from_persisted(PersistedCancelledJobData {
        id: CancelledJobId::from_uuid(row.id),
        job: live,
        cancelled_at: row.cancelled_at,
        cancellation_source,
        cancellation_reason: row.cancellation_reason,
    })
    .map_err(JobRepositoryError::persistence)
}

fn assignment_to_row(assignment: &JobAssignment) -> AssignmentRow {
    AssignmentRow {
        job_id: assignment.job_id().into_inner(),
        cleaner_id: assignment.cleaner_id().into_inner(),
        role: assignment.role().as_str().to_owned(),
        urgent_bonus: assignment.urgent_bonus(),
        created_at: assignment.created_at(),
    }
}

fn row_to_assignment(row: AssignmentRow) -> JobRepositoryResult<JobAssignment> {
    let role = AssignmentRole::try_from(row.role.as_str()).map_err(JobRepositoryError::persistence)?;
    Ok(JobAssignment::from_persisted(
        JobId::from_uuid(row.job_id),
        CleanerId::from_uuid(row.cleaner_id),
        role,
        row.urgent_bonus,
        row.created_at,
    ))
}
