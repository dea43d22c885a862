//! Batched job upserts that isolate failures per batch.

use crate::calendar::domain::CalendarEventUid;
use crate::job::{
    domain::Job,
    ports::{JobRepository, JobRepositoryError},
};
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// A batch the repository rejected.
#[derive(Debug, Clone, Error)]
#[error("batch {batch_index} ({job_count} jobs) failed: {source}")]
pub struct BatchWriteError {
    /// Zero-based position of the batch.
    pub batch_index: usize,
    /// Jobs in the batch.
    pub job_count: usize,
    /// Repository failure.
    #[source]
    pub source: JobRepositoryError,
}

/// Totals for one write pass.
#[derive(Debug, Clone, Default)]
pub struct BatchWriteOutcome {
    /// Rows the repository reported as inserted or updated.
    pub written: usize,
    /// Jobs handed to the repository.
    pub attempted: usize,
    /// UIDs of jobs in batches that succeeded.
    pub written_uids: Vec<CalendarEventUid>,
    /// Batches that failed.
    pub errors: Vec<BatchWriteError>,
}

/// Writes jobs in fixed-size batches; a failed batch does not stop the rest.
#[derive(Clone)]
pub struct BatchUpsertWriter<J>
where
    J: JobRepository,
{
    jobs: Arc<J>,
    batch_size: NonZeroUsize,
}

impl<J> BatchUpsertWriter<J>
where
    J: JobRepository,
{
    /// Creates a writer over the job repository.
    #[must_use]
    pub const fn new(jobs: Arc<J>, batch_size: NonZeroUsize) -> Self {
        Self { jobs, batch_size }
    }

    /// Upserts `jobs` by calendar event UID, batch by batch.
    pub async fn write(&self, jobs: &[Job]) -> BatchWriteOutcome {
        let mut outcome = BatchWriteOutcome {
            attempted: jobs.len(),
            ..BatchWriteOutcome::default()
        };

        for (batch_index, batch) in jobs.chunks(self.batch_size.get()).enumerate() {
            match self.jobs.upsert_by_calendar_uid(batch).await {
                Ok(written) => {
                    debug!(batch_index, written, "job batch written");
                    outcome.written += written;
                    outcome.written_uids.extend(
                        batch
                            .iter()
                            .filter_map(|job| job.calendar_event_uid().cloned()),
                    );
                }
                Err(source) => {
                    warn!(batch_index, error = %source, "job batch failed; continuing");
                    outcome.errors.push(BatchWriteError {
                        batch_index,
                        job_count: batch.len(),
                        source,
                    });
                }
            }
        }

        outcome
    }
}
