//! Pure transformation and reporting types for calendar synchronization.

mod error;
mod report;
mod schedule;

pub use error::{LocalTimeGap, ScheduleError};
pub use report::{
    BulkCancellationReport, CancellationReport, ItemError, SubscriptionCancellationReport,
    SyncReport,
};
pub use schedule::{Schedule, TimeResolver, build_job_drafts};
