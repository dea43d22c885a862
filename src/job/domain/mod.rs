//! Domain model for scheduled cleaning jobs.
//!
//! Jobs are keyed externally by their calendar event UID. When that UID
//! disappears from the feed the job is replaced by an immutable
//! [`CancelledJob`] snapshot.

mod addons;
mod assignment;
mod cancelled;
mod error;
mod hours;
mod ids;
mod job;
mod status;

pub use addons::{AddonsSnapshot, AddonsV1, HotTubServiceLevel};
pub use assignment::{AssignmentRole, JobAssignment};
pub use cancelled::{
    CancellationSource, CancelledJob, PersistedCancelledJobData, VANISHED_EVENT_REASON,
};
pub use error::{
    JobDomainError, ParseAssignmentRoleError, ParseCancellationSourceError, ParseJobStatusError,
    ParsePaymentStatusError,
};
pub use hours::{ExpectedHours, JobSize};
pub use ids::{CancelledJobId, CleanerId, JobId};
pub use job::{Job, JobDraft, PersistedJobData};
pub use status::{JobStatus, PaymentStatus};
