//! Service layer for calendar synchronization and reconciliation.

mod bulk;
mod calendar_sync;
mod cancellation;
mod context;
mod writer;

pub use bulk::BulkCancellationOrchestrator;
pub use calendar_sync::{CalendarSyncError, CalendarSyncResult, CalendarSyncService};
pub use cancellation::{
    CancellationDetectionError, CancellationDetectionResult, CancellationDetector,
    JobCancellationError,
};
pub use context::{ContextResolutionError, ContextResolver, SyncContext, SyncTarget};
pub use writer::{BatchUpsertWriter, BatchWriteError, BatchWriteOutcome};
