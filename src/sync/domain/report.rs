//! Serializable summaries returned by sync and reconciliation runs.

use crate::property::domain::SubscriptionId;
use serde::{Deserialize, Serialize};

/// One failed item within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemError {
    /// Identifier of the failed item (job, event UID, batch, or subscription).
    pub id: String,
    /// Human-readable failure description.
    pub error: String,
}

impl ItemError {
    /// Creates an item error.
    #[must_use]
    pub fn new(id: impl ToString, error: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            error: error.to_string(),
        }
    }
}

/// Outcome of synchronizing one calendar into the job table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// `false` only when the run was aborted before writing.
    pub success: bool,
    /// Summary message.
    pub message: String,
    /// Jobs inserted or updated.
    pub total_synced: usize,
    /// Jobs the writer attempted.
    pub total_attempted: usize,
    /// Calendar event UIDs that were written.
    pub ids: Vec<String>,
    /// Failed batches and skipped events.
    pub errors: Vec<ItemError>,
}

impl SyncReport {
    /// Creates a report for a run aborted before any write.
    #[must_use]
    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            total_synced: 0,
            total_attempted: 0,
            ids: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Outcome of reconciling one subscription's jobs against its calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationReport {
    /// `false` only when the run was aborted before examining jobs.
    pub success: bool,
    /// Summary message.
    pub message: String,
    /// Stored jobs compared against the feed.
    pub total_processed: usize,
    /// Jobs moved to the archive.
    pub total_cancelled: usize,
    /// Identifiers of archived jobs.
    pub ids: Vec<String>,
    /// Jobs that could not be archived.
    pub errors: Vec<ItemError>,
}

impl CancellationReport {
    /// Creates a report for a run aborted before examining jobs.
    #[must_use]
    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            total_processed: 0,
            total_cancelled: 0,
            ids: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Per-subscription line of a bulk reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCancellationReport {
    /// Reconciled subscription.
    pub subscription_id: SubscriptionId,
    /// Stored jobs compared against the feed.
    pub processed: usize,
    /// Jobs moved to the archive.
    pub cancelled: usize,
    /// Errors recorded for the subscription.
    pub errors: usize,
}

/// Outcome of reconciling every active subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCancellationReport {
    /// `false` only when the active subscriptions could not be listed.
    pub success: bool,
    /// Summary message.
    pub message: String,
    /// Active subscriptions found.
    pub total_subscriptions: usize,
    /// Subscriptions whose reconciliation ran to completion.
    pub subscriptions_processed: usize,
    /// Stored jobs compared across all subscriptions.
    pub total_jobs_processed: usize,
    /// Jobs archived across all subscriptions.
    pub total_jobs_cancelled: usize,
    /// One line per active subscription.
    pub subscription_results: Vec<SubscriptionCancellationReport>,
    /// Subscription-level failures keyed by subscription identifier.
    pub errors: Vec<ItemError>,
}
