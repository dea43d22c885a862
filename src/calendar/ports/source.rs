//! Calendar source port for retrieving a property's booking feed.

use crate::calendar::domain::{CalendarUrl, FetchedCalendar};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for calendar source operations.
pub type CalendarFetchResult<T> = Result<T, CalendarFetchError>;

/// Retrieval contract for iCalendar feeds.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Fetches the feed at `url` and returns its `VEVENT` records.
    ///
    /// The result lists every event UID in the feed, including events whose
    /// dates could not be read.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarFetchError`] when the feed cannot be retrieved or
    /// parsed. Callers treat any error as "sync aborted for this target".
    async fn fetch(&self, url: &CalendarUrl) -> CalendarFetchResult<FetchedCalendar>;
}

/// Errors returned by calendar source implementations.
#[derive(Debug, Clone, Error)]
pub enum CalendarFetchError {
    /// The request could not be sent or the body could not be read.
    #[error("calendar request to {url} failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The server answered with a non-success status.
    #[error("calendar request to {url} returned HTTP {status}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body is not a valid iCalendar document.
    #[error("malformed calendar feed: {0}")]
    Parse(String),
}

impl CalendarFetchError {
    /// Wraps a transport error for `url`.
    pub fn request(
        url: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Request {
            url: url.into(),
            source: Arc::new(err),
        }
    }
}
