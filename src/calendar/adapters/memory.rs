//! In-memory calendar source for tests and local runs.

use crate::calendar::{
    domain::{CalendarEvent, CalendarUrl, FetchedCalendar},
    ports::{CalendarFetchError, CalendarFetchResult, CalendarSource},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Calendar source serving pre-loaded feeds keyed by URL.
///
/// URLs without a feed behave like an unreachable host.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendarSource {
    state: Arc<RwLock<InMemorySourceState>>,
}

#[derive(Debug, Default)]
struct InMemorySourceState {
    feeds: HashMap<String, FeedEntry>,
    fetch_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone)]
enum FeedEntry {
    Feed(FetchedCalendar),
    Failure(String),
}

impl InMemoryCalendarSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `events` at `url`, replacing any previous feed.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarFetchError::Request`] when lock acquisition fails.
    pub fn set_events(
        &self,
        url: &CalendarUrl,
        events: Vec<CalendarEvent>,
    ) -> CalendarFetchResult<()> {
        self.set_feed(url, FetchedCalendar::from_events(events))
    }

    /// Publishes a complete feed at `url`, replacing any previous feed.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarFetchError::Request`] when lock acquisition fails.
    pub fn set_feed(&self, url: &CalendarUrl, feed: FetchedCalendar) -> CalendarFetchResult<()> {
        self.write_entry(url, FeedEntry::Feed(feed))
    }

    /// Makes every fetch of `url` fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarFetchError::Request`] when lock acquisition fails.
    pub fn set_failure(
        &self,
        url: &CalendarUrl,
        message: impl Into<String>,
    ) -> CalendarFetchResult<()> {
        self.write_entry(url, FeedEntry::Failure(message.into()))
    }

    /// Returns how many times `url` has been fetched.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarFetchError::Request`] when lock acquisition fails.
    pub fn fetch_count(&self, url: &CalendarUrl) -> CalendarFetchResult<usize> {
        let state = self.state.read().map_err(|err| lock_error(url, &err))?;
        Ok(state.fetch_counts.get(url.as_str()).copied().unwrap_or(0))
    }

    fn write_entry(&self, url: &CalendarUrl, entry: FeedEntry) -> CalendarFetchResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(url, &err))?;
        state.feeds.insert(url.as_str().to_owned(), entry);
        Ok(())
    }
}

fn lock_error(url: &CalendarUrl, err: &impl ToString) -> CalendarFetchError {
    CalendarFetchError::request(url.as_str(), std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CalendarSource for InMemoryCalendarSource {
    async fn fetch(&self, url: &CalendarUrl) -> CalendarFetchResult<FetchedCalendar> {
        let mut state = self.state.write().map_err(|err| lock_error(url, &err))?;
        *state.fetch_counts.entry(url.as_str().to_owned()).or_default() += 1;

        match state.feeds.get(url.as_str()) {
            Some(FeedEntry::Feed(feed)) => Ok(feed.clone()),
            Some(FeedEntry::Failure(message)) => Err(CalendarFetchError::request(
                url.as_str(),
                std::io::Error::other(message.clone()),
            )),
            None => Err(CalendarFetchError::HttpStatus {
                url: url.as_str().to_owned(),
                status: 404,
            }),
        }
    }
}
