//! HTTP calendar source backed by `reqwest`.

use super::parser::parse_calendar;
use crate::calendar::{
    domain::{CalendarUrl, FetchedCalendar},
    ports::{CalendarFetchError, CalendarFetchResult, CalendarSource},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{Instrument, debug, info_span, warn};

/// Settings for the HTTP calendar client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    /// Whole-request timeout, including reading the body.
    pub timeout: Duration,
    /// `User-Agent` header sent with each request.
    pub user_agent: Option<String>,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            user_agent: Some(concat!("turnover/", env!("CARGO_PKG_VERSION")).to_owned()),
        }
    }
}

/// Calendar source that retrieves feeds with an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpCalendarSource {
    client: reqwest::Client,
}

impl HttpCalendarSource {
    /// Builds a source from client settings.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarFetchError::Request`] when the TLS backend or client
    /// cannot be initialised.
    pub fn new(config: &HttpSourceConfig) -> CalendarFetchResult<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder
            .build()
            .map_err(|err| CalendarFetchError::request("<client>", err))?;
        Ok(Self { client })
    }

    async fn fetch_body(&self, url: &str) -> CalendarFetchResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| CalendarFetchError::request(url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalendarFetchError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|err| CalendarFetchError::request(url, err))
    }
}

#[async_trait]
impl CalendarSource for HttpCalendarSource {
    async fn fetch(&self, url: &CalendarUrl) -> CalendarFetchResult<FetchedCalendar> {
        let request_url = url.fetch_url();
        let span = info_span!("calendar_fetch", url = %request_url);

        async {
            let body = self.fetch_body(&request_url).await.inspect_err(|err| {
                warn!(error = %err, "calendar fetch failed");
            })?;
            debug!(bytes = body.len(), "calendar body received");
            parse_calendar(&body).inspect_err(|err| {
                warn!(error = %err, "calendar parse failed");
            })
        }
        .instrument(span)
        .await
    }
}
