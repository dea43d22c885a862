//! Identifier and validated scalar types for the calendar domain.

use super::CalendarDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External identifier of a calendar event (the iCalendar `UID`).
///
/// This is the sole correlation key between the external calendar and the
/// internal job table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarEventUid(String);

impl CalendarEventUid {
    /// Creates a validated event UID.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarDomainError::EmptyEventUid`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CalendarDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CalendarDomainError::EmptyEventUid);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the UID as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CalendarEventUid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CalendarEventUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location of a property's iCalendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarUrl(String);

impl CalendarUrl {
    const SUPPORTED_SCHEMES: [&'static str; 3] = ["http://", "https://", "webcal://"];

    /// Creates a validated calendar URL.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarDomainError::InvalidCalendarUrl`] when the value is
    /// empty, contains whitespace, or does not use a supported scheme.
    pub fn new(value: impl Into<String>) -> Result<Self, CalendarDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let lowered = normalized.to_ascii_lowercase();
        let has_scheme = Self::SUPPORTED_SCHEMES
            .iter()
            .any(|scheme| lowered.starts_with(scheme) && lowered.len() > scheme.len());

        if !has_scheme || normalized.chars().any(char::is_whitespace) {
            return Err(CalendarDomainError::InvalidCalendarUrl(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the URL as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the URL to request over HTTP.
    ///
    /// `webcal://` feeds are served over HTTPS.
    #[must_use]
    pub fn fetch_url(&self) -> String {
        match self.0.get(..9) {
            Some(prefix) if prefix.eq_ignore_ascii_case("webcal://") => {
                format!("https://{}", self.0.get(9..).unwrap_or_default())
            }
            _ => self.0.clone(),
        }
    }
}

impl AsRef<str> for CalendarUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CalendarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
