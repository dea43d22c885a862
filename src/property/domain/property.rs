//! Property attributes consumed by job scheduling.

use super::{BathroomCount, ParseLaundryTypeError, PropertyId};
use crate::calendar::domain::CalendarUrl;
use serde::{Deserialize, Serialize};

/// How linens are laundered for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaundryType {
    /// Washed in the unit during the clean.
    InUnit,
    /// Taken off site, which lengthens the clean.
    OffSite,
}

impl LaundryType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InUnit => "in_unit",
            Self::OffSite => "off_site",
        }
    }
}

impl TryFrom<&str> for LaundryType {
    type Error = ParseLaundryTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in_unit" => Ok(Self::InUnit),
            "off_site" => Ok(Self::OffSite),
            _ => Err(ParseLaundryTypeError(value.to_owned())),
        }
    }
}

/// A rental property as seen by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    id: PropertyId,
    calendar_url: Option<CalendarUrl>,
    bedrooms: u32,
    bathrooms: BathroomCount,
    square_feet: Option<u32>,
    laundry_type: LaundryType,
    laundry_loads: Option<u32>,
    hot_tub_service_enabled: bool,
    hot_tub_drain_cadence: Option<String>,
}

/// Parameter object for reconstructing a persisted property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPropertyData {
    /// Persisted property identifier.
    pub id: PropertyId,
    /// Persisted calendar feed, if any.
    pub calendar_url: Option<CalendarUrl>,
    /// Persisted bedroom count.
    pub bedrooms: u32,
    /// Persisted bathroom count.
    pub bathrooms: BathroomCount,
    /// Persisted square footage, if known.
    pub square_feet: Option<u32>,
    /// Persisted laundry service type.
    pub laundry_type: LaundryType,
    /// Persisted laundry load count, if known.
    pub laundry_loads: Option<u32>,
    /// Persisted hot tub service flag.
    pub hot_tub_service_enabled: bool,
    /// Persisted hot tub drain cadence, if any.
    pub hot_tub_drain_cadence: Option<String>,
}

impl Property {
    /// Reconstructs a property from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPropertyData) -> Self {
        Self {
            id: data.id,
            calendar_url: data.calendar_url,
            bedrooms: data.bedrooms,
            bathrooms: data.bathrooms,
            square_feet: data.square_feet,
            laundry_type: data.laundry_type,
            laundry_loads: data.laundry_loads,
            hot_tub_service_enabled: data.hot_tub_service_enabled,
            hot_tub_drain_cadence: data.hot_tub_drain_cadence,
        }
    }

    /// Creates a property without a calendar, square footage, or hot tub.
    #[must_use]
    pub const fn new(
        id: PropertyId,
        bedrooms: u32,
        bathrooms: BathroomCount,
        laundry_type: LaundryType,
    ) -> Self {
        Self {
            id,
            calendar_url: None,
            bedrooms,
            bathrooms,
            square_feet: None,
            laundry_type,
            laundry_loads: None,
            hot_tub_service_enabled: false,
            hot_tub_drain_cadence: None,
        }
    }

    /// Sets the booking calendar feed.
    #[must_use]
    pub fn with_calendar_url(mut self, calendar_url: CalendarUrl) -> Self {
        self.calendar_url = Some(calendar_url);
        self
    }

    /// Sets the square footage.
    #[must_use]
    pub const fn with_square_feet(mut self, square_feet: u32) -> Self {
        self.square_feet = Some(square_feet);
        self
    }

    /// Sets the number of laundry loads per clean.
    #[must_use]
    pub const fn with_laundry_loads(mut self, loads: u32) -> Self {
        self.laundry_loads = Some(loads);
        self
    }

    /// Enables hot tub service with an optional drain cadence.
    #[must_use]
    pub fn with_hot_tub_service(mut self, drain_cadence: Option<String>) -> Self {
        self.hot_tub_service_enabled = true;
        self.hot_tub_drain_cadence = drain_cadence;
        self
    }

    /// Returns the property identifier.
    #[must_use]
    pub const fn id(&self) -> PropertyId {
        self.id
    }

    /// Returns the booking calendar feed, if configured.
    #[must_use]
    pub const fn calendar_url(&self) -> Option<&CalendarUrl> {
        self.calendar_url.as_ref()
    }

    /// Returns the bedroom count.
    #[must_use]
    pub const fn bedrooms(&self) -> u32 {
        self.bedrooms
    }

    /// Returns the bathroom count.
    #[must_use]
    pub const fn bathrooms(&self) -> BathroomCount {
        self.bathrooms
    }

    /// Returns the square footage, if known.
    #[must_use]
    pub const fn square_feet(&self) -> Option<u32> {
        self.square_feet
    }

    /// Returns the laundry service type.
    #[must_use]
    pub const fn laundry_type(&self) -> LaundryType {
        self.laundry_type
    }

    /// Returns the laundry load count, if known.
    #[must_use]
    pub const fn laundry_loads(&self) -> Option<u32> {
        self.laundry_loads
    }

    /// Returns `true` when hot tub service is part of each clean.
    #[must_use]
    pub const fn hot_tub_service_enabled(&self) -> bool {
        self.hot_tub_service_enabled
    }

    /// Returns the hot tub drain cadence, if any.
    #[must_use]
    pub fn hot_tub_drain_cadence(&self) -> Option<&str> {
        self.hot_tub_drain_cadence.as_deref()
    }
}
