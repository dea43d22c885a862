//! Frozen copy of a property's service options taken at sync time.

use crate::property::domain::{LaundryType, Property};
use serde::{Deserialize, Serialize};

/// Hot tub service level recorded on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotTubServiceLevel {
    /// No hot tub work.
    None,
    /// Standard hot tub clean.
    Basic,
}

/// Version 1 of the addon snapshot payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonsV1 {
    /// Laundry service type.
    pub laundry_type: LaundryType,
    /// Laundry loads per clean, if known.
    pub laundry_loads: Option<u32>,
    /// Hot tub service level.
    pub hot_tub_service: HotTubServiceLevel,
    /// Hot tub drain cadence, if any.
    pub hot_tub_drain_cadence: Option<String>,
}

/// Versioned addon snapshot stored with each job.
///
/// Serialized with a `version` tag so older rows stay readable when new
/// addon kinds are introduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "version", rename_all = "snake_case")]
pub enum AddonsSnapshot {
    /// First snapshot layout.
    V1(AddonsV1),
}

impl AddonsSnapshot {
    /// Captures the current service options of a property.
    #[must_use]
    pub fn capture(property: &Property) -> Self {
        let hot_tub_service = if property.hot_tub_service_enabled() {
            HotTubServiceLevel::Basic
        } else {
            HotTubServiceLevel::None
        };
        Self::V1(AddonsV1 {
            laundry_type: property.laundry_type(),
            laundry_loads: property.laundry_loads(),
            hot_tub_service,
            hot_tub_drain_cadence: property.hot_tub_drain_cadence().map(str::to_owned),
        })
    }

    /// Returns the laundry service type.
    #[must_use]
    pub const fn laundry_type(&self) -> LaundryType {
        match self {
            Self::V1(addons) => addons.laundry_type,
        }
    }

    /// Returns the hot tub service level.
    #[must_use]
    pub const fn hot_tub_service(&self) -> HotTubServiceLevel {
        match self {
            Self::V1(addons) => addons.hot_tub_service,
        }
    }
}
