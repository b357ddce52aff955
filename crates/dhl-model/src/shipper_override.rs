//! Shipper address override

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Caller-supplied replacement values for the shipper block.
///
/// Each field that is `Some` replaces the value the mapper derived from the
/// request; `None` leaves the derived value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipperAddressOverride {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name2: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub address_addition: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// ISO 3166 alpha-2 country the parcel ships from
    #[serde(default)]
    pub origin_country: Option<String>,
}

impl ShipperAddressOverride {
    /// Parse an override from JSON
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a valid override document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::json("shipper override", e))
    }

    /// True when no field is overridden
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
