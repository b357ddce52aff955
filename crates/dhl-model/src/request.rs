//! Generic shipment request
//!
//! Field names follow the upstream JSON contract (PascalCase). Every field is
//! optional at the serde level: whether a sub-object is mandatory is decided
//! by the mapper, which reports a structural error instead of synthesizing
//! missing structure.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A carrier-agnostic request to create one shipment label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentRequest {
    /// Upstream sequence identifier, passed through as the order sequence number
    #[serde(default, deserialize_with = "crate::de::string_or_number")]
    pub shipment_id: Option<String>,

    /// Requested shipment date (`YYYY-MM-DD`)
    #[serde(default)]
    pub shipment_date: Option<String>,

    /// Recipient address
    #[serde(default)]
    pub ship_to: Option<Address>,

    /// Sender address
    #[serde(default)]
    pub shipper: Option<Shipper>,

    /// Ordered package list
    #[serde(default)]
    pub packages: Option<Vec<Package>>,

    /// Carrier selection and carrier-specific payload
    #[serde(default)]
    pub carrier: Option<Carrier>,
}

impl ShipmentRequest {
    /// Parse a request from its JSON representation
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a valid request document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::json("shipment request", e))
    }

    /// Read and parse a request file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded shipment request");
        Self::from_json_str(&json)
    }
}

/// Recipient address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    /// Contact name of the recipient
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    /// First free-text street line (street name and house number)
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    /// ISO 3166 alpha-2 country code
    #[serde(default)]
    pub iso_country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Sender address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Shipper {
    /// Business name printed on the label
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub iso_country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One physical parcel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Package {
    /// Weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    /// Length in centimetres
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// Carrier selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Carrier {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    /// Carrier-specific JSON payload embedded as a string
    #[serde(default)]
    pub extra: Option<String>,
}
