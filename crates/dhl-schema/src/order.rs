//! Shipment order schema
//!
//! One [`ShipmentOrder`] is built per mapping call and never mutated after
//! it is returned. Every string held here is already trimmed and non-empty;
//! absent values are `None` and are left out of the serialized form.

use chrono::NaiveDate;
use serde::Serialize;

/// Top-level label creation request for one shipment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentOrder {
    /// Caller correlation id echoed back by the carrier
    pub sequence_number: String,
    pub shipment: Shipment,
}

/// Shipment body: details, sender and recipient
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub shipment_details: ShipmentDetails,
    #[serde(flatten)]
    pub shipper: ShipperSlot,
    pub receiver: Receiver,
}

impl Shipment {
    /// Inline shipper details, if the order does not use a shipper reference
    #[must_use]
    pub fn shipper_details(&self) -> Option<&Shipper> {
        match &self.shipper {
            ShipperSlot::Details(shipper) => Some(shipper.as_ref()),
            ShipperSlot::Reference(_) => None,
        }
    }
}

/// Product, billing and tracking data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDetails {
    /// Carrier product code, e.g. `V01PAK`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// 14-digit billing number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_date: Option<NaiveDate>,
    pub shipment_item: ShipmentItem,
}

/// Physical parcel data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShipmentItem {
    #[serde(rename = "weightInKG", skip_serializing_if = "Option::is_none")]
    pub weight_in_kg: Option<f64>,
    #[serde(rename = "lengthInCM", skip_serializing_if = "Option::is_none")]
    pub length_in_cm: Option<f64>,
    #[serde(rename = "widthInCM", skip_serializing_if = "Option::is_none")]
    pub width_in_cm: Option<f64>,
    #[serde(rename = "heightInCM", skip_serializing_if = "Option::is_none")]
    pub height_in_cm: Option<f64>,
}

/// The shipper slot is a choice between inline details and a reference to
/// shipper data stored with the carrier account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ShipperSlot {
    #[serde(rename = "shipper")]
    Details(Box<Shipper>),
    #[serde(rename = "shipperReference")]
    Reference(String),
}

/// Inline sender block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipper {
    pub name: Name,
    pub address: NativeAddress,
    pub communication: Communication,
}

/// Up to three name lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Name {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name3: Option<String>,
}

/// Street-structured address used for the shipper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_addition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

/// Country wrapper used by every address variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    #[serde(rename = "countryISOCode")]
    pub country_iso_code: String,
}

impl Origin {
    /// Wrap an optional country code
    pub fn from_code(code: Option<String>) -> Option<Self> {
        code.map(|country_iso_code| Self { country_iso_code })
    }
}

/// Contact data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}

impl Communication {
    /// True when no contact field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.contact_person.is_none()
    }
}

/// Recipient block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receiver {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name1: Option<String>,
    pub address: ReceiverAddress,
    pub communication: Communication,
}

/// Recipient address, selected by destination country
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReceiverAddress {
    /// Street name and number as separate fields
    Native(ReceiverNativeAddress),
    /// Free-text address lines
    Unstructured(UnstructuredAddress),
}

impl ReceiverAddress {
    #[must_use]
    pub fn as_native(&self) -> Option<&ReceiverNativeAddress> {
        match self {
            Self::Native(address) => Some(address),
            Self::Unstructured(_) => None,
        }
    }

    #[must_use]
    pub fn as_unstructured(&self) -> Option<&UnstructuredAddress> {
        match self {
            Self::Native(_) => None,
            Self::Unstructured(address) => Some(address),
        }
    }

    #[must_use]
    pub fn zip(&self) -> Option<&str> {
        match self {
            Self::Native(address) => address.zip.as_deref(),
            Self::Unstructured(address) => address.zip.as_deref(),
        }
    }

    #[must_use]
    pub fn country_iso_code(&self) -> Option<&str> {
        let origin = match self {
            Self::Native(address) => address.origin.as_ref(),
            Self::Unstructured(address) => address.origin.as_ref(),
        };
        origin.map(|origin| origin.country_iso_code.as_str())
    }
}

/// Structured recipient address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverNativeAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_addition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

/// Free-text recipient address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnstructuredAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}
