//! Label response schema

use crate::order::ShipmentItem;
use serde::Serialize;

/// Parsed label response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelResponse {
    pub shipment_details: LabelDetails,
}

/// Shipment data reported back by the carrier.
///
/// All fields except `service` are mandatory in the response; a parser never
/// produces a `LabelDetails` with any of them missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDetails {
    pub product: String,
    pub account_number: String,
    pub routing_barcode: String,
    pub identifier: String,
    pub shipment_item: ShipmentItem,
    /// `None` when the carrier did not report a service block at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceFlags>,
}

/// Value-added services confirmed by the carrier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<ServiceFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_green: Option<ServiceFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endorsement: Option<ServiceFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulky_goods: Option<ServiceFlag>,
}

impl ServiceFlags {
    /// Flags the carrier reported as active, by element name
    #[must_use]
    pub fn active_names(&self) -> Vec<&'static str> {
        [
            ("Premium", &self.premium),
            ("GoGreen", &self.go_green),
            ("Endorsement", &self.endorsement),
            ("BulkyGoods", &self.bulky_goods),
        ]
        .into_iter()
        .filter(|(_, flag)| flag.as_ref().is_some_and(|flag| flag.active))
        .map(|(name, _)| name)
        .collect()
    }
}

/// One service flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceFlag {
    pub active: bool,
    /// Service parameter, e.g. the endorsement type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ServiceFlag {
    #[must_use]
    pub fn new(active: bool) -> Self {
        Self {
            active,
            details: None,
        }
    }
}
