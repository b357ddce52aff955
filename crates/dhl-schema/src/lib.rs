#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # dhl-schema
//!
//! Typed model of the DHL label API.
//!
//! [`order`] holds the outbound shipment order tree, [`response`] the
//! inbound label response. Field names serialize to the carrier's own
//! camelCase names (`shipmentDetails.product`, `address.streetName`, ...) so
//! the JSON form of an order reads like the carrier documentation.

/// Outbound shipment order tree.
pub mod order;
/// Inbound label response tree.
pub mod response;

pub use order::{
    Communication, Name, NativeAddress, Origin, Receiver, ReceiverAddress, ReceiverNativeAddress,
    Shipment, ShipmentDetails, ShipmentItem, ShipmentOrder, Shipper, ShipperSlot,
    UnstructuredAddress,
};
pub use response::{LabelDetails, LabelResponse, ServiceFlag, ServiceFlags};
