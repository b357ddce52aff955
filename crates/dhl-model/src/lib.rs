#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # dhl-model
//!
//! Carrier-agnostic shipment request contracts.
//!
//! These types mirror the generic shipping request produced upstream: a
//! recipient, a shipper, the packages and an opaque carrier block. They are
//! read-only inputs to the mapper and carry no carrier knowledge beyond the
//! raw `Extra` payload string.

/// Generic shipment request and its sub-objects.
pub mod request;
/// Field-level shipper address override supplied by the caller.
pub mod shipper_override;

mod de;

pub use request::{Address, Carrier, Package, ShipmentRequest, Shipper};
pub use shipper_override::ShipperAddressOverride;

use thiserror::Error;

/// Errors that can occur when loading request documents
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid {document} document: {source}")]
    Json {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a JSON error tagged with the kind of document being read.
    pub fn json(document: &'static str, source: serde_json::Error) -> Self {
        Self::Json { document, source }
    }
}

/// Crate-local result type for request loading.
pub type Result<T> = std::result::Result<T, Error>;
