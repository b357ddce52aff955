#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # dhl-mapping
//!
//! Maps carrier-agnostic shipment requests onto DHL shipment orders.
//!
//! The entry point is [`ShipmentOrderMapper::map`]. It decodes the carrier
//! extra payload, splits and trims the address lines, applies an optional
//! shipper override and assembles a fresh [`dhl_schema::ShipmentOrder`].
//! Mapping is a pure function of its inputs apart from the diagnostics it
//! records through the caller's [`DiagnosticSink`].

pub mod config;
pub mod diagnostics;
pub mod extra;
pub mod mapper;
pub mod normalize;
pub mod street;

pub use config::MapperConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, Level, MemorySink, SinkError, TracingSink};
pub use extra::{CarrierExtra, decode_extra};
pub use mapper::ShipmentOrderMapper;
pub use street::{NO_STREET_NUMBER, StreetParts, split_street};

use thiserror::Error;

/// Errors that can occur during mapping
#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory part of the request is missing or unusable
    #[error("Invalid request structure at {field}: {reason}")]
    Structural { field: String, reason: String },

    /// The carrier extra payload is present but malformed
    #[error("Carrier extra payload could not be decoded: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a structural error for a missing request field.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Structural {
            field: field.into(),
            reason: "missing".to_string(),
        }
    }

    /// Build a structural error with a specific reason.
    pub fn structural(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Structural {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a carrier extra decoding failure.
    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
