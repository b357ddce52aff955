#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # dhl-adapter-xml
//!
//! XML side of the DHL label API.
//!
//! [`response`] turns a label response document into a typed
//! [`dhl_schema::LabelResponse`], rejecting documents that lack a mandatory
//! field. [`serializer`] writes a [`dhl_schema::ShipmentOrder`] as the XML
//! request body.

pub mod response;
pub mod serializer;

pub use response::{RESPONSE_ROOT, parse_response, parse_response_file};
pub use serializer::OrderSerializer;

use thiserror::Error;

/// Errors that can occur when reading or writing carrier XML
#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory response field is missing or unusable
    #[error("Response field {field} {reason}")]
    Parse { field: String, reason: String },

    /// A service flag carries an `active` value other than 1/0/true/false
    #[error("Service flag {flag} has invalid active value '{value}'")]
    InvalidFlag { flag: String, value: String },

    /// The document is not well-formed or does not match the response layout
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The order could not be written as XML
    #[error("XML write error: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a parse error for a missing response field.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Parse {
            field: field.into(),
            reason: "is missing".to_string(),
        }
    }

    /// Build a parse error for a field with an unusable value.
    pub fn invalid(field: impl Into<String>, value: &str) -> Self {
        Self::Parse {
            field: field.into(),
            reason: format!("has invalid value '{value}'"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
