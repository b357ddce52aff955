//! Carrier extra payload
//!
//! The generic request carries DHL account data as a JSON document embedded
//! in the `Carrier.Extra` string. It is decoded once, at the start of a
//! mapping call, into [`CarrierExtra`].

use crate::normalize::clean;
use crate::{Error, Result};
use serde::Deserialize;

/// Account identifiers carried in the extra payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierExtra {
    /// Product code, e.g. `V01PAK`
    #[serde(default)]
    pub product: Option<String>,
    /// Billing number
    #[serde(default)]
    pub account_number: Option<String>,
}

/// Decode the extra payload.
///
/// Returns `Ok(None)` only when there is no payload (missing or blank).
/// A present payload must be a JSON object; missing keys decode to `None`
/// fields and unknown keys are ignored.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the payload is present but is not a JSON
/// object with string or null values for the known keys.
pub fn decode_extra(payload: Option<&str>) -> Result<Option<CarrierExtra>> {
    let Some(payload) = payload.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let value: serde_json::Value = serde_json::from_str(payload).map_err(Error::decode)?;
    if !value.is_object() {
        return Err(Error::decode(serde::de::Error::custom(
            "carrier extra payload must be a JSON object",
        )));
    }

    let extra = CarrierExtra::deserialize(value).map_err(Error::decode)?;
    Ok(Some(CarrierExtra {
        product: clean(extra.product.as_deref()),
        account_number: clean(extra.account_number.as_deref()),
    }))
}
