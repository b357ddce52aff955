//! Label response parser
//!
//! The response is read in two steps. `quick_xml::de` first fills a loose
//! mirror of the document where every element is optional, then
//! [`validate`] checks the mandatory fields and converts it into a
//! [`LabelResponse`]. A response missing a mandatory field is rejected as a
//! whole; nothing is defaulted.

use crate::{Error, Result};
use dhl_schema::{LabelDetails, LabelResponse, ServiceFlag, ServiceFlags, ShipmentItem};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;
use std::path::Path;

/// Root element of a label response document
pub const RESPONSE_ROOT: &str = "ShipmentData";

#[derive(Debug, Deserialize)]
struct RawShipmentData {
    #[serde(rename = "ShipmentDetails")]
    shipment_details: Option<RawDetails>,
}

#[derive(Debug, Deserialize)]
struct RawDetails {
    product: Option<String>,
    #[serde(rename = "accountNumber")]
    account_number: Option<String>,
    #[serde(rename = "RoutingBarcode")]
    routing_barcode: Option<String>,
    #[serde(rename = "Identifier")]
    identifier: Option<String>,
    #[serde(rename = "ShipmentItem")]
    shipment_item: Option<RawItem>,
    #[serde(rename = "Service")]
    service: Option<RawService>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "weightInKG")]
    weight_in_kg: Option<String>,
    #[serde(rename = "lengthInCM")]
    length_in_cm: Option<String>,
    #[serde(rename = "widthInCM")]
    width_in_cm: Option<String>,
    #[serde(rename = "heightInCM")]
    height_in_cm: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawService {
    #[serde(rename = "Premium")]
    premium: Option<RawFlag>,
    #[serde(rename = "GoGreen")]
    go_green: Option<RawFlag>,
    #[serde(rename = "Endorsement")]
    endorsement: Option<RawFlag>,
    #[serde(rename = "BulkyGoods")]
    bulky_goods: Option<RawFlag>,
}

#[derive(Debug, Deserialize)]
struct RawFlag {
    #[serde(rename = "@active")]
    active: Option<String>,
    #[serde(rename = "@type")]
    kind: Option<String>,
}

/// Parse a label response document.
///
/// # Errors
///
/// Returns [`Error::Xml`] when the document is not well-formed,
/// [`Error::Parse`] when the root element is not `ShipmentData` or a
/// mandatory field is missing or unusable, and
/// [`Error::InvalidFlag`] when a service flag has an unknown `active` value.
pub fn parse_response(xml: &str) -> Result<LabelResponse> {
    check_root(xml)?;
    let raw: RawShipmentData = quick_xml::de::from_str(xml)?;
    let response = validate(raw)?;

    tracing::debug!(
        identifier = %response.shipment_details.identifier,
        product = %response.shipment_details.product,
        "Parsed label response"
    );
    Ok(response)
}

/// Read and parse a label response file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, otherwise the same
/// errors as [`parse_response`].
pub fn parse_response_file(path: impl AsRef<Path>) -> Result<LabelResponse> {
    let xml = std::fs::read_to_string(path.as_ref())?;
    parse_response(&xml)
}

/// Reject documents whose root element is not [`RESPONSE_ROOT`].
///
/// `quick_xml::de` ignores the root name, so it is checked up front.
/// Syntax errors are left for the deserializer to report.
fn check_root(xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element) | Event::Empty(element)) => {
                let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                if name == RESPONSE_ROOT {
                    return Ok(());
                }
                return Err(Error::Parse {
                    field: RESPONSE_ROOT.to_string(),
                    reason: format!("is not the root element, found <{name}>"),
                });
            }
            Ok(Event::Eof) | Err(_) => return Ok(()),
            Ok(_) => {}
        }
    }
}

fn validate(raw: RawShipmentData) -> Result<LabelResponse> {
    let details = raw
        .shipment_details
        .ok_or_else(|| Error::missing("ShipmentDetails"))?;

    let shipment_details = LabelDetails {
        product: required("product", details.product)?,
        account_number: required("accountNumber", details.account_number)?,
        routing_barcode: required("RoutingBarcode", details.routing_barcode)?,
        identifier: required("Identifier", details.identifier)?,
        shipment_item: shipment_item(
            details
                .shipment_item
                .ok_or_else(|| Error::missing("ShipmentItem"))?,
        )?,
        service: details.service.map(service_flags).transpose()?,
    };

    Ok(LabelResponse { shipment_details })
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::missing(field))
}

fn shipment_item(raw: RawItem) -> Result<ShipmentItem> {
    Ok(ShipmentItem {
        weight_in_kg: measure("ShipmentItem.weightInKG", raw.weight_in_kg)?,
        length_in_cm: measure("ShipmentItem.lengthInCM", raw.length_in_cm)?,
        width_in_cm: measure("ShipmentItem.widthInCM", raw.width_in_cm)?,
        height_in_cm: measure("ShipmentItem.heightInCM", raw.height_in_cm)?,
    })
}

fn measure(field: &str, value: Option<String>) -> Result<Option<f64>> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(|| Error::invalid(field, &value))
}

fn service_flags(raw: RawService) -> Result<ServiceFlags> {
    Ok(ServiceFlags {
        premium: raw.premium.map(|f| service_flag("Premium", f)).transpose()?,
        go_green: raw.go_green.map(|f| service_flag("GoGreen", f)).transpose()?,
        endorsement: raw
            .endorsement
            .map(|f| service_flag("Endorsement", f))
            .transpose()?,
        bulky_goods: raw
            .bulky_goods
            .map(|f| service_flag("BulkyGoods", f))
            .transpose()?,
    })
}

fn service_flag(name: &str, raw: RawFlag) -> Result<ServiceFlag> {
    let value = raw.active.unwrap_or_default();
    let active = match value.trim() {
        "1" => true,
        "0" => false,
        v if v.eq_ignore_ascii_case("true") => true,
        v if v.eq_ignore_ascii_case("false") => false,
        _ => {
            return Err(Error::InvalidFlag {
                flag: name.to_string(),
                value,
            });
        }
    };

    Ok(ServiceFlag {
        active,
        details: raw
            .kind
            .map(|kind| kind.trim().to_string())
            .filter(|kind| !kind.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(service: &str) -> String {
        format!(
            "<ShipmentData><ShipmentDetails>\
             <product>V01PAK</product>\
             <accountNumber>22222222220101</accountNumber>\
             <RoutingBarcode>2L8151234567</RoutingBarcode>\
             <Identifier>00340434161094015902</Identifier>\
             <ShipmentItem><weightInKG>1.5</weightInKG></ShipmentItem>\
             {service}\
             </ShipmentDetails></ShipmentData>"
        )
    }

    #[test]
    fn test_missing_service_block_is_none() {
        let response = parse_response(&document("")).unwrap();
        let details = response.shipment_details;
        assert_eq!(details.product, "V01PAK");
        assert_eq!(details.shipment_item.weight_in_kg, Some(1.5));
        assert!(details.shipment_item.length_in_cm.is_none());
        assert!(details.service.is_none());
    }

    #[test]
    fn test_empty_service_block_is_some() {
        let response = parse_response(&document("<Service></Service>")).unwrap();
        assert_eq!(response.shipment_details.service, Some(ServiceFlags::default()));
    }

    #[test]
    fn test_flag_values() {
        for (value, expected) in [("1", true), ("0", false), ("true", true), ("FALSE", false)] {
            let xml = document(&format!(r#"<Service><GoGreen active="{value}"/></Service>"#));
            let flags = parse_response(&xml).unwrap().shipment_details.service.unwrap();
            assert_eq!(flags.go_green.unwrap().active, expected, "{value}");
        }
    }

    #[test]
    fn test_endorsement_type_is_kept() {
        let xml = document(r#"<Service><Endorsement active="1" type="IMMEDIATE"/></Service>"#);
        let flags = parse_response(&xml).unwrap().shipment_details.service.unwrap();
        let endorsement = flags.endorsement.unwrap();
        assert!(endorsement.active);
        assert_eq!(endorsement.details.as_deref(), Some("IMMEDIATE"));
    }

    #[test]
    fn test_invalid_flag_value() {
        let xml = document(r#"<Service><Premium active="yes"/></Service>"#);
        match parse_response(&xml).unwrap_err() {
            Error::InvalidFlag { flag, value } => {
                assert_eq!(flag, "Premium");
                assert_eq!(value, "yes");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_mandatory_field_is_missing() {
        let xml = document("").replace("2L8151234567", "   ");
        match parse_response(&xml).unwrap_err() {
            Error::Parse { field, .. } => assert_eq!(field, "RoutingBarcode"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparseable_weight() {
        let xml = document("").replace(
            "<weightInKG>1.5</weightInKG>",
            "<weightInKG>heavy</weightInKG>",
        );
        let err = parse_response(&xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Response field ShipmentItem.weightInKG has invalid value 'heavy'"
        );
    }

    #[test]
    fn test_missing_details_block() {
        let err = parse_response("<ShipmentData></ShipmentData>").unwrap_err();
        assert!(matches!(err, Error::Parse { ref field, .. } if field == "ShipmentDetails"));
    }

    #[test]
    fn test_unexpected_root_is_rejected() {
        let xml = document("").replace("ShipmentData>", "Bogus>");
        match parse_response(&xml).unwrap_err() {
            Error::Parse { field, reason } => {
                assert_eq!(field, "ShipmentData");
                assert_eq!(reason, "is not the root element, found <Bogus>");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_root_check_skips_declaration_and_comments() {
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- label -->\n{}",
            document("")
        );
        assert!(parse_response(&xml).is_ok());
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_response("<ShipmentData><ShipmentDetails>").unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }
}
