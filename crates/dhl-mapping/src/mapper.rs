//! Shipment order mapper
//!
//! Builds a [`ShipmentOrder`] from a [`ShipmentRequest`]. The mapper only
//! holds immutable configuration, so one instance can serve concurrent
//! callers; every call builds its order from scratch.

use crate::config::MapperConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::extra::{CarrierExtra, decode_extra};
use crate::normalize::{FieldIssue, FieldKind, clean, clean_checked};
use crate::street::split_street;
use crate::{Error, Result};
use chrono::NaiveDate;
use dhl_model::{
    Address, Package, ShipmentRequest, Shipper as RequestShipper, ShipperAddressOverride,
};
use dhl_schema::{
    Communication, Name, NativeAddress, Origin, Receiver, ReceiverAddress, ReceiverNativeAddress,
    Shipment, ShipmentDetails, ShipmentItem, ShipmentOrder, Shipper, ShipperSlot,
    UnstructuredAddress,
};
use std::cell::Cell;

/// Maps generic shipment requests onto DHL shipment orders
#[derive(Debug, Clone, Default)]
pub struct ShipmentOrderMapper {
    config: MapperConfig,
}

impl ShipmentOrderMapper {
    /// Create a mapper with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper with the given configuration
    #[must_use]
    pub fn with_config(config: MapperConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Map a request onto a shipment order.
    ///
    /// `reference` is the caller's correlation token. It becomes the order's
    /// customer reference and stands in for the sequence number when the
    /// request has no `ShipmentId`. Fields set in `shipper_override` replace
    /// the shipper values derived from the request.
    ///
    /// Decisions are recorded through `logger`; a failing logger never fails
    /// the mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] when `ShipTo`, `Shipper`, `Packages` or
    /// `Carrier` is missing, the package list is empty, no sequence number
    /// can be derived or the shipment date is malformed, and
    /// [`Error::Decode`] when the carrier extra payload is malformed.
    pub fn map(
        &self,
        request: &ShipmentRequest,
        logger: &dyn DiagnosticSink,
        reference: &str,
        shipper_override: Option<&ShipperAddressOverride>,
    ) -> Result<ShipmentOrder> {
        let log = Recorder::new(logger);

        let ship_to = request.ship_to.as_ref().ok_or_else(|| Error::missing("ShipTo"))?;
        let shipper = request.shipper.as_ref().ok_or_else(|| Error::missing("Shipper"))?;
        let packages = request
            .packages
            .as_deref()
            .ok_or_else(|| Error::missing("Packages"))?;
        if packages.is_empty() {
            return Err(Error::structural("Packages", "package list is empty"));
        }
        let carrier = request.carrier.as_ref().ok_or_else(|| Error::missing("Carrier"))?;

        let extra = decode_extra(carrier.extra.as_deref())?;
        if extra.is_none() {
            log.record(Diagnostic::info(
                "extra.absent",
                "request has no carrier extra payload",
            ));
        }

        let sequence_number = clean(request.shipment_id.as_deref())
            .or_else(|| clean(Some(reference)))
            .ok_or_else(|| {
                Error::structural("ShipmentId", "no shipment id and no reference token")
            })?;

        let mut issues = Vec::new();
        let shipment_details =
            self.shipment_details(request, packages, extra.unwrap_or_default(), reference, &log)?;
        let shipper = self.shipper_slot(shipper, shipper_override, &mut issues, &log);
        let receiver = self.receiver(ship_to, &mut issues, &log);

        for issue in &issues {
            log.record(Diagnostic::warn("field.suspect", issue.to_string()));
        }

        tracing::debug!(
            sequence_number = %sequence_number,
            suspect_fields = issues.len(),
            "Mapped shipment order"
        );

        Ok(ShipmentOrder {
            sequence_number,
            shipment: Shipment {
                shipment_details,
                shipper,
                receiver,
            },
        })
    }

    fn shipment_details(
        &self,
        request: &ShipmentRequest,
        packages: &[Package],
        extra: CarrierExtra,
        reference: &str,
        log: &Recorder<'_>,
    ) -> Result<ShipmentDetails> {
        let product = with_default(
            extra.product,
            self.config.default_product.as_deref(),
            "product",
            log,
        );
        let account_number = with_default(
            extra.account_number,
            self.config.default_account_number.as_deref(),
            "accountNumber",
            log,
        );

        let shipment_date = clean(request.shipment_date.as_deref())
            .map(|date| {
                NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
                    Error::structural("ShipmentDate", format!("'{date}' is not a YYYY-MM-DD date"))
                })
            })
            .transpose()?;

        Ok(ShipmentDetails {
            product,
            account_number,
            customer_reference: clean(Some(reference)),
            shipment_date,
            shipment_item: shipment_item(packages, log),
        })
    }

    fn shipper_slot(
        &self,
        shipper: &RequestShipper,
        shipper_override: Option<&ShipperAddressOverride>,
        issues: &mut Vec<FieldIssue>,
        log: &Recorder<'_>,
    ) -> ShipperSlot {
        if let Some(reference) = clean(self.config.shipper_reference.as_deref()) {
            log.record(Diagnostic::info(
                "shipper.reference",
                format!("using stored shipper reference {reference}"),
            ));
            if shipper_override.is_some_and(|o| !o.is_empty()) {
                log.record(Diagnostic::warn(
                    "shipper.override_ignored",
                    "shipper override ignored because a shipper reference is configured",
                ));
            }
            return ShipperSlot::Reference(reference);
        }

        let mut mapped = inline_shipper(shipper, issues, log);
        if let Some(shipper_override) = shipper_override {
            let applied = apply_override(&mut mapped, shipper_override);
            log.record(Diagnostic::info(
                "shipper.override",
                format!("shipper override replaced {applied} field(s)"),
            ));
        }
        ShipperSlot::Details(Box::new(mapped))
    }

    fn receiver(
        &self,
        ship_to: &Address,
        issues: &mut Vec<FieldIssue>,
        log: &Recorder<'_>,
    ) -> Receiver {
        let country = clean(ship_to.iso_country.as_deref());
        let name1 = clean(ship_to.name.as_deref());
        let communication = Communication {
            phone: clean_checked(
                "ShipTo.Phone",
                FieldKind::Phone,
                ship_to.phone.as_deref(),
                issues,
            ),
            email: clean_checked(
                "ShipTo.Email",
                FieldKind::Email,
                ship_to.email.as_deref(),
                issues,
            ),
            contact_person: name1.clone(),
        };
        let zip = clean_checked(
            "ShipTo.Postcode",
            FieldKind::Postcode,
            ship_to.postcode.as_deref(),
            issues,
        );

        let address = if self.config.uses_native_address(country.as_deref()) {
            log.record(Diagnostic::info(
                "receiver.native",
                format!(
                    "native address for destination {}",
                    country.as_deref().unwrap_or_default()
                ),
            ));
            let (street_name, street_number) =
                split_line("ShipTo", ship_to.address1.as_deref(), log);
            ReceiverAddress::Native(ReceiverNativeAddress {
                name2: clean(ship_to.company_name.as_deref()),
                street_name,
                street_number,
                address_addition: clean(ship_to.address2.as_deref()),
                zip,
                city: clean(ship_to.town.as_deref()),
                province: clean(ship_to.state.as_deref()),
                origin: Origin::from_code(country),
            })
        } else {
            log.record(Diagnostic::info(
                "receiver.unstructured",
                format!(
                    "unstructured address for destination {}",
                    country.as_deref().unwrap_or("(none)")
                ),
            ));
            ReceiverAddress::Unstructured(UnstructuredAddress {
                name2: clean(ship_to.company_name.as_deref()),
                address_line1: clean(ship_to.address1.as_deref()),
                address_line2: clean(ship_to.address2.as_deref()),
                zip,
                city: clean(ship_to.town.as_deref()),
                province: clean(ship_to.state.as_deref()),
                origin: Origin::from_code(country),
            })
        };

        Receiver {
            name1,
            address,
            communication,
        }
    }
}

fn with_default(
    value: Option<String>,
    fallback: Option<&str>,
    field: &'static str,
    log: &Recorder<'_>,
) -> Option<String> {
    if value.is_some() {
        return value;
    }
    let fallback = clean(fallback);
    match &fallback {
        Some(default) => log.record(Diagnostic::debug(
            "extra.default",
            format!("{field} taken from configuration: {default}"),
        )),
        None => log.record(Diagnostic::warn(
            "extra.missing",
            format!("no {field} in carrier extra payload or configuration"),
        )),
    }
    fallback
}

fn inline_shipper(
    shipper: &RequestShipper,
    issues: &mut Vec<FieldIssue>,
    log: &Recorder<'_>,
) -> Shipper {
    let (street_name, street_number) = split_line("Shipper", shipper.address1.as_deref(), log);

    Shipper {
        name: Name {
            name1: clean(shipper.name.as_deref()),
            ..Name::default()
        },
        address: NativeAddress {
            street_name,
            street_number,
            address_addition: clean(shipper.address2.as_deref()),
            zip: clean_checked(
                "Shipper.Postcode",
                FieldKind::Postcode,
                shipper.postcode.as_deref(),
                issues,
            ),
            city: clean(shipper.town.as_deref()),
            province: clean(shipper.state.as_deref()),
            origin: Origin::from_code(clean(shipper.iso_country.as_deref())),
        },
        communication: Communication {
            phone: clean_checked(
                "Shipper.Phone",
                FieldKind::Phone,
                shipper.phone.as_deref(),
                issues,
            ),
            email: clean_checked(
                "Shipper.Email",
                FieldKind::Email,
                shipper.email.as_deref(),
                issues,
            ),
            contact_person: clean(shipper.contact_name.as_deref()),
        },
    }
}

/// Apply every present override field, returning how many were applied.
///
/// A present but blank override value clears the field.
fn apply_override(shipper: &mut Shipper, shipper_override: &ShipperAddressOverride) -> usize {
    let ShipperAddressOverride {
        name,
        name2,
        contact_person,
        street_name,
        street_number,
        address_addition,
        zip,
        city,
        province,
        phone,
        email,
        origin_country,
    } = shipper_override;

    let address = &mut shipper.address;
    let communication = &mut shipper.communication;
    let mut applied = [
        replace(&mut shipper.name.name1, name),
        replace(&mut shipper.name.name2, name2),
        replace(&mut communication.contact_person, contact_person),
        replace(&mut communication.phone, phone),
        replace(&mut communication.email, email),
        replace(&mut address.street_name, street_name),
        replace(&mut address.street_number, street_number),
        replace(&mut address.address_addition, address_addition),
        replace(&mut address.zip, zip),
        replace(&mut address.city, city),
        replace(&mut address.province, province),
    ]
    .into_iter()
    .filter(|applied| *applied)
    .count();

    if let Some(country) = origin_country {
        address.origin = Origin::from_code(clean(Some(country.as_str())));
        applied += 1;
    }
    applied
}

fn replace(target: &mut Option<String>, value: &Option<String>) -> bool {
    match value {
        Some(value) => {
            *target = clean(Some(value.as_str()));
            true
        }
        None => false,
    }
}

/// Split an address line into cleaned street name and number.
fn split_line(
    party: &str,
    line: Option<&str>,
    log: &Recorder<'_>,
) -> (Option<String>, Option<String>) {
    let Some(line) = clean(line) else {
        return (None, None);
    };
    let parts = split_street(&line);
    if !parts.has_number() {
        log.record(Diagnostic::debug(
            "street.no_number",
            format!("{party} street line '{line}' has no house number"),
        ));
    }
    (clean(Some(parts.name)), clean(Some(parts.number)))
}

/// Total weight over all packages, dimensions of the first one.
fn shipment_item(packages: &[Package], log: &Recorder<'_>) -> ShipmentItem {
    if packages.len() > 1 {
        log.record(Diagnostic::info(
            "packages.merged",
            format!("{} packages merged into one shipment item", packages.len()),
        ));
    }

    let weights: Vec<f64> = packages
        .iter()
        .filter_map(|package| package.weight)
        .filter(|weight| *weight > 0.0)
        .collect();
    let weight_in_kg = (!weights.is_empty()).then(|| weights.iter().sum::<f64>());

    let first = &packages[0];
    let positive = |value: Option<f64>| value.filter(|v| *v > 0.0);
    ShipmentItem {
        weight_in_kg,
        length_in_cm: positive(first.length),
        width_in_cm: positive(first.width),
        height_in_cm: positive(first.height),
    }
}

/// Per-call wrapper that swallows sink failures.
struct Recorder<'a> {
    sink: &'a dyn DiagnosticSink,
    failed: Cell<bool>,
}

impl<'a> Recorder<'a> {
    fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            sink,
            failed: Cell::new(false),
        }
    }

    fn record(&self, diagnostic: Diagnostic) {
        if let Err(err) = self.sink.record(&diagnostic) {
            if !self.failed.replace(true) {
                tracing::warn!(
                    code = diagnostic.code,
                    error = %err,
                    "Diagnostic sink failed; further failures in this mapping are ignored"
                );
            }
        }
    }
}
