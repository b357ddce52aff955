//! Shipment order XML writer

use crate::{Error, Result};
use dhl_schema::{
    Communication, Name, NativeAddress, Origin, Receiver, ReceiverAddress, ReceiverNativeAddress,
    ShipmentDetails, ShipmentItem, ShipmentOrder, ShipperSlot, UnstructuredAddress,
};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Writes a [`ShipmentOrder`] as the carrier's XML request body.
///
/// Absent optional fields produce no element at all.
#[derive(Debug, Clone, Copy)]
pub struct OrderSerializer {
    indent: Option<usize>,
}

impl Default for OrderSerializer {
    fn default() -> Self {
        Self { indent: Some(2) }
    }
}

impl OrderSerializer {
    /// Serializer with two-space indentation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializer producing a single line
    #[must_use]
    pub fn compact() -> Self {
        Self { indent: None }
    }

    /// Serialize `order` to a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] when the output cannot be produced.
    pub fn to_xml(&self, order: &ShipmentOrder) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(order, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::Write(e.to_string()))
    }

    /// Serialize `order` into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when writing to `out` fails.
    pub fn write<W: Write>(&self, order: &ShipmentOrder, out: W) -> Result<()> {
        let writer = match self.indent {
            Some(width) => Writer::new_with_indent(out, b' ', width),
            None => Writer::new(out),
        };
        let mut xml = XmlOut { writer };

        xml.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.start("ShipmentOrder")?;
        xml.text("sequenceNumber", &order.sequence_number)?;

        xml.start("Shipment")?;
        shipment_details(&mut xml, &order.shipment.shipment_details)?;
        match &order.shipment.shipper {
            ShipperSlot::Details(shipper) => {
                xml.start("Shipper")?;
                name(&mut xml, &shipper.name)?;
                native_address(&mut xml, &shipper.address)?;
                communication(&mut xml, &shipper.communication)?;
                xml.end("Shipper")?;
            }
            ShipperSlot::Reference(reference) => xml.text("ShipperReference", reference)?,
        }
        receiver(&mut xml, &order.shipment.receiver)?;
        xml.end("Shipment")?;

        xml.end("ShipmentOrder")?;
        tracing::debug!(sequence_number = %order.sequence_number, "Serialized shipment order");
        Ok(())
    }
}

struct XmlOut<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlOut<W> {
    fn start(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn optional(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(text) => self.text(name, text),
            None => Ok(()),
        }
    }

    fn number(&mut self, name: &str, value: Option<f64>) -> Result<()> {
        match value {
            Some(number) => self.text(name, &number.to_string()),
            None => Ok(()),
        }
    }
}

fn shipment_details<W: Write>(xml: &mut XmlOut<W>, details: &ShipmentDetails) -> Result<()> {
    xml.start("ShipmentDetails")?;
    xml.optional("product", details.product.as_deref())?;
    xml.optional("accountNumber", details.account_number.as_deref())?;
    xml.optional("customerReference", details.customer_reference.as_deref())?;
    if let Some(date) = details.shipment_date {
        xml.text("shipmentDate", &date.format("%Y-%m-%d").to_string())?;
    }
    shipment_item(xml, &details.shipment_item)?;
    xml.end("ShipmentDetails")
}

fn shipment_item<W: Write>(xml: &mut XmlOut<W>, item: &ShipmentItem) -> Result<()> {
    xml.start("ShipmentItem")?;
    xml.number("weightInKG", item.weight_in_kg)?;
    xml.number("lengthInCM", item.length_in_cm)?;
    xml.number("widthInCM", item.width_in_cm)?;
    xml.number("heightInCM", item.height_in_cm)?;
    xml.end("ShipmentItem")
}

fn name<W: Write>(xml: &mut XmlOut<W>, name: &Name) -> Result<()> {
    xml.start("Name")?;
    xml.optional("name1", name.name1.as_deref())?;
    xml.optional("name2", name.name2.as_deref())?;
    xml.optional("name3", name.name3.as_deref())?;
    xml.end("Name")
}

fn native_address<W: Write>(xml: &mut XmlOut<W>, address: &NativeAddress) -> Result<()> {
    xml.start("Address")?;
    xml.optional("streetName", address.street_name.as_deref())?;
    xml.optional("streetNumber", address.street_number.as_deref())?;
    xml.optional("addressAddition", address.address_addition.as_deref())?;
    xml.optional("zip", address.zip.as_deref())?;
    xml.optional("city", address.city.as_deref())?;
    xml.optional("province", address.province.as_deref())?;
    origin(xml, address.origin.as_ref())?;
    xml.end("Address")
}

fn receiver<W: Write>(xml: &mut XmlOut<W>, receiver: &Receiver) -> Result<()> {
    xml.start("Receiver")?;
    xml.optional("name1", receiver.name1.as_deref())?;
    match &receiver.address {
        ReceiverAddress::Native(address) => receiver_native_address(xml, address)?,
        ReceiverAddress::Unstructured(address) => unstructured_address(xml, address)?,
    }
    communication(xml, &receiver.communication)?;
    xml.end("Receiver")
}

fn receiver_native_address<W: Write>(
    xml: &mut XmlOut<W>,
    address: &ReceiverNativeAddress,
) -> Result<()> {
    xml.start("Address")?;
    xml.optional("name2", address.name2.as_deref())?;
    xml.optional("streetName", address.street_name.as_deref())?;
    xml.optional("streetNumber", address.street_number.as_deref())?;
    xml.optional("addressAddition", address.address_addition.as_deref())?;
    xml.optional("zip", address.zip.as_deref())?;
    xml.optional("city", address.city.as_deref())?;
    xml.optional("province", address.province.as_deref())?;
    origin(xml, address.origin.as_ref())?;
    xml.end("Address")
}

fn unstructured_address<W: Write>(
    xml: &mut XmlOut<W>,
    address: &UnstructuredAddress,
) -> Result<()> {
    xml.start("UnstructuredAddress")?;
    xml.optional("name2", address.name2.as_deref())?;
    xml.optional("addressLine1", address.address_line1.as_deref())?;
    xml.optional("addressLine2", address.address_line2.as_deref())?;
    xml.optional("zip", address.zip.as_deref())?;
    xml.optional("city", address.city.as_deref())?;
    xml.optional("province", address.province.as_deref())?;
    origin(xml, address.origin.as_ref())?;
    xml.end("UnstructuredAddress")
}

fn origin<W: Write>(xml: &mut XmlOut<W>, origin: Option<&Origin>) -> Result<()> {
    let Some(origin) = origin else {
        return Ok(());
    };
    xml.start("Origin")?;
    xml.text("countryISOCode", &origin.country_iso_code)?;
    xml.end("Origin")
}

fn communication<W: Write>(xml: &mut XmlOut<W>, communication: &Communication) -> Result<()> {
    if communication.is_empty() {
        return Ok(());
    }
    xml.start("Communication")?;
    xml.optional("phone", communication.phone.as_deref())?;
    xml.optional("email", communication.email.as_deref())?;
    xml.optional("contactPerson", communication.contact_person.as_deref())?;
    xml.end("Communication")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhl_schema::Shipment;

    fn order(shipper: ShipperSlot, address: ReceiverAddress) -> ShipmentOrder {
        ShipmentOrder {
            sequence_number: "3334430".to_string(),
            shipment: Shipment {
                shipment_details: ShipmentDetails {
                    product: Some("V53WPAK".to_string()),
                    account_number: None,
                    customer_reference: Some("R&D <1>".to_string()),
                    shipment_date: None,
                    shipment_item: ShipmentItem {
                        weight_in_kg: Some(1.5),
                        ..ShipmentItem::default()
                    },
                },
                shipper,
                receiver: Receiver {
                    name1: Some("Max Mustermann".to_string()),
                    address,
                    communication: Communication::default(),
                },
            },
        }
    }

    #[test]
    fn test_compact_output_omits_absent_fields() {
        let order = order(
            ShipperSlot::Reference("SHIPPER-1".to_string()),
            ReceiverAddress::Native(ReceiverNativeAddress {
                zip: Some("53113".to_string()),
                ..ReceiverNativeAddress::default()
            }),
        );
        let xml = OrderSerializer::compact().to_xml(&order).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<sequenceNumber>3334430</sequenceNumber>"));
        assert!(xml.contains("<ShipperReference>SHIPPER-1</ShipperReference>"));
        assert!(xml.contains("<ShipmentItem><weightInKG>1.5</weightInKG></ShipmentItem>"));
        assert!(xml.contains("<Address><zip>53113</zip></Address>"));
        assert!(!xml.contains("accountNumber"));
        assert!(!xml.contains("Communication"));
    }

    #[test]
    fn test_text_is_escaped() {
        let order = order(
            ShipperSlot::Details(Box::default()),
            ReceiverAddress::Unstructured(UnstructuredAddress::default()),
        );
        let xml = OrderSerializer::compact().to_xml(&order).unwrap();
        assert!(xml.contains("<customerReference>R&amp;D &lt;1&gt;</customerReference>"));
        assert!(xml.contains("<UnstructuredAddress></UnstructuredAddress>"));
    }

    #[test]
    fn test_indented_output_has_one_element_per_line() {
        let order = order(
            ShipperSlot::Reference("SHIPPER-1".to_string()),
            ReceiverAddress::Native(ReceiverNativeAddress::default()),
        );
        let xml = OrderSerializer::new().to_xml(&order).unwrap();
        assert!(xml.contains("\n  <sequenceNumber>3334430</sequenceNumber>"));
        assert!(xml.contains("\n    <ShipmentDetails>"));
    }
}
