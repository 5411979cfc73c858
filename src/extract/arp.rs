//! ARP extraction rule.

use crate::dissect::{Dissection, HeaderKind};
use crate::format::format_address;
use crate::record::{FieldMap, FieldValue};

use super::rule::ExtractRule;

/// ARP extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct ArpRule;

impl ExtractRule for ArpRule {
    fn kind(&self) -> HeaderKind {
        HeaderKind::Arp
    }

    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap) {
        let Some(arp) = &dissection.arp else {
            return;
        };

        fields.insert(
            "operationDescription",
            FieldValue::text(arp.operation_description()),
        );

        // Address fields exist only for the Ethernet/IPv4 flavor
        if let Some(mac) = arp.target_mac() {
            fields.insert("targetMac", FieldValue::text(format_address(mac)));
        }
        if let Some(ip) = arp.target_ip() {
            fields.insert("targetIp", FieldValue::text(format_address(ip)));
        }
        if let Some(mac) = arp.sender_mac() {
            fields.insert("sourceMac", FieldValue::text(format_address(mac)));
        }
        if let Some(ip) = arp.sender_ip() {
            fields.insert("sourceIp", FieldValue::text(format_address(ip)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_arp_request() {
        let frame = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // dst: broadcast
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // src
            0x08, 0x06, // ethertype: ARP
            0x00, 0x01, // hardware type: Ethernet
            0x08, 0x00, // protocol type: IPv4
            0x06, 0x04, // sizes
            0x00, 0x01, // operation: request
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // sender mac
            0xc0, 0xa8, 0x01, 0x01, // sender ip: 192.168.1.1
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // target mac
            0xc0, 0xa8, 0x01, 0x02, // target ip: 192.168.1.2
        ];
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        ArpRule.extract(&dissection, &mut fields);

        assert_eq!(
            fields.get("operationDescription").and_then(|v| v.as_text()),
            Some("Request")
        );
        assert_eq!(
            fields.get("sourceIp").and_then(|v| v.as_text()),
            Some("192.168.1.1")
        );
        assert_eq!(
            fields.get("targetIp").and_then(|v| v.as_text()),
            Some("192.168.1.2")
        );
        assert_eq!(
            fields.get("sourceMac").and_then(|v| v.as_text()),
            Some("00:11:22:33:44:55")
        );
        assert_eq!(
            fields.get("targetMac").and_then(|v| v.as_text()),
            Some("00:00:00:00:00:00")
        );
    }
}
