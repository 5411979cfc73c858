//! UDP extraction rule.

use crate::dissect::{Dissection, HeaderKind};
use crate::record::{FieldMap, FieldValue};

use super::rule::ExtractRule;

/// UDP extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct UdpRule;

impl ExtractRule for UdpRule {
    fn kind(&self) -> HeaderKind {
        HeaderKind::Udp
    }

    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap) {
        let Some(udp) = &dissection.udp else {
            return;
        };

        fields.insert("source", FieldValue::Num(udp.source_port() as u64));
        fields.insert(
            "destination",
            FieldValue::Num(udp.destination_port() as u64),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ports() {
        let frame = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
            0x08, 0x00, // ethertype: IPv4
            0x45, 0x00, 0x00, 0x1c, 0x00, 0x00, 0x00, 0x00, 0x40,
            0x11, 0x00, 0x00, // protocol: UDP
            0x0a, 0x00, 0x00, 0x01, 0x0a, 0x00, 0x00, 0x02,
            0x00, 0x35, // src port: 53
            0xc3, 0x50, // dst port: 50000
            0x00, 0x08, 0x00, 0x00,
        ];
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        UdpRule.extract(&dissection, &mut fields);

        assert_eq!(fields.get("source").and_then(|v| v.as_num()), Some(53));
        assert_eq!(
            fields.get("destination").and_then(|v| v.as_num()),
            Some(50000)
        );
    }
}
