//! Ethernet II extraction rule.

use crate::dissect::{Dissection, HeaderKind};
use crate::format::format_address;
use crate::record::{FieldMap, FieldValue};

use super::category;
use super::rule::ExtractRule;

/// Ethernet II extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct EthernetRule;

impl ExtractRule for EthernetRule {
    fn kind(&self) -> HeaderKind {
        HeaderKind::Ethernet
    }

    fn category(&self) -> &'static str {
        category::DATA_LINK_LAYER
    }

    fn protocol_type(&self) -> Option<&'static str> {
        Some(self.kind().name())
    }

    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap) {
        let Some(eth) = &dissection.ethernet else {
            return;
        };

        fields.insert("source", FieldValue::text(format_address(&eth.source())));
        fields.insert(
            "destination",
            FieldValue::text(format_address(&eth.destination())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_macs() {
        let frame = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // dst: broadcast
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // src
            0x88, 0xcc, // ethertype: not decoded further
            0x00, 0x00,
        ];
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        EthernetRule.extract(&dissection, &mut fields);

        assert_eq!(
            fields.get("source").and_then(|v| v.as_text()),
            Some("00:11:22:33:44:55")
        );
        assert_eq!(
            fields.get("destination").and_then(|v| v.as_text()),
            Some("FF:FF:FF:FF:FF:FF")
        );
    }
}
