//! IPv4 extraction rule.

use crate::dissect::{Dissection, HeaderKind};
use crate::format::format_address;
use crate::record::{FieldMap, FieldValue};
use crate::subnet::SubnetGuess;

use super::category;
use super::rule::ExtractRule;

/// IPv4 extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct Ip4Rule;

impl ExtractRule for Ip4Rule {
    fn kind(&self) -> HeaderKind {
        HeaderKind::Ip4
    }

    fn category(&self) -> &'static str {
        category::NETWORK_LAYER
    }

    fn protocol_type(&self) -> Option<&'static str> {
        Some(self.kind().name())
    }

    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap) {
        let Some(ip) = &dissection.ipv4 else {
            return;
        };

        let source = format_address(&ip.source());
        let destination = format_address(&ip.destination());

        // Both subnet pairs derive from the source address.
        let guess = SubnetGuess::of(&source);
        if let Some(network) = &guess.network {
            fields.insert("sourceNetwork", FieldValue::text(network));
            fields.insert("destinationNetwork", FieldValue::text(network));
        }
        if let Some(bits) = guess.mask_bits {
            fields.insert("sourceNetmaskBits", FieldValue::Num(bits as u64));
            fields.insert("destinationNetmaskBits", FieldValue::Num(bits as u64));
        }

        fields.insert("source", FieldValue::text(source));
        fields.insert("destination", FieldValue::text(destination));
        fields.insert("id", FieldValue::Num(ip.identification() as u64));
        fields.insert("tos", FieldValue::Num(ip.tos() as u64));
        fields.insert("type", FieldValue::Num(ip.protocol() as u64));
        fields.insert("ttl", FieldValue::Num(ip.ttl() as u64));
    }
}
