//! IPv6 extraction rule.

use crate::dissect::{Dissection, HeaderKind};
use crate::format::format_address;
use crate::record::{FieldMap, FieldValue};

use super::category;
use super::rule::ExtractRule;

/// IPv6 extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct Ip6Rule;

impl ExtractRule for Ip6Rule {
    fn kind(&self) -> HeaderKind {
        HeaderKind::Ip6
    }

    fn category(&self) -> &'static str {
        category::NETWORK_LAYER
    }

    fn protocol_type(&self) -> Option<&'static str> {
        Some(self.kind().name())
    }

    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap) {
        let Some(ip) = &dissection.ipv6 else {
            return;
        };

        fields.insert("source", FieldValue::text(format_address(&ip.source())));
        fields.insert(
            "destination",
            FieldValue::text(format_address(&ip.destination())),
        );
        fields.insert("flowLabel", FieldValue::Num(ip.flow_label() as u64));
        fields.insert("hopLimit", FieldValue::Num(ip.hop_limit() as u64));
        fields.insert("trafficClass", FieldValue::Num(ip.traffic_class() as u64));
    }
}
