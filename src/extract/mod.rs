//! Header extraction: a fixed, ordered table of per-protocol rules consumed
//! by one uniform traversal.
//!
//! [`HeaderExtractor`] walks its rule table once per packet. For every rule
//! whose header kind is present it emits a category entry of
//! `index` + optional `ProtocolType` + protocol fields + optional `next`,
//! merging entries into the [`PacketRecord`] with last-write-wins on
//! category key collisions. The capture metadata contributes its own
//! category keyed by the metadata kind label.
//!
//! A failure while decoding any header is packet-scoped: the packet yields
//! a [`DecodeFailure`] (or, via [`extract`](HeaderExtractor::extract), a
//! diagnostic plus `None`) and the caller's stream continues.

mod arp;
mod ethernet;
mod http;
mod icmp;
mod ipv4;
mod ipv6;
mod rule;
mod tcp;
mod udp;

pub use arp::ArpRule;
pub use ethernet::EthernetRule;
pub use http::HttpRule;
pub use icmp::IcmpRule;
pub use ipv4::Ip4Rule;
pub use ipv6::Ip6Rule;
pub use rule::{ExtractRule, HeaderRule};
pub use tcp::TcpRule;
pub use udp::UdpRule;

use crate::dissect::Dissection;
use crate::error::{report_decode_failure, DecodeFailure};
use crate::packet::CapturedPacket;
use crate::record::{FieldMap, FieldValue, PacketRecord};

/// Category keys shared by multiple protocol kinds.
pub mod category {
    pub const DATA_LINK_LAYER: &str = "DataLinkLayer";
    pub const NETWORK_LAYER: &str = "NetworkLayer";
}

/// Extracts per-field records from captured packets.
///
/// The rule instances are created once at construction and reused across
/// packets. Extraction takes `&mut self`, so a single extractor cannot be
/// driven from two threads at once; give each worker thread its own
/// instance. The stateless helpers ([`crate::subnet`], [`crate::format`])
/// stay freely shareable.
#[derive(Debug)]
pub struct HeaderExtractor {
    rules: Vec<HeaderRule>,
}

impl HeaderExtractor {
    /// Create an extractor with the built-in rule table.
    ///
    /// Table order is merge order: a later rule wins a category key
    /// collision, so IPv6 takes the NetworkLayer key over IPv4.
    pub fn new() -> Self {
        let mut extractor = Self { rules: Vec::new() };

        extractor.register(EthernetRule);
        extractor.register(ArpRule);
        extractor.register(IcmpRule);
        extractor.register(Ip4Rule);
        extractor.register(Ip6Rule);
        extractor.register(TcpRule);
        extractor.register(UdpRule);
        extractor.register(HttpRule);

        extractor
    }

    /// Register an extraction rule.
    fn register<R: Into<HeaderRule>>(&mut self, rule: R) {
        self.rules.push(rule.into());
    }

    /// Extract a record, or the packet-scoped failure with the raw bytes.
    pub fn try_extract(
        &mut self,
        packet: &CapturedPacket,
    ) -> Result<PacketRecord, DecodeFailure> {
        let dissection = Dissection::of(packet.data()).map_err(|e| DecodeFailure {
            reason: e.to_string(),
            bytes: packet.data().to_vec(),
        })?;

        let mut record = PacketRecord::new();

        let metadata = packet.metadata();
        let mut fields = FieldMap::new();
        fields.insert("timestampNanos", FieldValue::Num(metadata.timestamp_nanos));
        fields.insert("wireLen", FieldValue::Num(metadata.wire_len as u64));
        record.insert(metadata.kind.as_str(), fields);

        for rule in &mut self.rules {
            let Some(layer) = dissection.layer(rule.kind()) else {
                continue;
            };

            let mut fields = FieldMap::new();
            fields.insert("index", FieldValue::Num(layer.index as u64));
            if let Some(protocol_type) = rule.protocol_type() {
                fields.insert("ProtocolType", FieldValue::text(protocol_type));
            }
            rule.extract(&dissection, &mut fields);
            if let Some(next) = layer.next {
                fields.insert("next", FieldValue::Num(next.id() as u64));
            }

            record.insert(rule.category(), fields);
        }

        Ok(record)
    }

    /// Extract a record, routing any failure through the diagnostic sink.
    ///
    /// Returns `None` for the failed packet only; callers keep processing
    /// their stream.
    pub fn extract(&mut self, packet: &CapturedPacket) -> Option<PacketRecord> {
        match self.try_extract(packet) {
            Ok(record) => Some(record),
            Err(failure) => {
                report_decode_failure(&failure);
                None
            }
        }
    }
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new()
    }
}
