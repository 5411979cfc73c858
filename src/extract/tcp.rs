//! TCP extraction rule.

use smallvec::SmallVec;

use crate::dissect::{tcp_flags, Dissection, HeaderKind};
use crate::record::{FieldMap, FieldValue};

use super::rule::ExtractRule;

/// Fixed ordered (bit, name) pairs for flag-set extraction.
const FLAG_NAMES: [(u16, &str); 9] = [
    (tcp_flags::FIN, "FIN"),
    (tcp_flags::SYN, "SYN"),
    (tcp_flags::RST, "RST"),
    (tcp_flags::PSH, "PSH"),
    (tcp_flags::ACK, "ACK"),
    (tcp_flags::URG, "URG"),
    (tcp_flags::ECE, "ECE"),
    (tcp_flags::CWR, "CWR"),
    (tcp_flags::NS, "NS"),
];

/// TCP extraction rule, including the timestamp option sub-header.
#[derive(Debug, Clone, Copy)]
pub struct TcpRule;

impl ExtractRule for TcpRule {
    fn kind(&self) -> HeaderKind {
        HeaderKind::Tcp
    }

    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap) {
        let Some(tcp) = &dissection.tcp else {
            return;
        };

        fields.insert("source", FieldValue::Num(tcp.source_port() as u64));
        fields.insert(
            "destination",
            FieldValue::Num(tcp.destination_port() as u64),
        );
        fields.insert("ack", FieldValue::Num(tcp.acknowledgment_number() as u64));
        fields.insert("seq", FieldValue::Num(tcp.sequence_number() as u64));

        let mask = tcp.flags_mask();
        let mut names: SmallVec<[&'static str; 9]> = SmallVec::new();
        for (bit, name) in FLAG_NAMES {
            if mask & bit != 0 {
                names.push(name);
            }
        }
        fields.insert("flags", FieldValue::Flags(names));

        if let Some(ts) = dissection.tcp_timestamp {
            let mut sub = FieldMap::new();
            sub.insert("tsval", FieldValue::Num(ts.tsval as u64));
            // TSecr is only meaningful on segments carrying an ACK
            if tcp.ack_set() {
                sub.insert("tsecr", FieldValue::Num(ts.tsecr as u64));
            }
            fields.insert("timestamp", FieldValue::Map(Box::new(sub)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tcp_frame(tcp: &[u8]) -> Vec<u8> {
        let mut frame = vec![
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
            0x08, 0x00, // ethertype: IPv4
            0x45, 0x00, 0x00, 0x28, 0x00, 0x00, 0x00, 0x00, 0x40,
            0x06, 0x00, 0x00, // protocol: TCP
            0xc0, 0xa8, 0x01, 0x01, 0xc0, 0xa8, 0x01, 0x02,
        ];
        frame.extend_from_slice(tcp);
        frame
    }

    #[test]
    fn test_extract_syn() {
        let frame = tcp_frame(&[
            0x00, 0x50, 0x1f, 0x90, // ports 80 -> 8080
            0x00, 0x00, 0x10, 0x00, // seq: 4096
            0x00, 0x00, 0x00, 0x00, // ack: 0
            0x50, 0x02, // offset 5, SYN
            0x72, 0x10, 0x00, 0x00, 0x00, 0x00,
        ]);
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        TcpRule.extract(&dissection, &mut fields);

        assert_eq!(fields.get("source").and_then(|v| v.as_num()), Some(80));
        assert_eq!(
            fields.get("destination").and_then(|v| v.as_num()),
            Some(8080)
        );
        assert_eq!(fields.get("seq").and_then(|v| v.as_num()), Some(4096));
        assert_eq!(fields.get("ack").and_then(|v| v.as_num()), Some(0));
        assert_eq!(
            fields.get("flags").and_then(|v| v.as_flags()),
            Some(&["SYN"][..])
        );
        assert!(!fields.contains("timestamp"));
    }

    #[test]
    fn test_extract_syn_ack_flag_order() {
        let frame = tcp_frame(&[
            0x1f, 0x90, 0x00, 0x50, // ports
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, // seq, ack
            0x50, 0x12, // offset 5, SYN + ACK
            0xff, 0xff, 0x00, 0x00, 0x00, 0x00,
        ]);
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        TcpRule.extract(&dissection, &mut fields);

        // Flag names follow the fixed table order
        assert_eq!(
            fields.get("flags").and_then(|v| v.as_flags()),
            Some(&["SYN", "ACK"][..])
        );
    }

    #[test]
    fn test_timestamp_with_ack_carries_tsecr() {
        let frame = tcp_frame(&[
            0x00, 0x50, 0x1f, 0x90, // ports
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, // seq, ack
            0x80, 0x10, // offset 8, ACK
            0x72, 0x10, 0x00, 0x00, 0x00, 0x00, // window, checksum, urgent
            0x01, 0x01, 0x08, 0x0a, // NOP NOP TS(10)
            0x00, 0x00, 0x00, 0x64, // TSval: 100
            0x00, 0x00, 0x00, 0x32, // TSecr: 50
        ]);
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        TcpRule.extract(&dissection, &mut fields);

        let ts = fields.get("timestamp").and_then(|v| v.as_map()).unwrap();
        assert_eq!(ts.get("tsval").and_then(|v| v.as_num()), Some(100));
        assert_eq!(ts.get("tsecr").and_then(|v| v.as_num()), Some(50));
    }

    #[test]
    fn test_timestamp_without_ack_omits_tsecr() {
        let frame = tcp_frame(&[
            0x00, 0x50, 0x1f, 0x90, // ports
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, // seq, ack
            0x80, 0x02, // offset 8, SYN only
            0x72, 0x10, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x01, 0x08, 0x0a, // NOP NOP TS(10)
            0x00, 0x00, 0x00, 0x64, // TSval: 100
            0x00, 0x00, 0x00, 0x00, // TSecr: 0 (unset)
        ]);
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        TcpRule.extract(&dissection, &mut fields);

        let ts = fields.get("timestamp").and_then(|v| v.as_map()).unwrap();
        assert_eq!(ts.get("tsval").and_then(|v| v.as_num()), Some(100));
        assert!(!ts.contains("tsecr"));
    }
}
