//! Captured packets and their byte-level round trip.
//!
//! A [`CapturedPacket`] owns the capture-time metadata snapshot and the raw
//! captured bytes. For diagnostics and replay it can be serialized into a
//! single byte sequence (state first, then data) and reconstituted from one,
//! such that extraction over the reconstituted packet yields a record
//! field-equal to the original's.

use compact_str::CompactString;

use crate::dissect::{Dissection, HeaderKind};
use crate::error::WireError;

/// Per-packet capture-time metadata, distinct from protocol headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureMetadata {
    /// Capture kind label; becomes the metadata category key in the record.
    pub kind: CompactString,
    /// Capture timestamp in nanoseconds.
    pub timestamp_nanos: u64,
    /// Original length of the packet on the wire.
    pub wire_len: u32,
}

impl CaptureMetadata {
    /// Create a metadata snapshot.
    pub fn new(kind: impl Into<CompactString>, timestamp_nanos: u64, wire_len: u32) -> Self {
        Self {
            kind: kind.into(),
            timestamp_nanos,
            wire_len,
        }
    }
}

// Serialized layout: kind length (u16) + kind bytes + timestamp (u64) +
// wire_len (u32) + data length (u32) + data bytes. All integers big-endian.
const KIND_LEN_BYTES: usize = 2;
const FIXED_STATE_BYTES: usize = KIND_LEN_BYTES + 8 + 4 + 4;

/// A captured packet: metadata snapshot plus the raw captured bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPacket {
    metadata: CaptureMetadata,
    data: Vec<u8>,
}

impl CapturedPacket {
    /// Create a packet from its metadata and raw bytes.
    pub fn new(metadata: CaptureMetadata, data: Vec<u8>) -> Self {
        Self { metadata, data }
    }

    /// The capture metadata snapshot.
    pub fn metadata(&self) -> &CaptureMetadata {
        &self.metadata
    }

    /// The raw captured bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Check whether a header of the given kind decodes out of this packet.
    pub fn has_header(&self, kind: HeaderKind) -> bool {
        Dissection::of(&self.data)
            .map(|d| d.has(kind))
            .unwrap_or(false)
    }

    /// Total serialized size: state plus data.
    pub fn total_size(&self) -> usize {
        FIXED_STATE_BYTES + self.metadata.kind.len() + self.data.len()
    }

    /// Transfer full state and data into the caller's buffer.
    ///
    /// Returns the number of bytes written.
    pub fn transfer_state_and_data_to(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let needed = self.total_size();
        if buf.len() < needed {
            return Err(WireError::BufferTooSmall {
                needed,
                have: buf.len(),
            });
        }
        self.write_state_and_data(buf);
        Ok(needed)
    }

    /// Reconstitute a packet from a buffer produced by
    /// [`transfer_state_and_data_to`](Self::transfer_state_and_data_to).
    pub fn transfer_state_and_data_from(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < FIXED_STATE_BYTES {
            return Err(WireError::Truncated {
                needed: FIXED_STATE_BYTES,
                have: buf.len(),
            });
        }

        let kind_len = u16::from_be_bytes([buf[0], buf[1]]) as usize;
        let needed = FIXED_STATE_BYTES + kind_len;
        if buf.len() < needed {
            return Err(WireError::Truncated {
                needed,
                have: buf.len(),
            });
        }

        let mut at = KIND_LEN_BYTES;
        let kind = std::str::from_utf8(&buf[at..at + kind_len])
            .map_err(|_| WireError::InvalidKindLabel)?;
        at += kind_len;

        let timestamp_nanos = u64::from_be_bytes([
            buf[at],
            buf[at + 1],
            buf[at + 2],
            buf[at + 3],
            buf[at + 4],
            buf[at + 5],
            buf[at + 6],
            buf[at + 7],
        ]);
        at += 8;
        let wire_len = u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        at += 4;
        let data_len =
            u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]) as usize;
        at += 4;

        if buf.len() < at + data_len {
            return Err(WireError::Truncated {
                needed: at + data_len,
                have: buf.len(),
            });
        }

        Ok(Self {
            metadata: CaptureMetadata::new(kind, timestamp_nanos, wire_len),
            data: buf[at..at + data_len].to_vec(),
        })
    }

    /// Serialize into a fresh byte sequence.
    ///
    /// Allocates a zero-filled buffer of [`total_size`](Self::total_size)
    /// and transfers state and data into it.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.total_size()];
        self.write_state_and_data(&mut buf);
        buf
    }

    /// Reconstitute a packet from a serialized byte sequence.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        Self::transfer_state_and_data_from(bytes)
    }

    // Caller guarantees buf.len() >= total_size().
    fn write_state_and_data(&self, buf: &mut [u8]) {
        let kind = self.metadata.kind.as_bytes();
        let mut at = 0;
        buf[at..at + 2].copy_from_slice(&(kind.len() as u16).to_be_bytes());
        at += 2;
        buf[at..at + kind.len()].copy_from_slice(kind);
        at += kind.len();
        buf[at..at + 8].copy_from_slice(&self.metadata.timestamp_nanos.to_be_bytes());
        at += 8;
        buf[at..at + 4].copy_from_slice(&self.metadata.wire_len.to_be_bytes());
        at += 4;
        buf[at..at + 4].copy_from_slice(&(self.data.len() as u32).to_be_bytes());
        at += 4;
        buf[at..at + self.data.len()].copy_from_slice(&self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_packet() -> CapturedPacket {
        CapturedPacket::new(
            CaptureMetadata::new("Capture", 1_700_000_000_123_456_789, 74),
            vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0xff],
        )
    }

    #[test]
    fn test_total_size() {
        let packet = sample_packet();
        // 2 + 7 ("Capture") + 8 + 4 + 4 + 6 data bytes
        assert_eq!(packet.total_size(), 31);
        assert_eq!(packet.to_bytes().len(), packet.total_size());
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let packet = sample_packet();
        let bytes = packet.to_bytes();
        let restored = CapturedPacket::from_bytes(&bytes).unwrap();

        assert_eq!(restored, packet);
        assert_eq!(restored.metadata().kind, "Capture");
        assert_eq!(restored.metadata().timestamp_nanos, 1_700_000_000_123_456_789);
        assert_eq!(restored.metadata().wire_len, 74);
        assert_eq!(restored.data(), packet.data());
    }

    #[test]
    fn test_transfer_buffer_too_small() {
        let packet = sample_packet();
        let mut buf = vec![0u8; packet.total_size() - 1];

        let err = packet.transfer_state_and_data_to(&mut buf).unwrap_err();
        assert!(matches!(err, WireError::BufferTooSmall { .. }));
    }

    #[test]
    fn test_transfer_into_exact_buffer() {
        let packet = sample_packet();
        let mut buf = vec![0u8; packet.total_size()];

        let written = packet.transfer_state_and_data_to(&mut buf).unwrap();
        assert_eq!(written, packet.total_size());
        assert_eq!(buf, packet.to_bytes());
    }

    #[test]
    fn test_from_bytes_truncated() {
        let packet = sample_packet();
        let bytes = packet.to_bytes();

        assert!(matches!(
            CapturedPacket::from_bytes(&bytes[..4]),
            Err(WireError::Truncated { .. })
        ));
        assert!(matches!(
            CapturedPacket::from_bytes(&bytes[..bytes.len() - 1]),
            Err(WireError::Truncated { .. })
        ));
    }

    #[test]
    fn test_empty_data_round_trip() {
        let packet = CapturedPacket::new(CaptureMetadata::new("pcap", 0, 0), Vec::new());
        let restored = CapturedPacket::from_bytes(&packet.to_bytes()).unwrap();
        assert_eq!(restored, packet);
    }
}
