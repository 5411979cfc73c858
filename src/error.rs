//! Error types for pcaprec.
//!
//! This module provides structured error types for all pcaprec operations:
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`DissectError`] - Errors from decoding protocol headers
//! - [`WireError`] - Errors from the serialized packet byte format
//! - [`DecodeFailure`] - A packet-scoped failure carrying the raw bytes
//!
//! All errors implement `std::error::Error` and can be converted to
//! `anyhow::Error`.

use thiserror::Error;

use crate::format::format_byte_dump;

/// Main error type for pcaprec operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A packet could not be decoded into a record
    #[error("decode failure: {0}")]
    Decode(#[from] DecodeFailure),

    /// Error reading or writing the serialized packet format
    #[error("wire format error: {0}")]
    Wire(#[from] WireError),
}

/// Errors raised while decoding protocol headers out of a packet.
#[derive(Error, Debug)]
pub enum DissectError {
    /// Packet too short for a protocol header
    #[error("{protocol}: header too short (need {needed} bytes, have {have})")]
    Truncated {
        protocol: &'static str,
        needed: usize,
        have: usize,
    },

    /// The decode collaborator rejected a header
    #[error("{protocol}: {reason}")]
    Malformed {
        protocol: &'static str,
        reason: String,
    },
}

/// Errors related to the serialized packet byte format.
#[derive(Error, Debug)]
pub enum WireError {
    /// Serialized form ends before the encoded lengths say it should
    #[error("serialized packet truncated (need {needed} bytes, have {have})")]
    Truncated { needed: usize, have: usize },

    /// Destination buffer cannot hold the packet state and data
    #[error("buffer too small for packet transfer (need {needed} bytes, have {have})")]
    BufferTooSmall { needed: usize, have: usize },

    /// The capture kind label is not valid UTF-8
    #[error("capture kind label is not valid UTF-8")]
    InvalidKindLabel,
}

/// A packet-scoped decode failure: the reason plus the full raw bytes of the
/// offending packet, so a diagnostic dump stays possible after the packet
/// itself is dropped.
///
/// Failures of this kind never abort a stream; the caller skips the packet
/// and continues.
#[derive(Error, Debug)]
#[error("packet decode failed: {reason}")]
pub struct DecodeFailure {
    /// Human-readable failure detail.
    pub reason: String,
    /// Raw bytes of the packet that failed to decode.
    pub bytes: Vec<u8>,
}

impl DecodeFailure {
    /// Render the raw bytes as a bracketed decimal dump.
    pub fn byte_dump(&self) -> String {
        format_byte_dump(&self.bytes)
    }
}

/// Emit the diagnostic for a skipped packet: the failure detail and the full
/// raw-byte dump. No subscriber is installed by the library; the host decides
/// where diagnostics go.
pub fn report_decode_failure(failure: &DecodeFailure) {
    tracing::warn!(
        reason = %failure.reason,
        bytes = %failure.byte_dump(),
        "skipping undecodable packet"
    );
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_dump() {
        let failure = DecodeFailure {
            reason: "ipv4: header too short (need 20 bytes, have 4)".to_string(),
            bytes: vec![0x45, 0x00, 0x00, 0xff],
        };

        assert_eq!(failure.byte_dump(), "[69, 0, 0, 255]");
        assert!(failure.to_string().contains("header too short"));
    }

    #[test]
    fn test_error_wrapping() {
        let wire = WireError::Truncated { needed: 18, have: 4 };
        let err: Error = wire.into();
        assert!(matches!(err, Error::Wire(_)));
    }
}
