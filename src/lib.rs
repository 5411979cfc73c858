//! # pcaprec
//!
//! Layered packet header extraction into per-field records.
//!
//! This crate decodes a captured packet's present protocol layers (link,
//! network, transport, application) into one nested [`PacketRecord`] per
//! packet: category key → field name → value, ready for logging, analysis,
//! or forwarding. It also carries two supporting capabilities: a heuristic
//! RFC1918 subnet guess from an IPv4 address string ([`subnet`]) and a
//! lossless byte-level round trip of a captured packet for diagnostics and
//! replay ([`CapturedPacket::to_bytes`] / [`CapturedPacket::from_bytes`]).
//!
//! Capture devices, filters, packet dispatch, and the typed decoding of raw
//! header bytes are external collaborators; decoding is consumed through
//! `etherparse` header slices and `httparse`.
//!
//! ## Quick Start
//!
//! ```rust
//! use pcaprec::{CaptureMetadata, CapturedPacket, HeaderExtractor};
//!
//! // Ethernet frame carrying IPv4/UDP
//! let frame: Vec<u8> = vec![
//!     0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
//!     0x08, 0x00, // ethertype: IPv4
//!     0x45, 0x00, 0x00, 0x1c, 0x00, 0x00, 0x00, 0x00, 0x40, 0x11, 0x00, 0x00,
//!     0xc0, 0xa8, 0x01, 0x01, 0x0a, 0x00, 0x00, 0x02,
//!     0x00, 0x35, 0xc0, 0x00, 0x00, 0x08, 0x00, 0x00, // UDP header
//! ];
//! let wire_len = frame.len() as u32;
//! let packet = CapturedPacket::new(CaptureMetadata::new("Capture", 0, wire_len), frame);
//!
//! let mut extractor = HeaderExtractor::new();
//! if let Some(record) = extractor.extract(&packet) {
//!     for (category, fields) in record.iter() {
//!         println!("{category}: {fields}");
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------------------+
//! |                            pcaprec                               |
//! +------------------------------------------------------------------+
//! |  record   - FieldValue, FieldMap, PacketRecord                   |
//! |  dissect  - one decode pass into typed per-layer views           |
//! |  extract  - rule table + uniform traversal, HeaderExtractor      |
//! |  packet   - CaptureMetadata, CapturedPacket, byte round trip     |
//! |  subnet   - RFC1918 class-prefix heuristic                       |
//! |  format   - address and byte-dump formatting                     |
//! |  error    - error types and the decode-failure sink              |
//! +------------------------------------------------------------------+
//! ```
//!
//! ## Failure model
//!
//! A malformed packet never aborts a stream: [`HeaderExtractor::try_extract`]
//! returns a [`DecodeFailure`] carrying the reason and the full raw bytes,
//! and [`HeaderExtractor::extract`] turns that into a `tracing` diagnostic
//! (with a decimal byte dump) plus `None` for that packet only.
//!
//! ## Concurrency
//!
//! One [`HeaderExtractor`] per worker thread; extraction takes `&mut self`
//! and a single instance must not be shared across threads. The [`subnet`]
//! and [`format`] helpers are pure and freely shareable.

pub mod dissect;
pub mod error;
pub mod extract;
pub mod format;
pub mod packet;
pub mod prelude;
pub mod record;
pub mod subnet;

// Re-export commonly used types at crate root for convenience
pub use dissect::{Dissection, HeaderKind};
pub use error::{DecodeFailure, DissectError, Error, Result, WireError};
pub use extract::{category, HeaderExtractor};
pub use format::{format_address, format_byte_dump, format_ipv4, format_ipv6, format_mac};
pub use packet::{CaptureMetadata, CapturedPacket};
pub use record::{FieldMap, FieldValue, PacketRecord};
pub use subnet::{classify, guess_network, SubnetClass, SubnetGuess};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
