//! Convenience re-exports for common usage.
//!
//! ```rust
//! use pcaprec::prelude::*;
//! ```

pub use crate::dissect::{Dissection, HeaderKind};
pub use crate::error::{DecodeFailure, Error, Result};
pub use crate::extract::HeaderExtractor;
pub use crate::packet::{CaptureMetadata, CapturedPacket};
pub use crate::record::{FieldMap, FieldValue, PacketRecord};
pub use crate::subnet::{SubnetClass, SubnetGuess};
