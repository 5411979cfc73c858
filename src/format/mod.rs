//! Address and byte-dump formatting utilities.

mod address;

pub use address::{format_address, format_byte_dump, format_ipv4, format_ipv6, format_mac};
