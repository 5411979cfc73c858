//! Raw address formatting.
//!
//! Converts fixed-length raw byte sequences into canonical address strings.
//! The byte length alone selects the rendering: 6 bytes is a MAC address,
//! 4 an IPv4 address, 16 an IPv6 address. Any other length falls back to a
//! generic decimal rendering rather than an error. Bytes are always treated
//! as unsigned 0-255.

use std::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Format 6 bytes as a MAC address string in colon-separated uppercase hex.
///
/// Returns `None` if the slice is not exactly 6 bytes.
///
/// # Example
///
/// ```
/// use pcaprec::format::format_mac;
///
/// let bytes = [0x00, 0x11, 0x22, 0x33, 0x44, 0xff];
/// assert_eq!(format_mac(&bytes), Some("00:11:22:33:44:FF".to_string()));
/// ```
pub fn format_mac(bytes: &[u8]) -> Option<String> {
    if bytes.len() != 6 {
        return None;
    }
    Some(format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]
    ))
}

/// Format 4 bytes as an IPv4 address string in dotted-decimal notation.
///
/// Returns `None` if the slice is not exactly 4 bytes.
///
/// # Example
///
/// ```
/// use pcaprec::format::format_ipv4;
///
/// assert_eq!(format_ipv4(&[192, 168, 1, 1]), Some("192.168.1.1".to_string()));
/// ```
pub fn format_ipv4(bytes: &[u8]) -> Option<String> {
    if bytes.len() != 4 {
        return None;
    }
    Some(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]).to_string())
}

/// Format 16 bytes as an IPv6 address string with standard zero-run
/// compression.
///
/// Returns `None` if the slice is not exactly 16 bytes.
///
/// # Example
///
/// ```
/// use pcaprec::format::format_ipv6;
///
/// let bytes = [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
/// assert_eq!(format_ipv6(&bytes), Some("2001:db8::1".to_string()));
/// ```
pub fn format_ipv6(bytes: &[u8]) -> Option<String> {
    if bytes.len() != 16 {
        return None;
    }
    let octets: [u8; 16] = bytes.try_into().ok()?;
    Some(Ipv6Addr::from(octets).to_string())
}

/// Format a raw address of any length.
///
/// Length 6 renders as a MAC, 4 as IPv4, 16 as IPv6; anything else falls
/// back to [`format_byte_dump`].
pub fn format_address(bytes: &[u8]) -> String {
    match bytes.len() {
        6 => format_mac(bytes),
        4 => format_ipv4(bytes),
        16 => format_ipv6(bytes),
        _ => None,
    }
    .unwrap_or_else(|| format_byte_dump(bytes))
}

/// Render bytes as bracketed decimal values, e.g. `[69, 0, 255]`.
///
/// Used both as the unrecognized-address fallback and as the raw dump the
/// error sink attaches to skipped packets.
pub fn format_byte_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 4);
    out.push('[');
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // write! into a String cannot fail
        let _ = write!(out, "{b}");
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mac_uppercase() {
        let bytes = [0x00, 0x11, 0x22, 0x33, 0x44, 0xff];
        assert_eq!(format_mac(&bytes), Some("00:11:22:33:44:FF".to_string()));
    }

    #[test]
    fn test_format_mac_high_bytes() {
        // Values above 0x7f must not render as negative or mis-padded
        let bytes = [0xde, 0xad, 0xbe, 0xef, 0xca, 0xfe];
        assert_eq!(format_mac(&bytes), Some("DE:AD:BE:EF:CA:FE".to_string()));
    }

    #[test]
    fn test_format_mac_invalid_length() {
        assert_eq!(format_mac(&[0; 5]), None);
        assert_eq!(format_mac(&[0; 7]), None);
        assert_eq!(format_mac(&[]), None);
    }

    #[test]
    fn test_format_ipv4_common() {
        assert_eq!(format_ipv4(&[192, 168, 1, 1]), Some("192.168.1.1".to_string()));
        assert_eq!(format_ipv4(&[10, 0, 0, 1]), Some("10.0.0.1".to_string()));
        assert_eq!(format_ipv4(&[8, 8, 8, 8]), Some("8.8.8.8".to_string()));
    }

    #[test]
    fn test_format_ipv4_edge_cases() {
        assert_eq!(format_ipv4(&[0, 0, 0, 0]), Some("0.0.0.0".to_string()));
        assert_eq!(
            format_ipv4(&[255, 255, 255, 255]),
            Some("255.255.255.255".to_string())
        );
    }

    #[test]
    fn test_format_ipv6_compression() {
        let loopback = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(format_ipv6(&loopback), Some("::1".to_string()));

        let doc = [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(format_ipv6(&doc), Some("2001:db8::1".to_string()));
    }

    #[test]
    fn test_format_ipv6_invalid_length() {
        assert_eq!(format_ipv6(&[0; 15]), None);
        assert_eq!(format_ipv6(&[0; 17]), None);
    }

    #[test]
    fn test_format_address_dispatch() {
        assert_eq!(
            format_address(&[0x00, 0x11, 0x22, 0x33, 0x44, 0xff]),
            "00:11:22:33:44:FF"
        );
        assert_eq!(format_address(&[192, 168, 1, 1]), "192.168.1.1");

        let v6 = [0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(format_address(&v6), "fe80::1");
    }

    #[test]
    fn test_format_address_fallback() {
        // Unrecognized lengths render generically, never error
        assert_eq!(format_address(&[1, 2, 3]), "[1, 2, 3]");
        assert_eq!(format_address(&[]), "[]");
        assert_eq!(format_address(&[200]), "[200]");
    }

    #[test]
    fn test_format_byte_dump() {
        assert_eq!(format_byte_dump(&[69, 0, 0, 255]), "[69, 0, 0, 255]");
        assert_eq!(format_byte_dump(&[]), "[]");
    }
}
