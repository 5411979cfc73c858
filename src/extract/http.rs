//! HTTP extraction rule.
//!
//! Works over a fixed enumerated field list per message kind; fields the
//! message does not carry are omitted from the map entirely, never emitted
//! with a placeholder.

use crate::dissect::{Dissection, HeaderKind, HttpMessage};
use crate::record::{FieldMap, FieldValue};

use super::rule::ExtractRule;

/// HTTP extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct HttpRule;

impl ExtractRule for HttpRule {
    fn kind(&self) -> HeaderKind {
        HeaderKind::Http
    }

    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap) {
        let Some(http) = &dissection.http else {
            return;
        };

        match http.message {
            HttpMessage::Request => {
                if let Some(method) = http.method {
                    fields.insert("requestMethod", FieldValue::text(method));
                }
                if let Some(url) = http.url {
                    fields.insert("requestUrl", FieldValue::text(url));
                }
                if let Some(version) = http.version {
                    fields.insert("requestVersion", FieldValue::text(version));
                }
                if let Some(authorization) = http.authorization {
                    fields.insert("authorization", FieldValue::text(authorization));
                }
                if let Some(referer) = http.referer {
                    fields.insert("referer", FieldValue::text(referer));
                }
            }
            HttpMessage::Response => {
                if let Some(code) = http.code {
                    fields.insert("responseCode", FieldValue::Num(code as u64));
                }
            }
        }

        // Entity headers are common to both message kinds
        if let Some(length) = http.content_length {
            fields.insert("contentLength", FieldValue::Num(length));
        }
        if let Some(content_type) = http.content_type {
            fields.insert("contentType", FieldValue::text(content_type));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_frame(payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
            0x08, 0x00, // ethertype: IPv4
            0x45, 0x00, 0x00, 0x28, 0x00, 0x00, 0x00, 0x00, 0x40,
            0x06, 0x00, 0x00, // protocol: TCP
            0xc0, 0xa8, 0x01, 0x01, 0xc0, 0xa8, 0x01, 0x02,
            0xd4, 0x31, 0x00, 0x50, // ports
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // seq, ack
            0x50, 0x18, // offset 5, PSH + ACK
            0x72, 0x10, 0x00, 0x00, 0x00, 0x00,
        ];
        frame.extend_from_slice(payload);
        frame
    }

    #[test]
    fn test_extract_request_fields() {
        let frame = http_frame(
            b"POST /api/v1/items HTTP/1.1\r\n\
              Host: example.com\r\n\
              Authorization: Basic dXNlcjpwYXNz\r\n\
              Content-Type: application/json\r\n\
              Content-Length: 2\r\n\r\n{}",
        );
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        HttpRule.extract(&dissection, &mut fields);

        assert_eq!(
            fields.get("requestMethod").and_then(|v| v.as_text()),
            Some("POST")
        );
        assert_eq!(
            fields.get("requestUrl").and_then(|v| v.as_text()),
            Some("/api/v1/items")
        );
        assert_eq!(
            fields.get("requestVersion").and_then(|v| v.as_text()),
            Some("HTTP/1.1")
        );
        assert_eq!(
            fields.get("authorization").and_then(|v| v.as_text()),
            Some("Basic dXNlcjpwYXNz")
        );
        assert_eq!(
            fields.get("contentType").and_then(|v| v.as_text()),
            Some("application/json")
        );
        assert_eq!(
            fields.get("contentLength").and_then(|v| v.as_num()),
            Some(2)
        );
        // Response-only fields never appear on a request
        assert!(!fields.contains("responseCode"));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let frame = http_frame(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        HttpRule.extract(&dissection, &mut fields);

        assert_eq!(
            fields.get("requestMethod").and_then(|v| v.as_text()),
            Some("GET")
        );
        assert!(!fields.contains("authorization"));
        assert!(!fields.contains("referer"));
        assert!(!fields.contains("contentLength"));
        assert!(!fields.contains("contentType"));
    }

    #[test]
    fn test_extract_response_fields() {
        let frame = http_frame(
            b"HTTP/1.0 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 9\r\n\r\nnot found",
        );
        let dissection = Dissection::of(&frame).unwrap();

        let mut fields = FieldMap::new();
        HttpRule.extract(&dissection, &mut fields);

        assert_eq!(
            fields.get("responseCode").and_then(|v| v.as_num()),
            Some(404)
        );
        assert_eq!(
            fields.get("contentType").and_then(|v| v.as_text()),
            Some("text/plain")
        );
        assert_eq!(
            fields.get("contentLength").and_then(|v| v.as_num()),
            Some(9)
        );
        assert!(!fields.contains("requestMethod"));
        assert!(!fields.contains("requestUrl"));
    }
}
