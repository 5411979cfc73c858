//! One decode pass per packet into typed per-layer views.
//!
//! Decoding of raw bytes into typed headers is delegated to the decode
//! collaborators (`etherparse` header slices, `httparse` for HTTP); this
//! module only walks the layer chain they expose and records which headers
//! are present, at which layer index, and which decoded layer follows each.
//! The views borrow the packet bytes and never outlive them.

use httparse::{Request, Response, Status, EMPTY_HEADER};
use smallvec::SmallVec;

use etherparse::{
    Ethernet2HeaderSlice, Ipv4HeaderSlice, Ipv6HeaderSlice, TcpHeaderSlice, TcpOptionElement,
    UdpHeaderSlice,
};

use crate::error::DissectError;

/// Well-known EtherType values.
pub mod ethertype {
    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const IPV6: u16 = 0x86DD;
}

/// IP protocol numbers.
pub mod ip_proto {
    pub const ICMP: u8 = 1;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
}

/// ARP wire size for Ethernet/IPv4 (the only flavor decoded).
const ARP_WIRE_LEN: usize = 28;

/// Minimum ICMP header size.
const ICMP_HEADER_LEN: usize = 8;

/// Maximum number of HTTP headers decoded per message.
const MAX_HTTP_HEADERS: usize = 32;

/// The known protocol header kinds.
///
/// `TcpTimestamp` is a conditional sub-header of TCP: it has no layer index
/// or category of its own and surfaces nested under the TCP entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    Ethernet,
    Arp,
    Ip4,
    Ip6,
    Icmp,
    Tcp,
    TcpTimestamp,
    Udp,
    Http,
}

impl HeaderKind {
    /// Stable numeric id, used as the `next` field value in records.
    pub fn id(&self) -> u8 {
        match self {
            HeaderKind::Ethernet => 1,
            HeaderKind::Arp => 2,
            HeaderKind::Ip4 => 3,
            HeaderKind::Ip6 => 4,
            HeaderKind::Icmp => 5,
            HeaderKind::Tcp => 6,
            HeaderKind::TcpTimestamp => 7,
            HeaderKind::Udp => 8,
            HeaderKind::Http => 9,
        }
    }

    /// Protocol name, used for category keys and `ProtocolType` values.
    pub fn name(&self) -> &'static str {
        match self {
            HeaderKind::Ethernet => "Ethernet",
            HeaderKind::Arp => "Arp",
            HeaderKind::Ip4 => "Ip4",
            HeaderKind::Ip6 => "Ip6",
            HeaderKind::Icmp => "Icmp",
            HeaderKind::Tcp => "Tcp",
            HeaderKind::TcpTimestamp => "TcpTimestamp",
            HeaderKind::Udp => "Udp",
            HeaderKind::Http => "Http",
        }
    }
}

/// Position of a decoded header within its packet's layer chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerInfo {
    /// Zero-based layer index.
    pub index: u8,
    /// Kind of the following decoded layer, if any.
    pub next: Option<HeaderKind>,
}

impl LayerInfo {
    fn at(index: u8) -> Self {
        Self { index, next: None }
    }
}

/// Ethernet II header view.
#[derive(Debug, Clone)]
pub struct EthernetView<'a> {
    pub layer: LayerInfo,
    slice: Ethernet2HeaderSlice<'a>,
}

impl<'a> EthernetView<'a> {
    pub fn source(&self) -> [u8; 6] {
        self.slice.source()
    }

    pub fn destination(&self) -> [u8; 6] {
        self.slice.destination()
    }

    pub fn ether_type(&self) -> u16 {
        self.slice.ether_type().0
    }
}

/// ARP header view (Ethernet/IPv4 flavor).
#[derive(Debug, Clone)]
pub struct ArpView<'a> {
    pub layer: LayerInfo,
    data: &'a [u8],
}

impl<'a> ArpView<'a> {
    pub fn operation(&self) -> u16 {
        u16::from_be_bytes([self.data[6], self.data[7]])
    }

    pub fn operation_description(&self) -> &'static str {
        match self.operation() {
            1 => "Request",
            2 => "Reply",
            3 => "Reverse Request",
            4 => "Reverse Reply",
            _ => "Unknown",
        }
    }

    // Address accessors apply to the Ethernet/IPv4 flavor only.
    fn is_ethernet_ipv4(&self) -> bool {
        u16::from_be_bytes([self.data[0], self.data[1]]) == 1
            && u16::from_be_bytes([self.data[2], self.data[3]]) == ethertype::IPV4
            && self.data[4] == 6
            && self.data[5] == 4
    }

    pub fn sender_mac(&self) -> Option<&'a [u8]> {
        self.is_ethernet_ipv4().then(|| &self.data[8..14])
    }

    pub fn sender_ip(&self) -> Option<&'a [u8]> {
        self.is_ethernet_ipv4().then(|| &self.data[14..18])
    }

    pub fn target_mac(&self) -> Option<&'a [u8]> {
        self.is_ethernet_ipv4().then(|| &self.data[18..24])
    }

    pub fn target_ip(&self) -> Option<&'a [u8]> {
        self.is_ethernet_ipv4().then(|| &self.data[24..28])
    }
}

/// IPv4 header view.
#[derive(Debug, Clone)]
pub struct Ipv4View<'a> {
    pub layer: LayerInfo,
    slice: Ipv4HeaderSlice<'a>,
}

impl<'a> Ipv4View<'a> {
    pub fn source(&self) -> [u8; 4] {
        self.slice.source()
    }

    pub fn destination(&self) -> [u8; 4] {
        self.slice.destination()
    }

    pub fn identification(&self) -> u16 {
        self.slice.identification()
    }

    /// Legacy type-of-service octet (DSCP and ECN recombined).
    pub fn tos(&self) -> u8 {
        (self.slice.dcp().value() << 2) | self.slice.ecn().value()
    }

    pub fn protocol(&self) -> u8 {
        self.slice.protocol().0
    }

    pub fn ttl(&self) -> u8 {
        self.slice.ttl()
    }
}

/// IPv6 header view.
#[derive(Debug, Clone)]
pub struct Ipv6View<'a> {
    pub layer: LayerInfo,
    slice: Ipv6HeaderSlice<'a>,
}

impl<'a> Ipv6View<'a> {
    pub fn source(&self) -> [u8; 16] {
        self.slice.source()
    }

    pub fn destination(&self) -> [u8; 16] {
        self.slice.destination()
    }

    pub fn flow_label(&self) -> u32 {
        self.slice.flow_label().value()
    }

    pub fn hop_limit(&self) -> u8 {
        self.slice.hop_limit()
    }

    pub fn traffic_class(&self) -> u8 {
        self.slice.traffic_class()
    }

    pub fn next_header(&self) -> u8 {
        self.slice.next_header().0
    }
}

/// ICMP header view.
#[derive(Debug, Clone)]
pub struct IcmpView<'a> {
    pub layer: LayerInfo,
    data: &'a [u8],
}

impl<'a> IcmpView<'a> {
    pub fn type_value(&self) -> u8 {
        self.data[0]
    }

    pub fn code(&self) -> u8 {
        self.data[1]
    }

    pub fn type_description(&self) -> &'static str {
        match self.type_value() {
            0 => "Echo Reply",
            3 => "Destination Unreachable",
            4 => "Source Quench",
            5 => "Redirect",
            8 => "Echo Request",
            11 => "Time Exceeded",
            12 => "Parameter Problem",
            13 => "Timestamp Request",
            14 => "Timestamp Reply",
            _ => "Unknown",
        }
    }
}

/// TCP flags bit positions.
pub mod tcp_flags {
    pub const FIN: u16 = 0x001;
    pub const SYN: u16 = 0x002;
    pub const RST: u16 = 0x004;
    pub const PSH: u16 = 0x008;
    pub const ACK: u16 = 0x010;
    pub const URG: u16 = 0x020;
    pub const ECE: u16 = 0x040;
    pub const CWR: u16 = 0x080;
    pub const NS: u16 = 0x100;
}

/// TCP header view.
#[derive(Debug, Clone)]
pub struct TcpView<'a> {
    pub layer: LayerInfo,
    slice: TcpHeaderSlice<'a>,
}

impl<'a> TcpView<'a> {
    pub fn source_port(&self) -> u16 {
        self.slice.source_port()
    }

    pub fn destination_port(&self) -> u16 {
        self.slice.destination_port()
    }

    pub fn sequence_number(&self) -> u32 {
        self.slice.sequence_number()
    }

    pub fn acknowledgment_number(&self) -> u32 {
        self.slice.acknowledgment_number()
    }

    /// The flag bits combined into one mask (see [`tcp_flags`]).
    pub fn flags_mask(&self) -> u16 {
        let tcp = &self.slice;
        let mut mask: u16 = 0;
        if tcp.fin() {
            mask |= tcp_flags::FIN;
        }
        if tcp.syn() {
            mask |= tcp_flags::SYN;
        }
        if tcp.rst() {
            mask |= tcp_flags::RST;
        }
        if tcp.psh() {
            mask |= tcp_flags::PSH;
        }
        if tcp.ack() {
            mask |= tcp_flags::ACK;
        }
        if tcp.urg() {
            mask |= tcp_flags::URG;
        }
        if tcp.ece() {
            mask |= tcp_flags::ECE;
        }
        if tcp.cwr() {
            mask |= tcp_flags::CWR;
        }
        if tcp.ns() {
            mask |= tcp_flags::NS;
        }
        mask
    }

    pub fn ack_set(&self) -> bool {
        self.slice.ack()
    }
}

/// TCP timestamp option sub-header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpTimestampView {
    /// Sender's timestamp value (TSval).
    pub tsval: u32,
    /// Echoed timestamp from the peer (TSecr).
    pub tsecr: u32,
}

/// Whether an HTTP view describes a request or a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMessage {
    Request,
    Response,
}

/// HTTP start line and selected headers, decoded from a TCP payload.
///
/// Only fields the message actually carries are populated.
#[derive(Debug, Clone)]
pub struct HttpView<'a> {
    pub layer: LayerInfo,
    pub message: HttpMessage,
    pub method: Option<&'a str>,
    pub url: Option<&'a str>,
    pub version: Option<&'static str>,
    pub code: Option<u16>,
    pub content_length: Option<u64>,
    pub content_type: Option<&'a str>,
    pub authorization: Option<&'a str>,
    pub referer: Option<&'a str>,
}

/// UDP header view.
#[derive(Debug, Clone)]
pub struct UdpView<'a> {
    pub layer: LayerInfo,
    slice: UdpHeaderSlice<'a>,
}

impl<'a> UdpView<'a> {
    pub fn source_port(&self) -> u16 {
        self.slice.source_port()
    }

    pub fn destination_port(&self) -> u16 {
        self.slice.destination_port()
    }
}

/// All decoded views for one packet.
#[derive(Debug, Clone, Default)]
pub struct Dissection<'a> {
    pub ethernet: Option<EthernetView<'a>>,
    pub arp: Option<ArpView<'a>>,
    pub ipv4: Option<Ipv4View<'a>>,
    pub ipv6: Option<Ipv6View<'a>>,
    pub icmp: Option<IcmpView<'a>>,
    pub tcp: Option<TcpView<'a>>,
    pub tcp_timestamp: Option<TcpTimestampView>,
    pub udp: Option<UdpView<'a>>,
    pub http: Option<HttpView<'a>>,
}

impl<'a> Dissection<'a> {
    /// Decode the layer chain of one packet.
    ///
    /// Any decode-collaborator rejection surfaces as a [`DissectError`];
    /// the caller turns it into a packet-scoped failure. An ethertype or IP
    /// protocol outside the known kinds simply ends the chain.
    pub fn of(data: &'a [u8]) -> Result<Self, DissectError> {
        let mut d = Self::default();
        let mut chain: SmallVec<[HeaderKind; 6]> = SmallVec::new();

        let eth = Ethernet2HeaderSlice::from_slice(data).map_err(|e| {
            DissectError::Malformed {
                protocol: "ethernet",
                reason: e.to_string(),
            }
        })?;
        let ether_type = eth.ether_type().0;
        let mut payload = &data[eth.slice().len()..];
        d.ethernet = Some(EthernetView {
            layer: LayerInfo::at(0),
            slice: eth,
        });
        chain.push(HeaderKind::Ethernet);

        let transport_proto = match ether_type {
            ethertype::ARP => {
                if payload.len() < ARP_WIRE_LEN {
                    return Err(DissectError::Truncated {
                        protocol: "arp",
                        needed: ARP_WIRE_LEN,
                        have: payload.len(),
                    });
                }
                d.arp = Some(ArpView {
                    layer: LayerInfo::at(1),
                    data: payload,
                });
                chain.push(HeaderKind::Arp);
                None
            }
            ethertype::IPV4 => {
                let ip = Ipv4HeaderSlice::from_slice(payload).map_err(|e| {
                    DissectError::Malformed {
                        protocol: "ipv4",
                        reason: e.to_string(),
                    }
                })?;
                let proto = ip.protocol().0;
                payload = &payload[ip.slice().len()..];
                d.ipv4 = Some(Ipv4View {
                    layer: LayerInfo::at(1),
                    slice: ip,
                });
                chain.push(HeaderKind::Ip4);
                Some(proto)
            }
            ethertype::IPV6 => {
                let ip = Ipv6HeaderSlice::from_slice(payload).map_err(|e| {
                    DissectError::Malformed {
                        protocol: "ipv6",
                        reason: e.to_string(),
                    }
                })?;
                let proto = ip.next_header().0;
                payload = &payload[ip.slice().len()..];
                d.ipv6 = Some(Ipv6View {
                    layer: LayerInfo::at(1),
                    slice: ip,
                });
                chain.push(HeaderKind::Ip6);
                Some(proto)
            }
            _ => None,
        };

        match transport_proto {
            Some(ip_proto::ICMP) => {
                if payload.len() < ICMP_HEADER_LEN {
                    return Err(DissectError::Truncated {
                        protocol: "icmp",
                        needed: ICMP_HEADER_LEN,
                        have: payload.len(),
                    });
                }
                d.icmp = Some(IcmpView {
                    layer: LayerInfo::at(2),
                    data: payload,
                });
                chain.push(HeaderKind::Icmp);
            }
            Some(ip_proto::TCP) => {
                let tcp = TcpHeaderSlice::from_slice(payload).map_err(|e| {
                    DissectError::Malformed {
                        protocol: "tcp",
                        reason: e.to_string(),
                    }
                })?;
                let tcp_payload = &payload[tcp.slice().len()..];

                for opt in tcp.options_iterator() {
                    // Malformed options are skipped, not fatal
                    if let Ok(TcpOptionElement::Timestamp(tsval, tsecr)) = opt {
                        d.tcp_timestamp = Some(TcpTimestampView { tsval, tsecr });
                    }
                }

                d.tcp = Some(TcpView {
                    layer: LayerInfo::at(2),
                    slice: tcp,
                });
                chain.push(HeaderKind::Tcp);

                if !tcp_payload.is_empty() {
                    if let Some(http) = parse_http(tcp_payload, 3) {
                        d.http = Some(http);
                        chain.push(HeaderKind::Http);
                    }
                }
            }
            Some(ip_proto::UDP) => {
                let udp = UdpHeaderSlice::from_slice(payload).map_err(|e| {
                    DissectError::Malformed {
                        protocol: "udp",
                        reason: e.to_string(),
                    }
                })?;
                d.udp = Some(UdpView {
                    layer: LayerInfo::at(2),
                    slice: udp,
                });
                chain.push(HeaderKind::Udp);
            }
            _ => {}
        }

        for pair in chain.windows(2) {
            d.set_next(pair[0], pair[1]);
        }

        Ok(d)
    }

    /// Check whether a header of the given kind is present.
    pub fn has(&self, kind: HeaderKind) -> bool {
        match kind {
            HeaderKind::Ethernet => self.ethernet.is_some(),
            HeaderKind::Arp => self.arp.is_some(),
            HeaderKind::Ip4 => self.ipv4.is_some(),
            HeaderKind::Ip6 => self.ipv6.is_some(),
            HeaderKind::Icmp => self.icmp.is_some(),
            HeaderKind::Tcp => self.tcp.is_some(),
            HeaderKind::TcpTimestamp => self.tcp_timestamp.is_some(),
            HeaderKind::Udp => self.udp.is_some(),
            HeaderKind::Http => self.http.is_some(),
        }
    }

    /// Chain position of a header kind, if that layer is present.
    ///
    /// The TCP timestamp sub-header has no position of its own.
    pub fn layer(&self, kind: HeaderKind) -> Option<LayerInfo> {
        match kind {
            HeaderKind::Ethernet => self.ethernet.as_ref().map(|v| v.layer),
            HeaderKind::Arp => self.arp.as_ref().map(|v| v.layer),
            HeaderKind::Ip4 => self.ipv4.as_ref().map(|v| v.layer),
            HeaderKind::Ip6 => self.ipv6.as_ref().map(|v| v.layer),
            HeaderKind::Icmp => self.icmp.as_ref().map(|v| v.layer),
            HeaderKind::Tcp => self.tcp.as_ref().map(|v| v.layer),
            HeaderKind::TcpTimestamp => None,
            HeaderKind::Udp => self.udp.as_ref().map(|v| v.layer),
            HeaderKind::Http => self.http.as_ref().map(|v| v.layer),
        }
    }

    fn set_next(&mut self, kind: HeaderKind, next: HeaderKind) {
        let layer = match kind {
            HeaderKind::Ethernet => self.ethernet.as_mut().map(|v| &mut v.layer),
            HeaderKind::Arp => self.arp.as_mut().map(|v| &mut v.layer),
            HeaderKind::Ip4 => self.ipv4.as_mut().map(|v| &mut v.layer),
            HeaderKind::Ip6 => self.ipv6.as_mut().map(|v| &mut v.layer),
            HeaderKind::Icmp => self.icmp.as_mut().map(|v| &mut v.layer),
            HeaderKind::Tcp => self.tcp.as_mut().map(|v| &mut v.layer),
            HeaderKind::TcpTimestamp => None,
            HeaderKind::Udp => self.udp.as_mut().map(|v| &mut v.layer),
            HeaderKind::Http => self.http.as_mut().map(|v| &mut v.layer),
        };
        if let Some(layer) = layer {
            layer.next = Some(next);
        }
    }
}

fn version_label(version: Option<u8>) -> Option<&'static str> {
    match version {
        Some(0) => Some("HTTP/1.0"),
        Some(1) => Some("HTTP/1.1"),
        _ => None,
    }
}

fn header_str<'b>(headers: &[httparse::Header<'b>], name: &str) -> Option<&'b str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .and_then(|h| std::str::from_utf8(h.value).ok())
}

fn header_num(headers: &[httparse::Header<'_>], name: &str) -> Option<u64> {
    header_str(headers, name).and_then(|s| s.trim().parse().ok())
}

/// Try to decode a TCP payload as an HTTP message.
///
/// Accepted only when httparse reports complete request or response headers;
/// anything else means no HTTP layer for this packet.
fn parse_http(payload: &'_ [u8], index: u8) -> Option<HttpView<'_>> {
    let mut headers = [EMPTY_HEADER; MAX_HTTP_HEADERS];
    let mut request = Request::new(&mut headers);
    if let Ok(Status::Complete(_)) = request.parse(payload) {
        return Some(HttpView {
            layer: LayerInfo::at(index),
            message: HttpMessage::Request,
            method: request.method,
            url: request.path,
            version: version_label(request.version),
            code: None,
            content_length: header_num(request.headers, "Content-Length"),
            content_type: header_str(request.headers, "Content-Type"),
            authorization: header_str(request.headers, "Authorization"),
            referer: header_str(request.headers, "Referer"),
        });
    }

    let mut headers = [EMPTY_HEADER; MAX_HTTP_HEADERS];
    let mut response = Response::new(&mut headers);
    if let Ok(Status::Complete(_)) = response.parse(payload) {
        return Some(HttpView {
            layer: LayerInfo::at(index),
            message: HttpMessage::Response,
            method: None,
            url: None,
            version: version_label(response.version),
            code: response.code,
            content_length: header_num(response.headers, "Content-Length"),
            content_type: header_str(response.headers, "Content-Type"),
            authorization: None,
            referer: None,
        });
    }

    None
}
