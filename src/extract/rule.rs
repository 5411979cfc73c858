//! Extraction rule trait and static dispatch over the built-in rules.

use crate::dissect::{Dissection, HeaderKind};
use crate::record::FieldMap;

use super::{
    ArpRule, EthernetRule, HttpRule, IcmpRule, Ip4Rule, Ip6Rule, TcpRule, UdpRule,
};

/// One entry of the extraction table: which header kind it reads, which
/// record category it writes, and the protocol-specific fields it emits.
///
/// Rules take `&mut self` so an extractor's rule instances follow a
/// single-writer discipline; the uniform fields (`index`, `ProtocolType`,
/// `next`) are emitted by the traversal, not by rules.
pub trait ExtractRule {
    /// The header kind this rule extracts.
    fn kind(&self) -> HeaderKind;

    /// Record category key this rule's fields land under.
    ///
    /// Defaults to the protocol's own name; merged categories
    /// (DataLinkLayer, NetworkLayer) override this.
    fn category(&self) -> &'static str {
        self.kind().name()
    }

    /// `ProtocolType` value, present only for merged categories.
    fn protocol_type(&self) -> Option<&'static str> {
        None
    }

    /// Emit the protocol-specific fields for a packet whose dissection
    /// contains this rule's header kind.
    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap);
}

/// Enum of all built-in extraction rules.
///
/// This enables static dispatch (no vtable overhead) over the fixed rule
/// table.
#[derive(Debug, Clone, Copy)]
pub enum HeaderRule {
    Ethernet(EthernetRule),
    Arp(ArpRule),
    Icmp(IcmpRule),
    Ip4(Ip4Rule),
    Ip6(Ip6Rule),
    Tcp(TcpRule),
    Udp(UdpRule),
    Http(HttpRule),
}

/// Macro to delegate ExtractRule trait methods to inner types.
macro_rules! delegate_rule {
    ($self:expr, $method:ident $(, $arg:expr)*) => {
        match $self {
            HeaderRule::Ethernet(r) => r.$method($($arg),*),
            HeaderRule::Arp(r) => r.$method($($arg),*),
            HeaderRule::Icmp(r) => r.$method($($arg),*),
            HeaderRule::Ip4(r) => r.$method($($arg),*),
            HeaderRule::Ip6(r) => r.$method($($arg),*),
            HeaderRule::Tcp(r) => r.$method($($arg),*),
            HeaderRule::Udp(r) => r.$method($($arg),*),
            HeaderRule::Http(r) => r.$method($($arg),*),
        }
    };
}

impl ExtractRule for HeaderRule {
    #[inline]
    fn kind(&self) -> HeaderKind {
        delegate_rule!(self, kind)
    }

    #[inline]
    fn category(&self) -> &'static str {
        delegate_rule!(self, category)
    }

    #[inline]
    fn protocol_type(&self) -> Option<&'static str> {
        delegate_rule!(self, protocol_type)
    }

    #[inline]
    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap) {
        delegate_rule!(self, extract, dissection, fields)
    }
}

impl From<EthernetRule> for HeaderRule {
    fn from(r: EthernetRule) -> Self {
        HeaderRule::Ethernet(r)
    }
}

impl From<ArpRule> for HeaderRule {
    fn from(r: ArpRule) -> Self {
        HeaderRule::Arp(r)
    }
}

impl From<IcmpRule> for HeaderRule {
    fn from(r: IcmpRule) -> Self {
        HeaderRule::Icmp(r)
    }
}

impl From<Ip4Rule> for HeaderRule {
    fn from(r: Ip4Rule) -> Self {
        HeaderRule::Ip4(r)
    }
}

impl From<Ip6Rule> for HeaderRule {
    fn from(r: Ip6Rule) -> Self {
        HeaderRule::Ip6(r)
    }
}

impl From<TcpRule> for HeaderRule {
    fn from(r: TcpRule) -> Self {
        HeaderRule::Tcp(r)
    }
}

impl From<UdpRule> for HeaderRule {
    fn from(r: UdpRule) -> Self {
        HeaderRule::Udp(r)
    }
}

impl From<HttpRule> for HeaderRule {
    fn from(r: HttpRule) -> Self {
        HeaderRule::Http(r)
    }
}
