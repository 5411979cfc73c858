//! RFC1918 subnet guessing.
//!
//! A deliberately naive best-effort heuristic over the textual form of an
//! IPv4 address: the string prefix alone decides the private class, and the
//! guessed network/mask follow from a fixed per-class table. There is no
//! CIDR parsing and no validation beyond prefix matching; public or
//! malformed addresses classify as [`SubnetClass::Unknown`] and yield no
//! derived fields.

/// Private address class guessed from an address string prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubnetClass {
    /// 10.0.0.0/8
    A,
    /// 172.16.0.0/12 (matched as the coarser `172.` prefix)
    B,
    /// 192.168.0.0/16
    C,
    /// Not a recognized private prefix.
    Unknown,
}

impl SubnetClass {
    /// Fixed dotted-decimal netmask for the class.
    pub fn mask(&self) -> Option<&'static str> {
        match self {
            SubnetClass::A => Some("255.0.0.0"),
            SubnetClass::B => Some("255.255.0.0"),
            SubnetClass::C => Some("255.255.255.0"),
            SubnetClass::Unknown => None,
        }
    }

    /// Fixed prefix length for the class.
    pub fn mask_bits(&self) -> Option<u8> {
        match self {
            SubnetClass::A => Some(8),
            SubnetClass::B => Some(16),
            SubnetClass::C => Some(24),
            SubnetClass::Unknown => None,
        }
    }
}

/// Classify an IPv4 address string by prefix.
///
/// Prefixes are tested in order: `192.168.` first, then `10.`, then `172.`.
pub fn classify(address: &str) -> SubnetClass {
    if address.starts_with("192.168.") {
        SubnetClass::C
    } else if address.starts_with("10.") {
        SubnetClass::A
    } else if address.starts_with("172.") {
        SubnetClass::B
    } else {
        SubnetClass::Unknown
    }
}

/// Derive the guessed network address for a classified address string.
///
/// Class C keeps the first three octets, class B two, class A one; the
/// remaining octets become zero. Unknown addresses yield `None`.
pub fn guess_network(address: &str) -> Option<String> {
    let keep = match classify(address) {
        SubnetClass::A => 1,
        SubnetClass::B => 2,
        SubnetClass::C => 3,
        SubnetClass::Unknown => return None,
    };

    let mut octets = address.split('.');
    let mut network = String::with_capacity(address.len());
    for i in 0..4 {
        if i > 0 {
            network.push('.');
        }
        if i < keep {
            network.push_str(octets.next().unwrap_or("0"));
        } else {
            network.push('0');
        }
    }
    Some(network)
}

/// The full guess for one address: class, network, mask, and prefix length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetGuess {
    pub class: SubnetClass,
    pub network: Option<String>,
    pub mask: Option<&'static str>,
    pub mask_bits: Option<u8>,
}

impl SubnetGuess {
    /// Compute the guess for an IPv4 address string.
    pub fn of(address: &str) -> Self {
        let class = classify(address);
        Self {
            class,
            network: guess_network(address),
            mask: class.mask(),
            mask_bits: class.mask_bits(),
        }
    }
}
