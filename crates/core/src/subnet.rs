//! IPv4 subnet calculations over CIDR notation.
//!
//! All arithmetic is done on `u32` addresses; host counts are `u64` so a /0
//! block (2^32 addresses) is representable.

use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum number of child subnets enumerated by [`split`].
pub const MAX_SPLIT_RESULTS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubnetError {
    #[error("Invalid CIDR notation `{0}` (expected a.b.c.d/prefix)")]
    InvalidFormat(String),

    #[error("Octet {position} is {value}, must be between 0 and 255")]
    OctetOutOfRange { position: usize, value: u32 },

    #[error("Prefix length {0} is out of range (valid: 0-32)")]
    PrefixOutOfRange(u32),

    #[error("Split prefix /{split} must be longer than /{parent} and at most /32")]
    InvalidSplit { parent: u8, split: u8 },
}

/// An IPv4 address together with a prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    pub address: Ipv4Addr,
    pub prefix: u8,
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

impl FromStr for Cidr {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BinaryForm {
    pub address: String,
    pub mask: String,
}

/// Everything derived from a single CIDR block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubnetInfo {
    pub address: Ipv4Addr,
    pub prefix: u8,
    pub network_address: Ipv4Addr,
    pub broadcast_address: Ipv4Addr,
    pub first_host: Ipv4Addr,
    pub last_host: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    pub wildcard_mask: Ipv4Addr,
    pub total_hosts: u64,
    pub usable_hosts: u64,
    pub ip_class: &'static str,
    pub binary: BinaryForm,
}

/// One child block produced by [`split`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChildSubnet {
    pub network: String,
    pub broadcast: Ipv4Addr,
    pub first_host: Ipv4Addr,
    pub last_host: Ipv4Addr,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubnetSplit {
    pub parent: String,
    pub prefix: u8,
    pub total_subnets: u64,
    pub hosts_per_subnet: u64,
    pub truncated: bool,
    pub subnets: Vec<ChildSubnet>,
}

fn parse_component(text: &str, max_digits: usize, input: &str) -> Result<u32, SubnetError> {
    if text.is_empty() || text.len() > max_digits || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SubnetError::InvalidFormat(input.to_string()));
    }
    text.parse()
        .map_err(|_| SubnetError::InvalidFormat(input.to_string()))
}

/// Parse `a.b.c.d/prefix`.
pub fn parse_cidr(input: &str) -> Result<Cidr, SubnetError> {
    let trimmed = input.trim();
    let (address, prefix) = trimmed
        .split_once('/')
        .ok_or_else(|| SubnetError::InvalidFormat(trimmed.to_string()))?;

    let parts: Vec<&str> = address.split('.').collect();
    if parts.len() != 4 {
        return Err(SubnetError::InvalidFormat(trimmed.to_string()));
    }

    let mut octets = [0u8; 4];
    for (position, part) in parts.iter().enumerate() {
        let value = parse_component(part, 3, trimmed)?;
        octets[position] = u8::try_from(value).map_err(|_| SubnetError::OctetOutOfRange {
            position: position + 1,
            value,
        })?;
    }

    let prefix = parse_component(prefix, 2, trimmed)?;
    if prefix > 32 {
        return Err(SubnetError::PrefixOutOfRange(prefix));
    }

    Ok(Cidr {
        address: Ipv4Addr::from(octets),
        prefix: prefix as u8,
    })
}

/// Netmask for a prefix length, e.g. 24 -> 255.255.255.0.
pub fn mask_for_prefix(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p if p >= 32 => u32::MAX,
        p => u32::MAX << (32 - u32::from(p)),
    }
}

/// Classful network label based on the first octet.
pub fn ip_class(address: Ipv4Addr) -> &'static str {
    match address.octets()[0] {
        0..=127 => "A",
        128..=191 => "B",
        192..=223 => "C",
        224..=239 => "D (Multicast)",
        _ => "E (Reserved)",
    }
}

/// Dotted binary form, e.g. `11000000.10101000.00000001.00000000`.
pub fn to_binary(address: Ipv4Addr) -> String {
    address
        .octets()
        .iter()
        .map(|o| format!("{o:08b}"))
        .collect::<Vec<_>>()
        .join(".")
}

/// First and last assignable address; /31 and /32 reserve nothing.
fn host_range(network: u32, broadcast: u32, prefix: u8) -> (u32, u32) {
    if prefix < 31 {
        (network + 1, broadcast - 1)
    } else {
        (network, broadcast)
    }
}

fn usable_count(total: u64, prefix: u8) -> u64 {
    if prefix < 31 {
        total.saturating_sub(2)
    } else {
        total
    }
}

pub fn calculate(cidr: Cidr) -> SubnetInfo {
    let address = u32::from(cidr.address);
    let mask = mask_for_prefix(cidr.prefix);
    let wildcard = !mask;
    let network = address & mask;
    let broadcast = network | wildcard;
    let (first, last) = host_range(network, broadcast, cidr.prefix);
    let total_hosts = 1u64 << (32 - u32::from(cidr.prefix));

    SubnetInfo {
        address: cidr.address,
        prefix: cidr.prefix,
        network_address: Ipv4Addr::from(network),
        broadcast_address: Ipv4Addr::from(broadcast),
        first_host: Ipv4Addr::from(first),
        last_host: Ipv4Addr::from(last),
        subnet_mask: Ipv4Addr::from(mask),
        wildcard_mask: Ipv4Addr::from(wildcard),
        total_hosts,
        usable_hosts: usable_count(total_hosts, cidr.prefix),
        ip_class: ip_class(cidr.address),
        binary: BinaryForm {
            address: to_binary(cidr.address),
            mask: to_binary(Ipv4Addr::from(mask)),
        },
    }
}

/// Parse then calculate.
pub fn calculate_str(input: &str) -> Result<SubnetInfo, SubnetError> {
    parse_cidr(input).map(calculate)
}

/// Subdivide a block into equal children of a longer prefix.
///
/// At most [`MAX_SPLIT_RESULTS`] children are listed; `total_subnets` always
/// carries the full count.
pub fn split(info: &SubnetInfo, new_prefix: u8) -> Result<SubnetSplit, SubnetError> {
    if new_prefix <= info.prefix || new_prefix > 32 {
        return Err(SubnetError::InvalidSplit {
            parent: info.prefix,
            split: new_prefix,
        });
    }

    let network = u64::from(u32::from(info.network_address));
    let total_subnets = 1u64 << (new_prefix - info.prefix);
    let size = 1u64 << (32 - u32::from(new_prefix));
    let listed = total_subnets.min(MAX_SPLIT_RESULTS as u64);

    let subnets = (0..listed)
        .map(|i| {
            // The parent block is aligned, so these never exceed u32::MAX.
            let child_network = (network + i * size) as u32;
            let child_broadcast = (network + i * size + size - 1) as u32;
            let (first, last) = host_range(child_network, child_broadcast, new_prefix);
            ChildSubnet {
                network: format!("{}/{}", Ipv4Addr::from(child_network), new_prefix),
                broadcast: Ipv4Addr::from(child_broadcast),
                first_host: Ipv4Addr::from(first),
                last_host: Ipv4Addr::from(last),
            }
        })
        .collect();

    Ok(SubnetSplit {
        parent: format!("{}/{}", info.network_address, info.prefix),
        prefix: new_prefix,
        total_subnets,
        hosts_per_subnet: usable_count(size, new_prefix),
        truncated: total_subnets > listed,
        subnets,
    })
}
