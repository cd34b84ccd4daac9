//! CIDR block and FLSM result data models.

use super::ipv4::Cidr;
use crate::error::Result;
use serde::Serialize;
use std::net::Ipv4Addr;

/// Inclusive range of addresses.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    pub start: Ipv4Addr,
    pub end: Ipv4Addr,
}

impl std::fmt::Display for AddressRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Everything derived from one address/prefix pair.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CidrBlock {
    /// The address the block was computed from.
    pub address: Ipv4Addr,
    pub prefix: u8,
    pub mask: Ipv4Addr,
    pub wildcard: Ipv4Addr,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    /// None for /31 and /32.
    pub first_host: Option<Ipv4Addr>,
    /// None for /31 and /32.
    pub last_host: Option<Ipv4Addr>,
    /// `2^(32-prefix)`, so `/0` holds 4294967296.
    pub total_addresses: u64,
    pub usable_hosts: u64,
}

impl CidrBlock {
    /// The block as `network/prefix`.
    pub fn cidr(&self) -> Result<Cidr> {
        Cidr::new(self.network, self.prefix)
    }

    pub fn host_range(&self) -> Option<AddressRange> {
        match (self.first_host, self.last_host) {
            (Some(start), Some(end)) => Some(AddressRange { start, end }),
            _ => None,
        }
    }
}

/// Equal-size subnets carved out of a base block.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FlsmResult {
    pub subnets: Vec<CidrBlock>,
    pub new_prefix: u8,
    pub total_generated: usize,
    pub borrowed_bits: u8,
}

impl FlsmResult {
    /// Usable hosts per subnet, None when no subnets were generated.
    pub fn hosts_per_subnet(&self) -> Option<u64> {
        self.subnets.first().map(|s| s.usable_hosts)
    }
}
