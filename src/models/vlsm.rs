//! VLSM request and allocation data models.

use super::block::{AddressRange, CidrBlock};
use crate::error::{Result, SubnetError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

lazy_static! {
    // NAME:HOSTS, NAME=HOSTS or just HOSTS
    static ref DEMAND_RE: Regex =
        Regex::new(r"^(?:(.*?)\s*[:=]\s*)?([0-9]+)$").expect("Invalid Regex?");
}

/// A named host-count demand.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetRequest {
    /// Label for the subnet. Blank names get a positional default.
    #[serde(default)]
    pub name: String,
    pub required_hosts: u64,
}

impl SubnetRequest {
    pub fn new(name: &str, required_hosts: u64) -> SubnetRequest {
        SubnetRequest {
            name: name.to_string(),
            required_hosts,
        }
    }
}

impl FromStr for SubnetRequest {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<SubnetRequest> {
        let trimmed = s.trim();
        let caps = DEMAND_RE
            .captures(trimmed)
            .ok_or_else(|| SubnetError::InvalidDemand(s.to_string()))?;
        let name = caps.get(1).map_or("", |m| m.as_str().trim());
        let required_hosts = caps[2]
            .parse()
            .map_err(|_| SubnetError::InvalidDemand(s.to_string()))?;
        Ok(SubnetRequest::new(name, required_hosts))
    }
}

/// One placed block of a VLSM run.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub name: String,
    pub required_hosts: u64,
    /// Required hosts plus network and broadcast.
    pub needed_hosts: u64,
    pub block_size: u64,
    /// Usable hosts left over inside the block.
    pub wasted: u64,
    #[serde(flatten)]
    pub block: CidrBlock,
}

/// Summary of the block VLSM allocates from.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BaseSummary {
    pub network: Ipv4Addr,
    pub prefix: u8,
    pub mask: Ipv4Addr,
    pub total_addresses: u64,
    pub usable_hosts: u64,
}

/// Unallocated tail of the base block.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Remaining {
    pub addresses: u64,
    pub hosts: u64,
    pub range: Option<AddressRange>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VlsmResult {
    pub base: BaseSummary,
    /// Largest demand first.
    pub allocations: Vec<Allocation>,
    pub used_addresses: u64,
    pub remaining: Remaining,
}

impl VlsmResult {
    /// Sum of the hosts asked for across all demands.
    pub fn requested_hosts(&self) -> u64 {
        self.allocations.iter().map(|a| a.required_hosts).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        assert_eq!(
            "LAN:100".parse::<SubnetRequest>().unwrap(),
            SubnetRequest::new("LAN", 100)
        );
        assert_eq!(
            " Sales floor = 25 ".parse::<SubnetRequest>().unwrap(),
            SubnetRequest::new("Sales floor", 25)
        );
        assert_eq!(
            "10".parse::<SubnetRequest>().unwrap(),
            SubnetRequest::new("", 10)
        );
        assert_eq!(
            ":10".parse::<SubnetRequest>().unwrap(),
            SubnetRequest::new("", 10)
        );
    }

    #[test]
    fn test_parse_request_invalid() {
        for bad in ["", "LAN", "LAN:", "LAN:-5", "LAN:1.5", "LAN:99999999999999999999999"] {
            assert!(
                matches!(
                    bad.parse::<SubnetRequest>(),
                    Err(SubnetError::InvalidDemand(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_request_deserialize_default_name() {
        let req: SubnetRequest = serde_json::from_str(r#"{"required_hosts": 12}"#).unwrap();
        assert_eq!(req, SubnetRequest::new("", 12));
    }
}
