//! Error types for subnet calculations.

use std::net::Ipv4Addr;
use thiserror::Error;

/// Validation and capacity failures raised by the codec and the engines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetError {
    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("Invalid prefix: {0}")]
    InvalidPrefix(String),

    #[error("Invalid subnet mask: {0}")]
    InvalidMask(String),

    #[error("Invalid subnet count: {0}")]
    InvalidDemandCount(String),

    #[error("Invalid subnet demand: {0}, expected NAME:HOSTS")]
    InvalidDemand(String),

    #[error("Invalid host count in subnet {index}")]
    InvalidHostCount { index: usize },

    #[error("Host count in subnet {index} exceeds the maximum allowed ({max})")]
    HostCountTooLarge { index: usize, max: u64 },

    #[error("Cannot borrow {borrowed} bits from /{prefix}: prefix would exceed /32")]
    PrefixOverflow { prefix: u8, borrowed: u8 },

    #[error("Base network lacks space for {name}")]
    CapacityExceeded { name: String },

    #[error("Too many subnets requested: {requested} (maximum {max})")]
    TooManyResults { requested: u64, max: u64 },

    #[error("{address} is not a network address for /{prefix}, use {network}/{prefix}")]
    NotNetworkAddress {
        address: Ipv4Addr,
        prefix: u8,
        network: Ipv4Addr,
    },

    #[error("At least one subnet with required hosts is needed")]
    NoDemands,

    #[error("Could not compute the requested subnets")]
    SubnetComputation,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SubnetError>;
