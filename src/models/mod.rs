//! Domain models for subnet calculations.
//!
//! This module contains the core data structures used throughout the application:
//! - [`ipv4`] - Address codec and the [`Cidr`] value type
//! - [`CidrBlock`] and [`FlsmResult`] - Derived block data
//! - [`SubnetRequest`], [`Allocation`] and [`VlsmResult`] - VLSM input and output

mod block;
mod ipv4;
mod vlsm;

// Re-export public types
pub use block::{AddressRange, CidrBlock, FlsmResult};
pub use ipv4::{
    address_to_int, broadcast_address, format_binary, host_bits_for, int_to_address,
    is_network_address, mask_to_prefix, network_address, parse_address, parse_cidr_text,
    parse_mask_text, parse_prefix_text, prefix_to_mask, Cidr, MAX_LENGTH,
};
pub use vlsm::{Allocation, BaseSummary, Remaining, SubnetRequest, VlsmResult};
