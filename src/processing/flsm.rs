//! Fixed-length subnet masking.
//!
//! Splits a base block into `N` equal subnets. Counts that are not a power
//! of two borrow enough bits for the next power of two, but only the
//! requested number of subnets is generated.

use super::cidr::compute_cidr;
use crate::error::{Result, SubnetError};
use crate::models::{
    address_to_int, host_bits_for, int_to_address, network_address, prefix_to_mask, FlsmResult,
    MAX_LENGTH,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

/// Upper bound on generated subnets.
pub const MAX_SUBNET_RESULTS: u64 = 4096;

lazy_static! {
    static ref COUNT_RE: Regex = Regex::new(r"^[0-9]+$").expect("Invalid Regex?");
}

/// Parse a non-negative subnet count written in plain decimal.
pub fn parse_subnet_count(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    if !COUNT_RE.is_match(trimmed) {
        return Err(SubnetError::InvalidDemandCount(text.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| SubnetError::InvalidDemandCount(text.to_string()))
}

/// Enumerate `desired_count` equal subnets of `address/current_prefix`.
///
/// The address is reduced to its network address first; callers that want
/// to flag a host address should check [`crate::is_network_address`].
/// A count of 0 yields no subnets and keeps the current prefix.
pub fn compute_flsm_subnets(
    address: Ipv4Addr,
    current_prefix: u8,
    desired_count: u64,
) -> Result<FlsmResult> {
    prefix_to_mask(current_prefix)?;

    let borrowed_bits = host_bits_for(desired_count);
    let new_prefix = u32::from(current_prefix) + borrowed_bits;
    if new_prefix > u32::from(MAX_LENGTH) {
        return Err(SubnetError::PrefixOverflow {
            prefix: current_prefix,
            borrowed: borrowed_bits.min(u32::from(u8::MAX)) as u8,
        });
    }
    let new_prefix = new_prefix as u8;
    let borrowed_bits = borrowed_bits as u8;

    if desired_count > MAX_SUBNET_RESULTS {
        return Err(SubnetError::TooManyResults {
            requested: desired_count,
            max: MAX_SUBNET_RESULTS,
        });
    }

    let base_network = address_to_int(network_address(address, current_prefix)?);
    let increment = 1u64 << (MAX_LENGTH - new_prefix);
    log::debug!(
        "flsm {address}/{current_prefix} count={desired_count} -> /{new_prefix} step={increment}"
    );

    let subnets = (0..desired_count)
        .map(|i| {
            // bounded by the prefix check above
            let start = u64::from(base_network) + i * increment;
            let start = u32::try_from(start).map_err(|_| SubnetError::SubnetComputation)?;
            compute_cidr(int_to_address(start), new_prefix)
                .map_err(|_| SubnetError::SubnetComputation)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FlsmResult {
        total_generated: subnets.len(),
        subnets,
        new_prefix,
        borrowed_bits,
    })
}
