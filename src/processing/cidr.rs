//! CIDR block derivation.

use crate::error::Result;
use crate::models::{address_to_int, int_to_address, prefix_to_mask, CidrBlock, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Derive network, broadcast, wildcard, host range and counts for a block.
///
/// `/31` and `/32` have no usable hosts and no host range.
pub fn compute_cidr(address: Ipv4Addr, prefix: u8) -> Result<CidrBlock> {
    let mask = prefix_to_mask(prefix)?;
    let network = address_to_int(address) & mask;
    let broadcast = network | !mask;

    let total_addresses = 1u64 << (MAX_LENGTH - prefix);
    let usable_hosts = total_addresses.saturating_sub(2);
    let (first_host, last_host) = if total_addresses > 2 {
        (
            Some(int_to_address(network + 1)),
            Some(int_to_address(broadcast - 1)),
        )
    } else {
        (None, None)
    };

    log::trace!("compute_cidr({address}/{prefix}) network={network:#010x} total={total_addresses}");

    Ok(CidrBlock {
        address,
        prefix,
        mask: int_to_address(mask),
        wildcard: int_to_address(!mask),
        network: int_to_address(network),
        broadcast: int_to_address(broadcast),
        first_host,
        last_host,
        total_addresses,
        usable_hosts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubnetError;

    #[test]
    fn test_compute_cidr_24() {
        let block = compute_cidr(Ipv4Addr::new(192, 168, 10, 0), 24).unwrap();
        assert_eq!(block.network, Ipv4Addr::new(192, 168, 10, 0));
        assert_eq!(block.broadcast, Ipv4Addr::new(192, 168, 10, 255));
        assert_eq!(block.first_host, Some(Ipv4Addr::new(192, 168, 10, 1)));
        assert_eq!(block.last_host, Some(Ipv4Addr::new(192, 168, 10, 254)));
        assert_eq!(block.mask, Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(block.wildcard, Ipv4Addr::new(0, 0, 0, 255));
        assert_eq!(block.usable_hosts, 254);
        assert_eq!(block.total_addresses, 256);
    }

    #[test]
    fn test_compute_cidr_host_address() {
        let block = compute_cidr(Ipv4Addr::new(172, 16, 37, 200), 20).unwrap();
        assert_eq!(block.address, Ipv4Addr::new(172, 16, 37, 200));
        assert_eq!(block.network, Ipv4Addr::new(172, 16, 32, 0));
        assert_eq!(block.broadcast, Ipv4Addr::new(172, 16, 47, 255));
        assert_eq!(block.usable_hosts, 4094);
        assert_eq!(block.cidr().unwrap().to_string(), "172.16.32.0/20");
    }

    #[test]
    fn test_compute_cidr_zero() {
        let block = compute_cidr(Ipv4Addr::new(0, 0, 0, 0), 0).unwrap();
        assert_eq!(block.broadcast, Ipv4Addr::new(255, 255, 255, 255));
        assert_eq!(block.total_addresses, 4294967296);
        assert_eq!(block.usable_hosts, 4294967294);
        assert_eq!(block.last_host, Some(Ipv4Addr::new(255, 255, 255, 254)));
    }

    #[test]
    fn test_compute_cidr_31_32() {
        let block = compute_cidr(Ipv4Addr::new(192, 168, 0, 0), 31).unwrap();
        assert_eq!(block.usable_hosts, 0);
        assert_eq!(block.total_addresses, 2);
        assert_eq!(block.first_host, None);
        assert_eq!(block.last_host, None);
        assert_eq!(block.host_range(), None);

        let block = compute_cidr(Ipv4Addr::new(10, 1, 1, 1), 32).unwrap();
        assert_eq!(block.network, Ipv4Addr::new(10, 1, 1, 1));
        assert_eq!(block.broadcast, Ipv4Addr::new(10, 1, 1, 1));
        assert_eq!(block.total_addresses, 1);
        assert_eq!(block.usable_hosts, 0);
        assert_eq!(block.first_host, None);
    }

    #[test]
    fn test_compute_cidr_30() {
        let block = compute_cidr(Ipv4Addr::new(10, 0, 0, 4), 30).unwrap();
        let range = block.host_range().unwrap();
        assert_eq!(range.to_string(), "10.0.0.5 - 10.0.0.6");
        assert_eq!(block.usable_hosts, 2);
    }

    #[test]
    fn test_compute_cidr_invalid_prefix() {
        assert!(matches!(
            compute_cidr(Ipv4Addr::new(10, 0, 0, 1), 33),
            Err(SubnetError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_compute_cidr_idempotent() {
        let addr = Ipv4Addr::new(10, 20, 30, 40);
        for prefix in 0..=32 {
            assert_eq!(compute_cidr(addr, prefix), compute_cidr(addr, prefix));
        }
    }
}
