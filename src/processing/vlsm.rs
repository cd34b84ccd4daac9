//! Variable-length subnet masking.
//!
//! Demands are placed largest first into contiguous blocks starting at the
//! base network. Equal demands keep their input order.

use super::cidr::compute_cidr;
use crate::error::{Result, SubnetError};
use crate::models::{
    address_to_int, host_bits_for, int_to_address, network_address, prefix_to_mask,
    AddressRange, Allocation, BaseSummary, Remaining, SubnetRequest, VlsmResult, MAX_LENGTH,
};
use std::net::Ipv4Addr;

/// Largest host count any single IPv4 block can hold.
pub const MAX_HOSTS: u64 = (1u64 << 32) - 2;

/// A request after validation, with its block size worked out.
#[derive(Debug, Clone)]
struct Demand {
    name: String,
    required_hosts: u64,
    needed_hosts: u64,
    block_size: u64,
    prefix: u8,
}

impl Demand {
    /// `position` is 1-based and only used for default names and errors.
    fn from_request(request: &SubnetRequest, position: usize) -> Result<Demand> {
        let name = match request.name.trim() {
            "" => format!("Subnet {position}"),
            name => name.to_string(),
        };
        if request.required_hosts == 0 {
            return Err(SubnetError::InvalidHostCount { index: position });
        }
        let too_large = SubnetError::HostCountTooLarge {
            index: position,
            max: MAX_HOSTS,
        };
        if request.required_hosts > MAX_HOSTS {
            return Err(too_large);
        }
        let needed_hosts = request.required_hosts + 2;
        let host_bits = host_bits_for(needed_hosts);
        if host_bits > u32::from(MAX_LENGTH) {
            return Err(too_large);
        }
        Ok(Demand {
            name,
            required_hosts: request.required_hosts,
            needed_hosts,
            block_size: 1u64 << host_bits,
            prefix: MAX_LENGTH - host_bits as u8,
        })
    }
}

/// Allocate one contiguous block per demand inside `base_address/base_prefix`.
///
/// The base address must already be a network address. Allocations come
/// back largest demand first; nothing is returned if any demand does not fit.
pub fn compute_vlsm(
    base_address: Ipv4Addr,
    base_prefix: u8,
    demands: &[SubnetRequest],
) -> Result<VlsmResult> {
    let base_mask = prefix_to_mask(base_prefix)?;
    let base_network = network_address(base_address, base_prefix)?;
    if base_network != base_address {
        return Err(SubnetError::NotNetworkAddress {
            address: base_address,
            prefix: base_prefix,
            network: base_network,
        });
    }
    if demands.is_empty() {
        return Err(SubnetError::NoDemands);
    }

    let mut normalized = demands
        .iter()
        .enumerate()
        .map(|(i, request)| Demand::from_request(request, i + 1))
        .collect::<Result<Vec<_>>>()?;
    // sort_by is stable, so ties stay in input order
    normalized.sort_by(|a, b| b.needed_hosts.cmp(&a.needed_hosts));

    let base_start = u64::from(address_to_int(base_network));
    let base_size = 1u64 << (MAX_LENGTH - base_prefix);
    let base_end = base_start + base_size - 1;
    log::debug!(
        "vlsm {base_network}/{base_prefix} size={base_size} demands={}",
        normalized.len()
    );

    let mut cursor = base_start;
    let mut used_addresses = 0u64;
    let mut allocations = Vec::with_capacity(normalized.len());
    for demand in normalized {
        let broadcast = cursor + demand.block_size - 1;
        if broadcast > base_end {
            log::debug!(
                "{} needs {} addresses, only {} left",
                demand.name,
                demand.block_size,
                base_end + 1 - cursor
            );
            return Err(SubnetError::CapacityExceeded { name: demand.name });
        }
        // cursor <= broadcast <= base_end, so it fits 32 bits
        let network = int_to_address(cursor as u32);
        let block = compute_cidr(network, demand.prefix)?;
        log::trace!("placed {} at {network}/{}", demand.name, demand.prefix);

        allocations.push(Allocation {
            wasted: block.usable_hosts - demand.required_hosts,
            name: demand.name,
            required_hosts: demand.required_hosts,
            needed_hosts: demand.needed_hosts,
            block_size: demand.block_size,
            block,
        });
        cursor = broadcast + 1;
        used_addresses += demand.block_size;
    }

    let remaining_addresses = base_size - used_addresses;
    let range = (remaining_addresses > 0).then(|| AddressRange {
        start: int_to_address(cursor as u32),
        end: int_to_address(base_end as u32),
    });

    Ok(VlsmResult {
        base: BaseSummary {
            network: base_network,
            prefix: base_prefix,
            mask: int_to_address(base_mask),
            total_addresses: base_size,
            usable_hosts: base_size.saturating_sub(2),
        },
        allocations,
        used_addresses,
        remaining: Remaining {
            addresses: remaining_addresses,
            hosts: remaining_addresses.saturating_sub(2),
            range,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requests(items: &[(&str, u64)]) -> Vec<SubnetRequest> {
        items
            .iter()
            .map(|(name, hosts)| SubnetRequest::new(name, *hosts))
            .collect()
    }

    fn cidrs(result: &VlsmResult) -> Vec<String> {
        result
            .allocations
            .iter()
            .map(|a| a.block.cidr().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_vlsm_nominal() {
        let result = compute_vlsm(
            Ipv4Addr::new(192, 168, 0, 0),
            24,
            &requests(&[("A", 100), ("B", 50), ("C", 25), ("D", 10)]),
        )
        .unwrap();

        let names: Vec<&str> = result.allocations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
        assert_eq!(
            cidrs(&result),
            vec![
                "192.168.0.0/25",
                "192.168.0.128/26",
                "192.168.0.192/27",
                "192.168.0.224/28"
            ]
        );
        let a = &result.allocations[0];
        assert_eq!(a.needed_hosts, 102);
        assert_eq!(a.block_size, 128);
        assert_eq!(a.block.usable_hosts, 126);
        assert_eq!(a.wasted, 26);
        assert_eq!(a.block.first_host, Some(Ipv4Addr::new(192, 168, 0, 1)));
        assert_eq!(a.block.last_host, Some(Ipv4Addr::new(192, 168, 0, 126)));

        assert_eq!(result.used_addresses, 240);
        assert_eq!(result.remaining.addresses, 16);
        assert_eq!(result.remaining.hosts, 14);
        assert_eq!(
            result.remaining.range,
            Some(AddressRange {
                start: Ipv4Addr::new(192, 168, 0, 240),
                end: Ipv4Addr::new(192, 168, 0, 255),
            })
        );
        assert_eq!(result.requested_hosts(), 185);
        assert_eq!(result.base.usable_hosts, 254);
        assert_eq!(result.base.mask, Ipv4Addr::new(255, 255, 255, 0));
    }

    #[test]
    fn test_vlsm_orders_by_demand_not_input() {
        let result = compute_vlsm(
            Ipv4Addr::new(10, 0, 0, 0),
            24,
            &requests(&[("small", 5), ("big", 60), ("mid", 20)]),
        )
        .unwrap();
        let names: Vec<&str> = result.allocations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["big", "mid", "small"]);
        assert_eq!(
            cidrs(&result),
            vec!["10.0.0.0/26", "10.0.0.64/27", "10.0.0.96/29"]
        );
    }

    #[test]
    fn test_vlsm_ties_keep_input_order() {
        let result = compute_vlsm(
            Ipv4Addr::new(10, 0, 0, 0),
            24,
            &requests(&[("first", 30), ("second", 20), ("third", 30)]),
        )
        .unwrap();
        let names: Vec<&str> = result.allocations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["first", "third", "second"]);
        assert_eq!(
            cidrs(&result),
            vec!["10.0.0.0/27", "10.0.0.32/27", "10.0.0.64/27"]
        );
    }

    #[test]
    fn test_vlsm_default_names() {
        let result = compute_vlsm(
            Ipv4Addr::new(10, 0, 0, 0),
            24,
            &requests(&[("", 10), ("  ", 50), (" Lab ", 2)]),
        )
        .unwrap();
        let names: Vec<&str> = result.allocations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Subnet 2", "Subnet 1", "Lab"]);
    }

    #[test]
    fn test_vlsm_exact_fit() {
        let result = compute_vlsm(
            Ipv4Addr::new(10, 0, 0, 0),
            24,
            &requests(&[("a", 126), ("b", 126)]),
        )
        .unwrap();
        assert_eq!(result.used_addresses, 256);
        assert_eq!(result.remaining.addresses, 0);
        assert_eq!(result.remaining.hosts, 0);
        assert_eq!(result.remaining.range, None);
    }

    #[test]
    fn test_vlsm_whole_address_space() {
        let result = compute_vlsm(
            Ipv4Addr::new(0, 0, 0, 0),
            0,
            &requests(&[("all", MAX_HOSTS)]),
        )
        .unwrap();
        assert_eq!(result.allocations[0].block.prefix, 0);
        assert_eq!(result.allocations[0].wasted, 0);
        assert_eq!(result.used_addresses, 1 << 32);
        assert_eq!(result.remaining.range, None);
    }

    #[test]
    fn test_vlsm_capacity_exceeded() {
        assert_eq!(
            compute_vlsm(
                Ipv4Addr::new(192, 168, 0, 0),
                24,
                &requests(&[("A", 100), ("B", 100), ("C", 100)]),
            ),
            Err(SubnetError::CapacityExceeded {
                name: "C".to_string()
            })
        );
        assert!(matches!(
            compute_vlsm(
                Ipv4Addr::new(192, 168, 0, 0),
                24,
                &requests(&[("huge", 300)])
            ),
            Err(SubnetError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_vlsm_too_many_hosts() {
        assert_eq!(
            compute_vlsm(
                Ipv4Addr::new(10, 0, 0, 0),
                24,
                &requests(&[("X", 5_000_000_000)])
            ),
            Err(SubnetError::HostCountTooLarge {
                index: 1,
                max: MAX_HOSTS
            })
        );
    }

    #[test]
    fn test_vlsm_invalid_hosts() {
        assert_eq!(
            compute_vlsm(
                Ipv4Addr::new(10, 0, 0, 0),
                24,
                &requests(&[("ok", 10), ("zero", 0)])
            ),
            Err(SubnetError::InvalidHostCount { index: 2 })
        );
    }

    #[test]
    fn test_vlsm_base_checks() {
        assert_eq!(
            compute_vlsm(Ipv4Addr::new(10, 0, 0, 5), 24, &requests(&[("a", 1)])),
            Err(SubnetError::NotNetworkAddress {
                address: Ipv4Addr::new(10, 0, 0, 5),
                prefix: 24,
                network: Ipv4Addr::new(10, 0, 0, 0),
            })
        );
        assert_eq!(
            compute_vlsm(Ipv4Addr::new(10, 0, 0, 0), 24, &[]),
            Err(SubnetError::NoDemands)
        );
        assert!(matches!(
            compute_vlsm(Ipv4Addr::new(10, 0, 0, 0), 40, &requests(&[("a", 1)])),
            Err(SubnetError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_vlsm_accounting() {
        let result = compute_vlsm(
            Ipv4Addr::new(172, 16, 0, 0),
            20,
            &requests(&[("a", 500), ("b", 3), ("c", 1000), ("d", 60), ("e", 1)]),
        )
        .unwrap();
        let sum: u64 = result.allocations.iter().map(|a| a.block_size).sum();
        assert_eq!(sum, result.used_addresses);
        assert_eq!(
            result.used_addresses + result.remaining.addresses,
            result.base.total_addresses
        );
        // blocks are contiguous and aligned
        let mut next = address_to_int(Ipv4Addr::new(172, 16, 0, 0));
        for allocation in &result.allocations {
            assert_eq!(address_to_int(allocation.block.network), next);
            assert!(crate::models::is_network_address(
                allocation.block.network,
                allocation.block.prefix
            ));
            next = address_to_int(allocation.block.broadcast) + 1;
        }
    }
}
