//! IPv4 subnet calculator.
//!
//! - [`compute_cidr`] derives the network, broadcast and host range of a block
//! - [`compute_flsm_subnets`] splits a block into equal subnets
//! - [`compute_vlsm`] packs named host demands into contiguous blocks
//!
//! All three are pure functions over [`std::net::Ipv4Addr`] and a prefix;
//! text input goes through the codec helpers in [`models`] first.
//!
//! ```
//! use std::net::Ipv4Addr;
//! use subnet_calc::{compute_vlsm, SubnetRequest};
//!
//! let demands = [SubnetRequest::new("LAN", 100), SubnetRequest::new("WAN", 2)];
//! let result = compute_vlsm(Ipv4Addr::new(192, 168, 0, 0), 24, &demands).unwrap();
//! assert_eq!(result.allocations[0].block.prefix, 25);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Result, SubnetError};
pub use models::{
    address_to_int, int_to_address, is_network_address, mask_to_prefix, parse_address,
    parse_cidr_text, parse_mask_text, parse_prefix_text, prefix_to_mask, Allocation, Cidr,
    CidrBlock, FlsmResult, SubnetRequest, VlsmResult,
};
pub use processing::{compute_cidr, compute_flsm_subnets, compute_vlsm};
