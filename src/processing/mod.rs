//! Subnet computations.
//!
//! This module contains the calculation engines:
//! - [`cidr`] - Block derivation for one address/prefix
//! - [`flsm`] - Equal-size subnet enumeration
//! - [`vlsm`] - Best-fit-descending contiguous allocation

mod cidr;
mod flsm;
mod vlsm;

// Re-export public functions
pub use cidr::compute_cidr;
pub use flsm::{compute_flsm_subnets, parse_subnet_count, MAX_SUBNET_RESULTS};
pub use vlsm::{compute_vlsm, MAX_HOSTS};
