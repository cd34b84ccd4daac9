//! IPv4 address codec and CIDR notation utilities.
//!
//! Converts between dotted-quad text, [`Ipv4Addr`] and the `u32` form the
//! engines compute on, and between prefix lengths and subnet masks.
//! Provides the [`Cidr`] value type for `address/prefix` pairs.

use crate::error::{Result, SubnetError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

lazy_static! {
    static ref OCTET_RE: Regex = Regex::new(r"^[0-9]{1,3}$").expect("Invalid Regex?");
    static ref PREFIX_RE: Regex = Regex::new(r"^[0-9]{1,2}$").expect("Invalid Regex?");
}

/// Parse a dotted-quad address such as `192.168.10.0`.
///
/// Each of the four groups is 1-3 decimal digits in `[0,255]`. Whitespace
/// around the whole text and around each group is ignored.
pub fn parse_address(text: &str) -> Result<Ipv4Addr> {
    let invalid = || SubnetError::InvalidAddress(text.to_string());
    let parts: Vec<&str> = text.trim().split('.').collect();
    if parts.len() != 4 {
        return Err(invalid());
    }
    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts) {
        let part = part.trim();
        if !OCTET_RE.is_match(part) {
            return Err(invalid());
        }
        // at most 3 digits, so this fits u16
        let value: u16 = part.parse().map_err(|_| invalid())?;
        *octet = u8::try_from(value).map_err(|_| invalid())?;
    }
    Ok(Ipv4Addr::from(octets))
}

/// Convert an address to its 32-bit integer form.
pub fn address_to_int(addr: Ipv4Addr) -> u32 {
    let [a, b, c, d] = addr.octets();
    (u32::from(a) << 24) | (u32::from(b) << 16) | (u32::from(c) << 8) | u32::from(d)
}

/// Convert a 32-bit integer back to an address.
pub fn int_to_address(bits: u32) -> Ipv4Addr {
    Ipv4Addr::new(
        (bits >> 24) as u8,
        (bits >> 16) as u8,
        (bits >> 8) as u8,
        bits as u8,
    )
}

/// Mask for a prefix already known to be `<= 32`.
fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    // shifting in u64 keeps /0 well defined
    ((all_bits >> right_len) << right_len) as u32
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_calc::models::prefix_to_mask;
/// assert_eq!(prefix_to_mask(24).unwrap(), 0xFFFFFF00);
/// assert_eq!(prefix_to_mask(0).unwrap(), 0);
/// ```
pub fn prefix_to_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(SubnetError::InvalidPrefix(format!("/{len} is outside 0-32")))
    } else {
        Ok(mask_bits(len))
    }
}

/// Convert a subnet mask to its prefix length.
///
/// The mask must be a run of ones followed by a run of zeros.
pub fn mask_to_prefix(mask: u32) -> Result<u8> {
    let ones = mask.leading_ones();
    if ones + mask.trailing_zeros() != u32::from(MAX_LENGTH) {
        return Err(SubnetError::InvalidMask(format!(
            "{} is not contiguous",
            int_to_address(mask)
        )));
    }
    Ok(ones as u8)
}

/// Parse a prefix such as `24` or `/24`.
pub fn parse_prefix_text(text: &str) -> Result<u8> {
    let trimmed = text.trim();
    let raw = trimmed.strip_prefix('/').unwrap_or(trimmed).trim();
    if !PREFIX_RE.is_match(raw) {
        return Err(SubnetError::InvalidPrefix(text.to_string()));
    }
    let prefix: u8 = raw
        .parse()
        .map_err(|_| SubnetError::InvalidPrefix(text.to_string()))?;
    if prefix > MAX_LENGTH {
        return Err(SubnetError::InvalidPrefix(text.to_string()));
    }
    Ok(prefix)
}

/// Parse a mask given either as a prefix (`/24`) or dotted (`255.255.255.0`).
pub fn parse_mask_text(text: &str) -> Result<u8> {
    if text.contains('.') {
        let mask = parse_address(text).map_err(|_| SubnetError::InvalidMask(text.to_string()))?;
        mask_to_prefix(address_to_int(mask))
    } else {
        parse_prefix_text(text)
    }
}

/// Parse `address/prefix` text into a [`Cidr`].
pub fn parse_cidr_text(text: &str) -> Result<Cidr> {
    let trimmed = text.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() != 2 {
        return Err(SubnetError::InvalidAddress(format!(
            "expected address/prefix, got {text}"
        )));
    }
    if parts[0].trim().is_empty() {
        return Err(SubnetError::InvalidAddress(text.to_string()));
    }
    if parts[1].trim().is_empty() {
        return Err(SubnetError::InvalidPrefix(text.to_string()));
    }
    let addr = parse_address(parts[0])?;
    let prefix = parse_prefix_text(parts[1])?;
    Ok(Cidr { addr, prefix })
}

/// True when `addr` has all host bits cleared under `prefix`.
pub fn is_network_address(addr: Ipv4Addr, prefix: u8) -> bool {
    match prefix_to_mask(prefix) {
        Ok(mask) => {
            let bits = address_to_int(addr);
            bits & mask == bits
        }
        Err(_) => false,
    }
}

/// Get the network address for a given IP and prefix length.
pub fn network_address(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = prefix_to_mask(len)?;
    Ok(int_to_address(address_to_int(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_address(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr> {
    let mask = prefix_to_mask(len)?;
    let network_bits = address_to_int(addr) & mask;
    Ok(int_to_address(network_bits | !mask))
}

/// Render an address as four dot-separated 8-bit binary groups.
pub fn format_binary(addr: Ipv4Addr) -> String {
    addr.octets()
        .iter()
        .map(|octet| format!("{octet:08b}"))
        .collect::<Vec<String>>()
        .join(".")
}

/// Number of bits needed to count `n` distinct values, i.e. `ceil(log2(n))`.
///
/// Returns 0 for `n <= 1`.
pub fn host_bits_for(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        u64::BITS - (n - 1).leading_zeros()
    }
}

/// IPv4 address with a prefix length, written `a.b.c.d/p`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Cidr {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Cidr {
    /// Build a [`Cidr`], rejecting prefixes above 32.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Cidr> {
        prefix_to_mask(prefix)?;
        Ok(Cidr { addr, prefix })
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn mask(&self) -> u32 {
        mask_bits(self.prefix)
    }

    /// Lowest address in the block.
    pub fn network(&self) -> Ipv4Addr {
        int_to_address(address_to_int(self.addr) & self.mask())
    }

    /// Highest address in the block.
    pub fn broadcast(&self) -> Ipv4Addr {
        int_to_address(address_to_int(self.addr) | !self.mask())
    }

    pub fn is_network(&self) -> bool {
        self.addr == self.network()
    }
}

impl FromStr for Cidr {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Cidr> {
        parse_cidr_text(s)
    }
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_cidr_text(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}
