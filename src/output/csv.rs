//! CSV output formatting for subnet results.
//!
//! Fields are quoted and padded so the columns line up in a terminal and
//! still open cleanly in a spreadsheet.

use super::terminal::{format_field, or_na};
use crate::models::{CidrBlock, FlsmResult, VlsmResult};
use itertools::Itertools;

const BLOCK_COLUMNS: [(&str, usize); 9] = [
    ("cnt", 6),
    ("subnet_cidr", 20),
    ("network", 17),
    ("first_host", 17),
    ("last_host", 17),
    ("broadcast", 17),
    ("mask", 17),
    ("usable_hosts", 14),
    ("total_addresses", 17),
];

const VLSM_COLUMNS: [(&str, usize); 11] = [
    ("name", 18),
    ("required_hosts", 16),
    ("needed_hosts", 14),
    ("subnet_cidr", 20),
    ("mask", 17),
    ("first_host", 17),
    ("last_host", 17),
    ("broadcast", 17),
    ("usable_hosts", 14),
    ("wasted", 10),
    ("block_size", 12),
];

/// Escape a field the way spreadsheets expect.
fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        input.replace('"', "\"\"")
    } else {
        input.to_string()
    }
}

fn header(columns: &[(&str, usize)]) -> String {
    columns
        .iter()
        .map(|(name, width)| format_field(name, *width))
        .join(",")
}

fn row(values: Vec<String>, columns: &[(&str, usize)]) -> String {
    values
        .iter()
        .zip(columns)
        .map(|(value, (_, width))| format_field(escape_csv_field(value), *width))
        .join(",")
}

fn block_values(i: usize, block: &CidrBlock) -> Vec<String> {
    vec![
        (i + 1).to_string(),
        format!("{}/{}", block.network, block.prefix),
        block.network.to_string(),
        or_na(block.first_host),
        or_na(block.last_host),
        block.broadcast.to_string(),
        block.mask.to_string(),
        block.usable_hosts.to_string(),
        block.total_addresses.to_string(),
    ]
}

/// Header plus one numbered line per block.
pub fn blocks_csv<'a, I>(blocks: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a CidrBlock>,
{
    let mut lines = vec![header(&BLOCK_COLUMNS)];
    lines.extend(
        blocks
            .into_iter()
            .enumerate()
            .map(|(i, block)| row(block_values(i, block), &BLOCK_COLUMNS)),
    );
    lines
}

/// Header plus one line per FLSM subnet.
pub fn flsm_csv(result: &FlsmResult) -> Vec<String> {
    blocks_csv(&result.subnets)
}

/// Header plus one line per VLSM allocation, in allocation order.
pub fn vlsm_csv(result: &VlsmResult) -> Vec<String> {
    let mut lines = vec![header(&VLSM_COLUMNS)];
    lines.extend(result.allocations.iter().map(|a| {
        let values = vec![
            a.name.clone(),
            a.required_hosts.to_string(),
            a.needed_hosts.to_string(),
            format!("{}/{}", a.block.network, a.block.prefix),
            a.block.mask.to_string(),
            or_na(a.block.first_host),
            or_na(a.block.last_host),
            a.block.broadcast.to_string(),
            a.block.usable_hosts.to_string(),
            a.wasted.to_string(),
            a.block_size.to_string(),
        ];
        row(values, &VLSM_COLUMNS)
    }));
    lines
}
