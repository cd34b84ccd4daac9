//! Terminal output utilities.
//!
//! Builds the coloured summaries and tables printed by the CLI. Renderers
//! return the text so callers decide where it goes.

use crate::models::{format_binary, CidrBlock, FlsmResult, VlsmResult};
use colored::Colorize;
use std::net::Ipv4Addr;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Optional address, `N/A` when absent.
pub fn or_na(addr: Option<Ipv4Addr>) -> String {
    addr.map_or_else(|| "N/A".to_string(), |a| a.to_string())
}

fn line(label: &str, value: impl ToString) -> String {
    format!("{:>18}: {}", label.bold(), value.to_string())
}

/// Highlighted one-line note.
pub fn warning(message: &str) -> String {
    format!("#{}# {message}", "NOTE".on_red())
}

/// Summary of a single block, with the binary view when `binary` is set.
pub fn cidr_summary(block: &CidrBlock, binary: bool) -> String {
    let range = block
        .host_range()
        .map_or_else(|| "N/A".to_string(), |r| r.to_string());
    let mut lines = vec![
        format!(
            "{} {}",
            "CIDR".green().bold(),
            format!("{}/{}", block.network, block.prefix).cyan()
        ),
        line("Network", block.network),
        line("Host range", range),
        line("Broadcast", block.broadcast),
        line("Mask", format!("{} (/{})", block.mask, block.prefix)),
        line("Wildcard", block.wildcard),
        line("Usable hosts", block.usable_hosts),
        line("Total addresses", block.total_addresses),
    ];
    if binary {
        lines.push(line("Address (bin)", format_binary(block.address)));
        lines.push(line("Mask (bin)", format_binary(block.mask)));
        lines.push(line("Network (bin)", format_binary(block.network)));
        lines.push(line("Broadcast (bin)", format_binary(block.broadcast)));
    }
    lines.join("\n")
}

/// Note appended when a table is cut at `max_rows`.
fn truncated_note(total: usize, max_rows: usize) -> Option<String> {
    (total > max_rows).then(|| {
        warning(&format!(
            "{} more rows not shown (display limit {max_rows})",
            total - max_rows
        ))
    })
}

/// FLSM summary followed by one row per subnet, at most `max_rows` rows.
pub fn flsm_table(result: &FlsmResult, max_rows: usize) -> String {
    let new_mask = result
        .subnets
        .first()
        .map_or_else(String::new, |s| format!(" ({})", s.mask));
    let hosts = result
        .hosts_per_subnet()
        .map_or_else(|| "-".to_string(), |h| h.to_string());
    let mut lines = vec![
        format!(
            "{} {}",
            "FLSM".green().bold(),
            format!("{} subnets", result.total_generated).cyan()
        ),
        line("New prefix", format!("/{}{new_mask}", result.new_prefix)),
        line("Borrowed bits", result.borrowed_bits),
        line("Hosts per subnet", hosts),
    ];
    if result.subnets.is_empty() {
        return lines.join("\n");
    }
    lines.push(format!(
        "{:>6}  {:<18} {:<15} {:<15} {:<15} {:<15}",
        "#", "Subnet", "First host", "Last host", "Broadcast", "Mask"
    ));
    lines.extend(result.subnets.iter().take(max_rows).enumerate().map(|(i, s)| {
        format!(
            "{:>6}  {:<18} {:<15} {:<15} {:<15} {:<15}",
            i + 1,
            format!("{}/{}", s.network, s.prefix),
            or_na(s.first_host),
            or_na(s.last_host),
            s.broadcast,
            s.mask
        )
    }));
    lines.extend(truncated_note(result.subnets.len(), max_rows));
    lines.join("\n")
}

/// VLSM summary followed by the allocation table.
pub fn vlsm_report(result: &VlsmResult, max_rows: usize) -> String {
    let remaining_range = result
        .remaining
        .range
        .map_or_else(|| "none".to_string(), |r| r.to_string());
    let mut lines = vec![
        format!(
            "{} {}",
            "VLSM".green().bold(),
            format!("{}/{}", result.base.network, result.base.prefix).cyan()
        ),
        line("Base mask", result.base.mask),
        line("Usable hosts", result.base.usable_hosts),
        line("Total addresses", result.base.total_addresses),
        line("Requested hosts", result.requested_hosts()),
        line("Used addresses", result.used_addresses),
        line("Free addresses", result.remaining.addresses),
        line("Free hosts", result.remaining.hosts),
        line("Free range", remaining_range),
        format!(
            "{:<16} {:>10} {:>10}  {:<18} {:<15} {:<31} {:<15} {:>10} {:>8}",
            "Name", "Required", "Needed", "Subnet", "Mask", "Host range", "Broadcast", "Usable",
            "Wasted"
        ),
    ];
    lines.extend(result.allocations.iter().take(max_rows).map(|a| {
        let range = a
            .block
            .host_range()
            .map_or_else(|| "N/A".to_string(), |r| r.to_string());
        format!(
            "{:<16} {:>10} {:>10}  {:<18} {:<15} {:<31} {:<15} {:>10} {:>8}",
            a.name,
            a.required_hosts,
            a.needed_hosts,
            format!("{}/{}", a.block.network, a.block.prefix),
            a.block.mask,
            range,
            a.block.broadcast,
            a.block.usable_hosts,
            a.wasted
        )
    }));
    lines.extend(truncated_note(result.allocations.len(), max_rows));
    lines.join("\n")
}
