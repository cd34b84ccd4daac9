//! Output formatting for subnet results.
//!
//! This module handles formatting and outputting results:
//! - [`csv`] - CSV output formatting
//! - [`json`] - JSON output
//! - [`terminal`] - Terminal output with colors

mod csv;
mod json;
mod terminal;

pub use csv::{blocks_csv, flsm_csv, vlsm_csv};
pub use json::to_json;
pub use terminal::{cidr_summary, flsm_table, format_field, vlsm_report, warning};
