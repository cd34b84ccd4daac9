//! Command line front end.
//!
//! Parses user text through the codec, calls the engines and renders the
//! result in the chosen format. Kept out of `main.rs` so it can be tested.

use crate::config::Settings;
use crate::models::{
    is_network_address, parse_address, parse_cidr_text, parse_mask_text, CidrBlock, FlsmResult,
    SubnetRequest,
};
use crate::output;
use crate::processing::{compute_cidr, compute_flsm_subnets, compute_vlsm, parse_subnet_count};
use crate::SubnetError;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::net::Ipv4Addr;

#[derive(Parser, Debug)]
#[command(name = "subnet-calc")]
#[command(about = "IPv4 CIDR, FLSM and VLSM calculator.")]
pub struct CommandLine {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the block an address belongs to
    #[command(alias = "c")]
    Cidr {
        /// ADDRESS/PREFIX, or an address together with --mask
        target: String,
        /// Prefix (/24) or dotted mask (255.255.255.0)
        #[arg(short, long)]
        mask: Option<String>,
        /// Also show the binary view
        #[arg(short, long)]
        binary: bool,
        /// Split the block into this many equal subnets
        #[arg(short, long)]
        subnets: Option<String>,
    },
    /// Split a block into equal subnets
    #[command(alias = "f")]
    Flsm { target: String, count: String },
    /// Allocate blocks by host demand, e.g. `vlsm 192.168.0.0/24 LAN:100 WAN:2`
    #[command(alias = "v")]
    Vlsm {
        base: String,
        #[arg(required = true)]
        demands: Vec<String>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Rendered command output.
#[derive(Debug, Default)]
pub struct Report {
    pub stdout: String,
    /// Non-fatal notes for the user, such as a normalized host address.
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
struct CidrReport<'a> {
    cidr: &'a CidrBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    subnets: Option<&'a FlsmResult>,
}

/// Address and prefix from either `a.b.c.d/p` or an address plus a mask.
/// The prefix in the target wins over --mask.
fn parse_target(
    target: &str,
    mask: Option<&str>,
    report: &mut Report,
) -> Result<(Ipv4Addr, u8), SubnetError> {
    if let (Some(mask), true) = (mask, target.contains('/')) {
        let message = format!("{target} already has a prefix, ignoring --mask {mask}");
        log::warn!("{message}");
        report.warnings.push(message);
    }
    match mask {
        Some(mask) if !target.contains('/') => Ok((parse_address(target)?, parse_mask_text(mask)?)),
        _ if target.contains('/') => {
            let cidr = parse_cidr_text(target)?;
            Ok((cidr.addr(), cidr.prefix()))
        }
        _ => Err(SubnetError::InvalidPrefix(format!(
            "{target} needs a /prefix or --mask"
        ))),
    }
}

fn flsm_with_warning(
    addr: Ipv4Addr,
    prefix: u8,
    count_text: &str,
    report: &mut Report,
) -> Result<FlsmResult, SubnetError> {
    let count = parse_subnet_count(count_text)?;
    if !is_network_address(addr, prefix) {
        let message = format!(
            "{addr} is not a network address for /{prefix}, using its network address for the subnets"
        );
        log::warn!("{message}");
        report.warnings.push(message);
    }
    compute_flsm_subnets(addr, prefix, count)
}

/// Execute one parsed command line.
pub fn run(cli: &CommandLine, settings: &Settings) -> Result<Report, Box<dyn Error>> {
    let mut report = Report::default();
    let rows = settings.max_display_rows;

    let stdout = match &cli.command {
        Commands::Cidr {
            target,
            mask,
            binary,
            subnets,
        } => {
            log::info!("#Start cidr {target} mask={mask:?}");
            let (addr, prefix) = parse_target(target, mask.as_deref(), &mut report)?;
            let block = compute_cidr(addr, prefix)?;
            let flsm = match subnets {
                Some(count) => Some(flsm_with_warning(addr, prefix, count, &mut report)?),
                None => None,
            };
            match cli.format {
                OutputFormat::Table => {
                    let mut text = output::cidr_summary(&block, *binary);
                    if let Some(flsm) = &flsm {
                        text.push_str("\n\n");
                        text.push_str(&output::flsm_table(flsm, rows));
                    }
                    text
                }
                OutputFormat::Csv => output::blocks_csv(
                    std::iter::once(&block).chain(flsm.iter().flat_map(|f| f.subnets.iter())),
                )
                .join("\n"),
                OutputFormat::Json => output::to_json(&CidrReport {
                    cidr: &block,
                    subnets: flsm.as_ref(),
                })?,
            }
        }
        Commands::Flsm { target, count } => {
            log::info!("#Start flsm {target} count={count}");
            let cidr = parse_cidr_text(target)?;
            let result = flsm_with_warning(cidr.addr(), cidr.prefix(), count, &mut report)?;
            match cli.format {
                OutputFormat::Table => output::flsm_table(&result, rows),
                OutputFormat::Csv => output::flsm_csv(&result).join("\n"),
                OutputFormat::Json => output::to_json(&result)?,
            }
        }
        Commands::Vlsm { base, demands } => {
            log::info!("#Start vlsm {base} with {} demands", demands.len());
            let cidr = parse_cidr_text(base)?;
            let requests = demands
                .iter()
                .map(|d| d.parse::<SubnetRequest>())
                .collect::<Result<Vec<_>, _>>()?;
            let result = compute_vlsm(cidr.addr(), cidr.prefix(), &requests)?;
            match cli.format {
                OutputFormat::Table => output::vlsm_report(&result, rows),
                OutputFormat::Csv => output::vlsm_csv(&result).join("\n"),
                OutputFormat::Json => output::to_json(&result)?,
            }
        }
    };

    report.stdout = stdout;
    Ok(report)
}
