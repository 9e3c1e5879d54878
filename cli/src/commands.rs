pub mod ping;
pub mod sheet;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use opskit_common::hosts::HostList;
use opskit_sheets::CellRef;

#[derive(Parser)]
#[command(name = "opskit")]
#[command(about = "Small operations toolbox: reachability sweeps and sheet updates.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output; repeat for even less
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check which hosts answer an echo probe
    #[command(alias = "p")]
    Ping {
        /// Hosts to probe, comma-separated (IP addresses or names)
        targets: HostList,

        /// Echo requests per host
        #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        /// Per-host time budget in seconds
        #[arg(short, long, default_value_t = 10)]
        timeout: u64,

        /// Use the system ping utility even when running as root
        #[arg(long)]
        no_raw: bool,
    },
    /// Operate on a Google Sheets spreadsheet
    #[command(alias = "s")]
    Sheet {
        #[command(subcommand)]
        command: SheetCommands,
    },
}

#[derive(Subcommand)]
pub enum SheetCommands {
    /// Write one value into one cell
    Write {
        /// Value to write
        value: String,

        /// Path to the service-account key file
        #[arg(long, env = "OPSKIT_CREDENTIALS")]
        credentials: PathBuf,

        /// Spreadsheet display name
        #[arg(long, env = "OPSKIT_SPREADSHEET")]
        spreadsheet: String,

        /// Worksheet (tab) title
        #[arg(long, env = "OPSKIT_WORKSHEET")]
        worksheet: String,

        /// Target cell in A1 notation, e.g. B4
        #[arg(long, env = "OPSKIT_CELL")]
        cell: CellRef,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
