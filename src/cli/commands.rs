//! CLI commands and argument parsing

use crate::pagination::{ORDERS_PER_PAGE, SPONSORS_PER_PAGE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query orders and sponsors from the Afdian open API
#[derive(Parser, Debug)]
#[command(name = "afdian")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Creator user ID (overrides the config file)
    #[arg(long, global = true)]
    pub user_id: Option<String>,

    /// API token (overrides the config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API root (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Page ceiling for --all
    #[arg(long, global = true)]
    pub max_pages: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Look up a single order by order number
    Order {
        /// Order number (out_trade_no)
        out_trade_no: String,
    },

    /// List orders
    Orders {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = ORDERS_PER_PAGE)]
        per_page: u32,

        /// Fetch every page and print the combined list
        #[arg(long)]
        all: bool,
    },

    /// List sponsors
    Sponsors {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = SPONSORS_PER_PAGE)]
        per_page: u32,

        /// Fetch every page and print the combined list
        #[arg(long)]
        all: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
