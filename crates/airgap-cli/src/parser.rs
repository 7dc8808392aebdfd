//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the air-gapped inference service.
#[derive(Parser)]
#[command(name = "airgap")]
#[command(about = "Run and inspect the air-gapped local LLM service")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file (partial files override the defaults)
    #[arg(long = "config", short = 'c', env = "AIRGAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
