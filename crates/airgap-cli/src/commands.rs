//! Commands enum and subcommand arguments.

use std::path::PathBuf;

use airgap_core::SecurityLevel;
use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
        /// Skip eager initialization; call POST /api/initialize instead
        #[arg(long)]
        no_init: bool,
        /// Allowed CORS origin (repeatable; default allows any)
        #[arg(long = "allow-origin")]
        allow_origins: Vec<String>,
    },

    /// Initialize the model and generate text for a prompt
    Generate {
        /// Prompt text
        prompt: String,
        /// Maximum tokens to generate (defaults to the model configuration)
        #[arg(long)]
        max_tokens: Option<u32>,
        /// Sampling temperature (defaults to the model configuration)
        #[arg(long)]
        temperature: Option<f32>,
        /// Data classification label
        #[arg(long, default_value = "INTERNAL", value_parser = parse_classification)]
        classification: SecurityLevel,
    },

    /// Initialize the model and analyze a pollution report
    Analyze {
        /// JSON report file (omit to analyze a built-in sample report)
        file: Option<PathBuf>,
    },

    /// Run the security gate and print each check
    CheckSecurity,

    /// Validate hostnames against the egress policy
    Validate {
        /// Hostnames to check
        #[arg(required = true)]
        hosts: Vec<String>,
    },

    /// Initialize the model and print service statistics
    Stats,

    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as JSON
    Show,
}

fn parse_classification(raw: &str) -> Result<SecurityLevel, String> {
    raw.parse()
}
