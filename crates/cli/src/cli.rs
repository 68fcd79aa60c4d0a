//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tilganger adapter - answers FINT identity and access-right events
#[derive(Parser, Debug)]
#[command(
    name = "tilganger-adapter",
    author,
    version,
    about = "FINT tilganger adapter",
    long_about = "Adapter for the FINT tilganger domain.\n\n\
                  Reads inbound events as JSON lines, verifies them, answers health \n\
                  checks and identity/access-right queries, and posts responses to \n\
                  the configured outputs."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "TILGANGER_ADAPTER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "TILGANGER_ADAPTER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch events read as JSON lines
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Run one health check against the configured probe
    Health(HealthArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "adapter.toml",
        env = "TILGANGER_ADAPTER_CONFIG"
    )]
    pub config: PathBuf,

    /// JSON lines file with inbound events (stdin when omitted)
    #[arg(short, long, env = "TILGANGER_ADAPTER_EVENTS")]
    pub events: Option<PathBuf>,

    /// Maximum number of events to dispatch (0 = unlimited)
    #[arg(long, default_value = "0", env = "TILGANGER_ADAPTER_MAX_EVENTS")]
    pub max_events: u64,

    /// Validate configuration and exit without dispatching
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "TILGANGER_ADAPTER_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "adapter.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `health` command
#[derive(Parser, Debug)]
pub struct HealthArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "adapter.toml")]
    pub config: PathBuf,

    /// Organisation id put on the health check request
    #[arg(long)]
    pub org_id: Option<String>,

    /// Print the health check response as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
