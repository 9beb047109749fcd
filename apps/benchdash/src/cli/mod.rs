//! # Benchdash CLI Module
//!
//! This module implements the CLI interface for Benchdash.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `list` - List systems, optionally filtered
//! - `timeline` - Timeline status and progress per system
//! - `profile` - Performance-profile values per system
//! - `suite` - Ranking and averages of one benchmark suite
//! - `summary` - Dashboard headline numbers (default)
//! - `values` - Distinct values of one descriptive field
//! - `filters` - Filter groups with available options

mod commands;

use crate::config::Config;
use benchdash_core::DashError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Benchdash - Laptop Benchmark Dashboard
///
/// Timeline status, progress and benchmark results for systems under test.
#[derive(Parser, Debug)]
#[command(name = "benchdash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (default: ./benchdash.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON catalog file (default: built-in sample catalog)
    #[arg(short = 'C', long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Reporting date, YYYY-MM-DD (default: today)
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List systems
    List {
        /// Filter as FIELD=VALUE, repeatable (e.g. -f MKT=US -f MKT=EU)
        #[arg(short, long = "filter")]
        filter: Vec<String>,

        /// Free-text search over name, CPU and GPU
        #[arg(short = 'Q', long)]
        query: Option<String>,
    },

    /// Show timeline status and progress
    Timeline {
        /// Filter as FIELD=VALUE, repeatable
        #[arg(short, long = "filter")]
        filter: Vec<String>,

        /// Free-text search over name, CPU and GPU
        #[arg(short = 'Q', long)]
        query: Option<String>,
    },

    /// Show performance-profile values (100 = 20,000 points)
    Profile {
        /// Filter as FIELD=VALUE, repeatable
        #[arg(short, long = "filter")]
        filter: Vec<String>,

        /// Free-text search over name, CPU and GPU
        #[arg(short = 'Q', long)]
        query: Option<String>,
    },

    /// Show one benchmark suite (TimeSpy, PortRoyal, TimeSpyExtreme,
    /// Firestrike, FirestrikeUltra)
    Suite {
        /// Suite id
        suite: String,
    },

    /// Show dashboard summary
    Summary,

    /// List distinct values of a field (e.g. MKT, GPU)
    Values {
        /// Field key
        field: String,
    },

    /// Show filter groups and their options
    Filters,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve configuration from file, environment and flags.
pub fn resolve_config(cli: &Cli) -> Result<Config, DashError> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();

    if let Some(path) = &cli.catalog {
        config.catalog.path = Some(path.clone());
    }
    if let Some(as_of) = &cli.as_of {
        config.timeline.as_of = Some(as_of.clone());
    }
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), DashError> {
    let mut config = resolve_config(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::List { filter, query }) => cmd_list(&config, json_mode, &filter, query),
        Some(Commands::Timeline { filter, query }) => {
            cmd_timeline(&config, json_mode, &filter, query)
        }
        Some(Commands::Profile { filter, query }) => {
            cmd_profile(&config, json_mode, &filter, query)
        }
        Some(Commands::Suite { suite }) => cmd_suite(&config, json_mode, &suite),
        Some(Commands::Summary) => cmd_summary(&config, json_mode),
        Some(Commands::Values { field }) => cmd_values(&config, json_mode, &field),
        Some(Commands::Filters) => cmd_filters(&config, json_mode),
        None => {
            // No subcommand - show summary by default
            cmd_summary(&config, json_mode)
        }
    }
}
