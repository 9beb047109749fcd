//! # Benchdash - Laptop Benchmark Dashboard
//!
//! The main binary for the benchmark dashboard.
//!
//! This application provides:
//! - HTTP JSON API for the dashboard front end (axum-based)
//! - CLI reports for the terminal
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                apps/benchdash (THE BINARY)            │
//! │                                                       │
//! │   ┌─────────────┐   ┌─────────────┐   ┌───────────┐   │
//! │   │    CLI      │   │  HTTP API   │   │  Config   │   │
//! │   │   (clap)    │   │   (axum)    │   │  (toml)   │   │
//! │   └──────┬──────┘   └──────┬──────┘   └─────┬─────┘   │
//! │          └─────────────────┼────────────────┘         │
//! │                            ▼                          │
//! │                  ┌──────────────────┐                 │
//! │                  │  benchdash-core  │                 │
//! │                  │   (THE LOGIC)    │                 │
//! │                  └──────────────────┘                 │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! benchdash server --host 0.0.0.0 --port 8080
//!
//! # Terminal reports
//! benchdash summary --as-of 2025-03-20
//! benchdash list -f MKT=US -Q rtx
//! benchdash timeline --catalog systems.json
//! benchdash suite PortRoyal --json-mode
//! ```

use benchdash::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments first: --verbose selects the default log level.
    let cli = cli::Cli::parse();

    // Initialize tracing. BENCHDASH_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("BENCHDASH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "benchdash=debug,benchdash_core=debug,tower_http=debug"
    } else {
        "benchdash=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Benchdash startup banner.
fn print_banner() {
    println!(
        r#"
  ┳┓┏┓┳┓┏┓┓┏┳┓┏┓┏┓┓┏
  ┣┫┣ ┃┃┃ ┣┫┃┃┣┫┗┓┣┫
  ┻┛┗┛┛┗┗┛┛┗┻┛┛┗┗┛┛┗

  Laptop Benchmark Dashboard v{}

  Timeline • Scores • Filters
"#,
        env!("CARGO_PKG_VERSION")
    );
}
