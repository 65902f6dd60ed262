//! gsoc-export - Export Google Summer of Code data to CSV
//!
//! gsoc-export provides:
//! - Per-year organization listings
//! - Student project exports with case-insensitive filters
//! - Output as csv, jsonl or json

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod backends;
mod cli;
mod core;
mod flows;

use crate::core::error::ExportError;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    cli::run(cli).inspect_err(|err| {
        if is_fetch_failure(err) {
            eprintln!(
                "{} check your network connection or the --api-base URL",
                "hint:".yellow().bold()
            );
        }
    })
}

/// Whether the error chain holds a network/HTTP failure
fn is_fetch_failure(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<ExportError>())
        .any(ExportError::is_fetch)
}

/// Log to stderr, honoring RUST_LOG when set
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
