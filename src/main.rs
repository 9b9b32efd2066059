//! Pydocs-Harvest main entry point
//!
//! This is the command-line interface for the documentation harvester.

use anyhow::Context;
use clap::Parser;
use pydocs_harvest::config::load_or_default;
use pydocs_harvest::driver::run_pipeline;
use pydocs_harvest::output::{Output, OutputFormat};
use pydocs_harvest::session::{CachedSession, Session};
use pydocs_harvest::strategies::Mode;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Pydocs-Harvest: tables from the Python documentation sites
///
/// Collects release articles, documentation versions, the PDF archive, or
/// PEP status counts cross-checked against every PEP page.
#[derive(Parser, Debug)]
#[command(name = "pydocs-harvest")]
#[command(version)]
#[command(about = "Tables from the Python documentation sites", long_about = None)]
struct Cli {
    /// Parser mode
    #[arg(value_enum)]
    mode: Mode,

    /// Clear the response cache before running
    #[arg(short, long)]
    clear_cache: bool,

    /// Additional output format (default: plain rows on stdout)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    setup_logging(cli.verbose, cli.quiet, config.logging.file.as_deref())?;

    tracing::info!("Parser started");
    tracing::info!(?cli, "Command line arguments");

    let session = CachedSession::from_config(&config).context("Failed to open HTTP session")?;
    if cli.clear_cache {
        session.clear_cache().context("Failed to clear response cache")?;
    }

    let sink = Output::new(cli.output, &config.output);
    match run_pipeline(cli.mode, &session, &config, &sink).await {
        Ok(_) => {
            tracing::info!("Parser finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Mode {} failed: {}", cli.mode, e);
            Err(e).with_context(|| format!("Mode {} failed", cli.mode))
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr and, when configured, are appended to `log_file`.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&str>) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pydocs_harvest=info,warn"),
            1 => EnvFilter::new("pydocs_harvest=debug,info"),
            2 => EnvFilter::new("pydocs_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file_layer = match log_file {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}
