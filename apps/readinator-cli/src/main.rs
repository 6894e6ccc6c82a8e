//! readinator CLI
//!
//! Verifies that a deployment is ready: files on disk, backend reachable
//! and healthy, CORS and security headers configured, database migrated
//! and seeded.

mod commands;
mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// readinator - deployment readiness verification
#[derive(Parser)]
#[command(name = "readinator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Smoke-test connectivity of a running backend
    Connectivity(commands::connectivity::ConnectivityArgs),

    /// Run the full pre-deployment verification
    Verify(commands::verify::VerifyArgs),

    /// List registered checks without running them
    Checks(commands::checks::ChecksArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; diagnostics go to stderr so they never mix with
    // the check output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.store(true, Ordering::SeqCst))?;
    }

    let code = match cli.command {
        Commands::Connectivity(args) => {
            commands::connectivity::run(args, cli.config.as_ref(), &cli.format, cancel)?
        }
        Commands::Verify(args) => {
            commands::verify::run(args, cli.config.as_ref(), &cli.format, cancel)?
        }
        Commands::Checks(args) => commands::checks::run(args, cli.config.as_ref())?,
    };

    std::process::exit(code);
}
