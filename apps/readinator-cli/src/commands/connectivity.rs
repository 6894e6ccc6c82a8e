//! Connectivity smoke-test command

use clap::Args;
use readinator_checks::{connectivity_suite, probes::ReqwestHttpProbe};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Args)]
pub struct ConnectivityArgs {
    /// Base URL of the backend under test
    #[arg(long)]
    base_url: Option<String>,

    /// Origin to present when probing CORS
    #[arg(long)]
    origin: Option<String>,

    /// Per-check timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

pub fn run(
    args: ConnectivityArgs,
    config_path: Option<&PathBuf>,
    format: &str,
    cancel: Arc<AtomicBool>,
) -> anyhow::Result<i32> {
    let mut config = super::load_config(config_path)?;
    if let Some(base_url) = args.base_url {
        config.target.base_url = base_url;
    }
    if let Some(origin) = args.origin {
        config.target.frontend_origin = origin;
    }
    if let Some(timeout) = args.timeout {
        config.target.timeout_secs = timeout;
    }

    if format != "json" {
        println!("Backend Connectivity Test");
        println!("=========================");
        println!("Target: {}", config.target.base_url);
    }

    let http = Arc::new(ReqwestHttpProbe::new(config.target.timeout())?);
    let registry = connectivity_suite(&config, http)?;

    super::execute(&registry, format, cancel)
}
