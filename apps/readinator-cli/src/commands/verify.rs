//! Full pre-deployment verification command

use clap::Args;
use readinator_checks::{
    deployment_suite,
    probes::{EnvFileSettings, PostgresProbe, ReqwestHttpProbe},
};
use readinator_core::{Config, SettingsSource};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Args)]
pub struct VerifyArgs {
    /// Project root containing the deployment files
    #[arg(long)]
    root: Option<PathBuf>,

    /// Base URL of the backend under test
    #[arg(long)]
    base_url: Option<String>,

    /// Origin to present when probing CORS
    #[arg(long)]
    origin: Option<String>,

    /// Env file the verified application loads, relative to the root
    #[arg(long)]
    env_file: Option<String>,

    /// Database URL, overriding the application's DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    /// Per-check timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

pub fn run(
    args: VerifyArgs,
    config_path: Option<&PathBuf>,
    format: &str,
    cancel: Arc<AtomicBool>,
) -> anyhow::Result<i32> {
    let mut config = super::load_config(config_path)?;
    if let Some(root) = args.root {
        config.files.root = root;
    }
    if let Some(base_url) = args.base_url {
        config.target.base_url = base_url;
    }
    if let Some(origin) = args.origin {
        config.target.frontend_origin = origin;
    }
    if let Some(env_file) = args.env_file {
        config.settings.env_file = env_file;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = Some(database_url);
    }
    if let Some(timeout) = args.timeout {
        config.target.timeout_secs = timeout;
    }

    if format != "json" {
        println!("Pre-Deployment Verification");
        println!("===========================");
        println!("Target: {}", config.target.base_url);
        println!("Root:   {}", config.files.root.display());
    }

    let settings: Arc<dyn SettingsSource> = Arc::new(EnvFileSettings::new(
        config.files.root.join(&config.settings.env_file),
    ));
    let database_url = resolve_database_url(&config, settings.as_ref());

    let http = Arc::new(ReqwestHttpProbe::new(config.target.timeout())?);
    let database = Arc::new(PostgresProbe::new(database_url, config.target.timeout()));
    let registry = deployment_suite(&config, http, database, settings)?;

    super::execute(&registry, format, cancel)
}

/// Database URL precedence: explicit override, then the verified
/// application's own DATABASE_URL. An empty result makes each database
/// check fail with a configuration message instead of aborting the run.
fn resolve_database_url(config: &Config, settings: &dyn SettingsSource) -> String {
    config
        .database
        .url
        .clone()
        .or_else(|| settings.load().ok().map(|s| s.database_url))
        .unwrap_or_default()
}
