//! List registered checks without running them

use clap::Args;
use readinator_checks::{
    connectivity_suite, deployment_suite,
    probes::{EnvFileSettings, PostgresProbe, ReqwestHttpProbe},
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct ChecksArgs {
    /// Suite to list (connectivity, verify)
    #[arg(long, default_value = "verify")]
    suite: String,
}

pub fn run(args: ChecksArgs, config_path: Option<&PathBuf>) -> anyhow::Result<i32> {
    let config = super::load_config(config_path)?;
    let http = Arc::new(ReqwestHttpProbe::new(config.target.timeout())?);

    let registry = match args.suite.as_str() {
        "connectivity" => connectivity_suite(&config, http)?,
        _ => {
            let settings = Arc::new(EnvFileSettings::new(
                config.files.root.join(&config.settings.env_file),
            ));
            let database = Arc::new(PostgresProbe::new(
                config.database.url.clone().unwrap_or_default(),
                config.target.timeout(),
            ));
            deployment_suite(&config, http, database, settings)?
        }
    };

    println!(
        "{:<36} {:<9} {:<22} DESCRIPTION",
        "ID", "SEVERITY", "CATEGORY"
    );
    for check in registry.checks() {
        let definition = check.definition();
        println!(
            "{:<36} {:<9} {:<22} {}",
            definition.id,
            definition.severity.to_string(),
            definition.category.to_string(),
            definition.description
        );
    }

    Ok(0)
}
