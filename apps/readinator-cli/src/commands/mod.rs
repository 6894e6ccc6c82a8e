//! CLI subcommands

pub mod checks;
pub mod connectivity;
pub mod verify;

use readinator_core::{
    CheckRegistry, Config, NullProgressReporter, ProgressReporter, ReadinatorError, Verdict,
};
use readinator_engine::{format_json, format_text, Runner};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Exit code used when the operator interrupts a run
pub const EXIT_INTERRUPTED: i32 = 130;

pub fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

/// Run a registry and render the report; returns the process exit code
pub fn execute(
    registry: &CheckRegistry,
    format: &str,
    cancel: Arc<AtomicBool>,
) -> anyhow::Result<i32> {
    let progress: Arc<dyn ProgressReporter> = if format == "json" {
        Arc::new(NullProgressReporter)
    } else {
        Arc::new(crate::progress::ConsoleProgress::new())
    };

    let runner = Runner::new()
        .with_progress(progress)
        .with_cancel_flag(cancel);

    match runner.run(registry) {
        Ok(report) => {
            match format {
                "json" => println!("{}", format_json(&report, true)?),
                _ => println!("\n{}", format_text(&report)),
            }
            Ok(Verdict::from_report(&report).exit_code())
        }
        Err(ReadinatorError::Interrupted) => {
            eprintln!("\nVerification interrupted by operator");
            Ok(EXIT_INTERRUPTED)
        }
        Err(e) => Err(e.into()),
    }
}
