//! Console progress output: one line per check, grouped by category

use readinator_core::{CheckCategory, CheckDefinition, CheckResult, Outcome, ProgressReporter};
use std::sync::Mutex;

pub struct ConsoleProgress {
    current: Mutex<Option<CheckCategory>>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }
}

impl ProgressReporter for ConsoleProgress {
    fn check_started(&self, definition: &CheckDefinition) {
        let mut current = self.current.lock().unwrap();
        if *current != Some(definition.category) {
            println!("\n{}", "-".repeat(60));
            println!("  {}", definition.category);
            println!("{}", "-".repeat(60));
            *current = Some(definition.category);
        }
    }

    fn check_completed(&self, result: &CheckResult) {
        match result.outcome {
            Outcome::Pass => println!("  ✓ {}", result.description),
            Outcome::Warn => println!("  ⚠ {}: {}", result.description, result.message),
            Outcome::Fail => println!("  ✗ {}: {}", result.description, result.message),
        }
    }
}
