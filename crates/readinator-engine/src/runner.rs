//! Check runner that executes a registry sequentially

use readinator_core::{
    CheckRegistry, CheckResult, NullProgressReporter, Outcome, ProgressReporter, ReadinatorError,
    Result, RunReport, Severity,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sequential check runner.
///
/// Checks execute one after another in registration order. A check's
/// failure never stops the run; its error is downgraded to a Fail or Warn
/// result according to the check's severity. The cancellation flag is
/// consulted between checks only, so an interrupted run never produces a
/// partial report.
pub struct Runner {
    progress: Arc<dyn ProgressReporter>,
    cancel: Arc<AtomicBool>,
}

impl Runner {
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NullProgressReporter),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the progress reporter
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Set the cancellation flag checked between checks
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run every registered check and return the report
    pub fn run(&self, registry: &CheckRegistry) -> Result<RunReport> {
        let started_at = chrono::Utc::now();
        let mut results = Vec::with_capacity(registry.len());

        info!("Running {} readiness checks", registry.len());

        for check in registry.checks() {
            if self.cancel.load(Ordering::SeqCst) {
                info!("Run interrupted after {} checks", results.len());
                return Err(ReadinatorError::Interrupted);
            }

            let definition = check.definition();
            debug!("Running check: {}", definition.id);
            self.progress.check_started(definition);

            let start = Instant::now();
            let (outcome, message) = match check.execute() {
                Ok(message) => (Outcome::Pass, message),
                Err(err) => {
                    let outcome = match definition.severity {
                        Severity::Critical => Outcome::Fail,
                        Severity::Advisory => Outcome::Warn,
                    };
                    warn!("Check {} did not pass: {}", definition.id, err);
                    (outcome, err.to_string())
                }
            };

            let result = CheckResult {
                id: definition.id.clone(),
                description: definition.description.clone(),
                category: definition.category,
                outcome,
                message,
                remediation: if outcome == Outcome::Pass {
                    None
                } else {
                    definition.remediation.clone()
                },
                elapsed: start.elapsed(),
            };

            self.progress.check_completed(&result);
            results.push(result);
        }

        let report = RunReport {
            started_at,
            finished_at: chrono::Utc::now(),
            results,
        };

        info!(
            "Run completed: {}/{} checks passed",
            report
                .results
                .iter()
                .filter(|r| r.outcome == Outcome::Pass)
                .count(),
            report.total()
        );

        Ok(report)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readinator_core::{CheckCategory, CheckDefinition, CheckError, RunnableCheck, Verdict};

    type ExecuteFn = Box<dyn Fn() -> std::result::Result<String, CheckError> + Send + Sync>;

    struct FnCheck {
        definition: CheckDefinition,
        execute: ExecuteFn,
    }

    impl FnCheck {
        fn boxed(
            id: &str,
            severity: Severity,
            execute: impl Fn() -> std::result::Result<String, CheckError> + Send + Sync + 'static,
        ) -> Box<dyn RunnableCheck> {
            Box::new(Self {
                definition: CheckDefinition::new(
                    id,
                    format!("check {}", id),
                    CheckCategory::Connectivity,
                    severity,
                ),
                execute: Box::new(execute),
            })
        }
    }

    impl RunnableCheck for FnCheck {
        fn definition(&self) -> &CheckDefinition {
            &self.definition
        }

        fn execute(&self) -> std::result::Result<String, CheckError> {
            (self.execute)()
        }
    }

    fn three_check_registry() -> CheckRegistry {
        let mut registry = CheckRegistry::new();
        registry
            .register(FnCheck::boxed("first", Severity::Critical, || {
                Ok("ok".to_string())
            }))
            .unwrap();
        registry
            .register(FnCheck::boxed("second", Severity::Critical, || {
                Err(CheckError::Connection("refused".to_string()))
            }))
            .unwrap();
        registry
            .register(FnCheck::boxed("third", Severity::Critical, || {
                Ok("ok".to_string())
            }))
            .unwrap();
        registry
    }

    #[test]
    fn failing_check_does_not_stop_the_run() {
        let report = Runner::new().run(&three_check_registry()).unwrap();

        assert_eq!(report.total(), 3);
        let ids: Vec<_> = report.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
        assert_eq!(report.results[0].outcome, Outcome::Pass);
        assert_eq!(report.results[1].outcome, Outcome::Fail);
        assert_eq!(report.results[2].outcome, Outcome::Pass);
    }

    #[test]
    fn severity_decides_fail_or_warn() {
        let mut registry = CheckRegistry::new();
        registry
            .register(FnCheck::boxed("critical", Severity::Critical, || {
                Err(CheckError::Assertion("wrong value".to_string()))
            }))
            .unwrap();
        registry
            .register(FnCheck::boxed("advisory", Severity::Advisory, || {
                Err(CheckError::Assertion("wrong value".to_string()))
            }))
            .unwrap();

        let report = Runner::new().run(&registry).unwrap();
        assert_eq!(report.results[0].outcome, Outcome::Fail);
        assert_eq!(report.results[1].outcome, Outcome::Warn);
    }

    #[test]
    fn timeout_renders_as_timed_out() {
        let mut registry = CheckRegistry::new();
        registry
            .register(FnCheck::boxed("slow", Severity::Critical, || {
                Err(CheckError::Timeout)
            }))
            .unwrap();

        let report = Runner::new().run(&registry).unwrap();
        assert_eq!(report.results[0].outcome, Outcome::Fail);
        assert_eq!(report.results[0].message, "timed out");
    }

    #[test]
    fn verdict_counts_match_registry_size() {
        let registry = three_check_registry();
        let report = Runner::new().run(&registry).unwrap();
        let verdict = Verdict::from_report(&report);

        assert_eq!(verdict.total, registry.len());
        assert_eq!(verdict.passed + verdict.warned + verdict.failed, verdict.total);
    }

    #[test]
    fn rerun_yields_same_outcomes() {
        let registry = three_check_registry();
        let runner = Runner::new();

        let first: Vec<_> = runner
            .run(&registry)
            .unwrap()
            .results
            .into_iter()
            .map(|r| (r.id, r.outcome))
            .collect();
        let second: Vec<_> = runner
            .run(&registry)
            .unwrap()
            .results
            .into_iter()
            .map(|r| (r.id, r.outcome))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn cancellation_flag_interrupts_without_report() {
        let cancel = Arc::new(AtomicBool::new(true));
        let runner = Runner::new().with_cancel_flag(cancel);

        let err = runner.run(&three_check_registry()).unwrap_err();
        assert!(matches!(err, ReadinatorError::Interrupted));
    }

    #[test]
    fn pass_results_carry_no_remediation() {
        let mut registry = CheckRegistry::new();
        registry
            .register(Box::new(FnCheck {
                definition: CheckDefinition::new(
                    "fixable",
                    "check fixable",
                    CheckCategory::Database,
                    Severity::Critical,
                )
                .with_remediation("run migrations"),
                execute: Box::new(|| Err(CheckError::MissingResource("table missing".to_string()))),
            }))
            .unwrap();
        registry
            .register(Box::new(FnCheck {
                definition: CheckDefinition::new(
                    "fine",
                    "check fine",
                    CheckCategory::Database,
                    Severity::Critical,
                )
                .with_remediation("never shown"),
                execute: Box::new(|| Ok("ok".to_string())),
            }))
            .unwrap();

        let report = Runner::new().run(&registry).unwrap();
        assert_eq!(
            report.results[0].remediation.as_deref(),
            Some("run migrations")
        );
        assert_eq!(report.results[1].remediation, None);
    }
}
