//! Report types for check results and run verdicts

use crate::traits::CheckCategory;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Condition verified
    Pass,
    /// Advisory condition not met
    Warn,
    /// Critical condition not met
    Fail,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Pass => write!(f, "pass"),
            Outcome::Warn => write!(f, "warn"),
            Outcome::Fail => write!(f, "fail"),
        }
    }
}

/// Result of one executed check. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check id, unique within the run
    pub id: String,

    /// Human-readable description of the verified condition
    pub description: String,

    /// Category the check belongs to
    pub category: CheckCategory,

    /// Classified outcome
    pub outcome: Outcome,

    /// Pass message or failure diagnostic
    pub message: String,

    /// Remediation guidance, when the check did not pass
    pub remediation: Option<String>,

    /// Wall-clock time spent executing the check
    pub elapsed: Duration,
}

/// Complete results of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run started
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// When the run finished
    pub finished_at: chrono::DateTime<chrono::Utc>,

    /// Results in registration order
    pub results: Vec<CheckResult>,
}

impl RunReport {
    /// Results with outcome Fail
    pub fn issues(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.outcome == Outcome::Fail)
    }

    /// Results with outcome Warn
    pub fn warnings(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.outcome == Outcome::Warn)
    }

    /// Total number of executed checks
    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Readiness tier derived from the pass percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessTier {
    /// Every check passed
    AllPass,
    /// At least 80% passed
    MostlyReady,
    /// Below 80% passed
    NotReady,
}

impl ReadinessTier {
    /// Map a pass percentage to a tier
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            ReadinessTier::AllPass
        } else if percentage >= 80.0 {
            ReadinessTier::MostlyReady
        } else {
            ReadinessTier::NotReady
        }
    }
}

/// Aggregated verdict over one run. Pure function of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
    pub total: usize,
    pub percentage: f64,
    pub tier: ReadinessTier,
}

impl Verdict {
    /// Summarize a run report
    pub fn from_report(report: &RunReport) -> Self {
        let mut passed = 0;
        let mut warned = 0;
        let mut failed = 0;

        for result in &report.results {
            match result.outcome {
                Outcome::Pass => passed += 1,
                Outcome::Warn => warned += 1,
                Outcome::Fail => failed += 1,
            }
        }

        let total = report.results.len();
        let percentage = if total == 0 {
            100.0
        } else {
            passed as f64 / total as f64 * 100.0
        };

        Self {
            passed,
            warned,
            failed,
            total,
            percentage,
            tier: ReadinessTier::from_percentage(percentage),
        }
    }

    /// Process exit code communicating the verdict
    pub fn exit_code(&self) -> i32 {
        match self.tier {
            ReadinessTier::AllPass => 0,
            ReadinessTier::MostlyReady => 1,
            ReadinessTier::NotReady => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, outcome: Outcome) -> CheckResult {
        CheckResult {
            id: id.to_string(),
            description: format!("check {}", id),
            category: CheckCategory::Connectivity,
            outcome,
            message: String::new(),
            remediation: None,
            elapsed: Duration::from_millis(1),
        }
    }

    fn report(results: Vec<CheckResult>) -> RunReport {
        let now = chrono::Utc::now();
        RunReport {
            started_at: now,
            finished_at: now,
            results,
        }
    }

    #[test]
    fn counts_sum_to_total() {
        let report = report(vec![
            result("a", Outcome::Pass),
            result("b", Outcome::Warn),
            result("c", Outcome::Fail),
            result("d", Outcome::Pass),
        ]);
        let verdict = Verdict::from_report(&report);

        assert_eq!(verdict.total, 4);
        assert_eq!(verdict.passed + verdict.warned + verdict.failed, verdict.total);
        assert_eq!(verdict.passed, 2);
        assert_eq!(verdict.warned, 1);
        assert_eq!(verdict.failed, 1);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(ReadinessTier::from_percentage(100.0), ReadinessTier::AllPass);
        assert_eq!(ReadinessTier::from_percentage(99.9), ReadinessTier::MostlyReady);
        assert_eq!(ReadinessTier::from_percentage(80.0), ReadinessTier::MostlyReady);
        assert_eq!(ReadinessTier::from_percentage(79.9), ReadinessTier::NotReady);
        assert_eq!(ReadinessTier::from_percentage(0.0), ReadinessTier::NotReady);
    }

    #[test]
    fn all_pass_requires_every_check() {
        let all = report(vec![result("a", Outcome::Pass), result("b", Outcome::Pass)]);
        assert_eq!(Verdict::from_report(&all).tier, ReadinessTier::AllPass);

        let four_of_five = report(vec![
            result("a", Outcome::Pass),
            result("b", Outcome::Pass),
            result("c", Outcome::Pass),
            result("d", Outcome::Pass),
            result("e", Outcome::Fail),
        ]);
        let verdict = Verdict::from_report(&four_of_five);
        assert_eq!(verdict.percentage, 80.0);
        assert_eq!(verdict.tier, ReadinessTier::MostlyReady);
    }

    #[test]
    fn empty_report_is_all_pass() {
        let verdict = Verdict::from_report(&report(Vec::new()));
        assert_eq!(verdict.percentage, 100.0);
        assert_eq!(verdict.tier, ReadinessTier::AllPass);
        assert_eq!(verdict.exit_code(), 0);
    }

    #[test]
    fn exit_codes_follow_tier() {
        let not_ready = report(vec![result("a", Outcome::Fail)]);
        assert_eq!(Verdict::from_report(&not_ready).exit_code(), 2);

        let mostly = report(vec![
            result("a", Outcome::Pass),
            result("b", Outcome::Pass),
            result("c", Outcome::Pass),
            result("d", Outcome::Pass),
            result("e", Outcome::Warn),
        ]);
        assert_eq!(Verdict::from_report(&mostly).exit_code(), 1);
    }

    #[test]
    fn partitions_by_outcome() {
        let report = report(vec![
            result("a", Outcome::Pass),
            result("b", Outcome::Warn),
            result("c", Outcome::Fail),
        ]);
        let issues: Vec<_> = report.issues().map(|r| r.id.as_str()).collect();
        let warnings: Vec<_> = report.warnings().map(|r| r.id.as_str()).collect();
        assert_eq!(issues, vec!["c"]);
        assert_eq!(warnings, vec!["b"]);
    }
}
