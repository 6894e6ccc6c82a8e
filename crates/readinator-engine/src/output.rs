//! Output formatting for run reports

use readinator_core::{ReadinessTier, Result, RunReport, Verdict};

/// Format a run report as text
pub fn format_text(report: &RunReport) -> String {
    let verdict = Verdict::from_report(report);
    let mut output = String::new();

    output.push_str(&format!("Verification Summary\n{}\n\n", "=".repeat(20)));

    let duration = report.finished_at - report.started_at;
    output.push_str(&format!(
        "Checks: {}/{} passed ({:.1}%)\n",
        verdict.passed, verdict.total, verdict.percentage
    ));
    output.push_str(&format!(
        "Duration: {}.{:03}s\n\n",
        duration.num_seconds(),
        duration.num_milliseconds().rem_euclid(1000)
    ));

    let warnings: Vec<_> = report.warnings().collect();
    if !warnings.is_empty() {
        output.push_str(&format!("Warnings ({})\n{}\n", warnings.len(), "-".repeat(12)));
        for result in &warnings {
            output.push_str(&format!("  [{}] {}: {}\n", result.id, result.description, result.message));
        }
        output.push('\n');
    }

    let issues: Vec<_> = report.issues().collect();
    if !issues.is_empty() {
        output.push_str(&format!("Issues ({})\n{}\n", issues.len(), "-".repeat(10)));
        for result in &issues {
            output.push_str(&format!("  [{}] {}: {}\n", result.id, result.description, result.message));
        }
        output.push('\n');
    }

    // Distinct remediation hints for everything that did not pass
    let mut fixes: Vec<&str> = Vec::new();
    for result in report.results.iter() {
        if let Some(remediation) = result.remediation.as_deref() {
            if !fixes.contains(&remediation) {
                fixes.push(remediation);
            }
        }
    }
    if !fixes.is_empty() {
        output.push_str(&format!("Suggested fixes\n{}\n", "-".repeat(15)));
        for (i, fix) in fixes.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, fix));
        }
        output.push('\n');
    }

    output.push_str(match verdict.tier {
        ReadinessTier::AllPass => "ALL CHECKS PASSED - ready for deployment\n",
        ReadinessTier::MostlyReady => "MOSTLY READY - fix warnings before deployment\n",
        ReadinessTier::NotReady => "NOT READY - fix critical issues first\n",
    });

    output
}

/// Format a run report (with its verdict) as JSON
pub fn format_json(report: &RunReport, pretty: bool) -> Result<String> {
    let verdict = Verdict::from_report(report);
    let value = serde_json::json!({
        "report": report,
        "verdict": verdict,
    });

    if pretty {
        serde_json::to_string_pretty(&value).map_err(Into::into)
    } else {
        serde_json::to_string(&value).map_err(Into::into)
    }
}
