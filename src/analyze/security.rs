use chrono::Utc;

use super::text;
use crate::types::feed::Commit;
use crate::types::insights::SecurityMetrics;

const SECRET_TERMS: &[&str] = &["password", "secret", "key", "token"];
const BYPASS_TERMS: &[&str] = &["bypass", "disable security", "skip validation"];
const WORKAROUND_TERMS: &[&str] = &["hack", "workaround", "quick fix"];
const VULNERABILITY_TERMS: &[&str] = &["security", "vulnerability", "exploit", "patch", "cve"];
const DEPENDENCY_TERMS: &[&str] = &["dependency", "package", "update", "upgrade"];

const SECRETS_LABEL: &str = "Potential secrets in commit messages";
const BYPASS_LABEL: &str = "Security bypass attempts";
const WORKAROUND_LABEL: &str = "Potentially risky workarounds";

/// Compliance drops ten points per distinct family that fired, regardless
/// of how many commits fired it.
pub fn security_metrics(commits: &[Commit]) -> SecurityMetrics {
    let mut suspicious_patterns: Vec<String> = Vec::new();
    let mut secrets_exposed = 0usize;

    for commit in commits {
        if text::matches_any(&commit.message, SECRET_TERMS) {
            push_label(&mut suspicious_patterns, SECRETS_LABEL);
            secrets_exposed += 1;
        }
        if text::matches_any(&commit.message, BYPASS_TERMS) {
            push_label(&mut suspicious_patterns, BYPASS_LABEL);
        }
        if text::matches_any(&commit.message, WORKAROUND_TERMS) {
            push_label(&mut suspicious_patterns, WORKAROUND_LABEL);
        }
    }

    let compliance_score = (100.0 - 10.0 * suspicious_patterns.len() as f64).max(0.0);

    SecurityMetrics {
        suspicious_patterns,
        vulnerability_commits: text::count_matching(commits, VULNERABILITY_TERMS),
        secrets_exposed,
        dependency_risk: text::percent_matching(commits, DEPENDENCY_TERMS),
        compliance_score,
        last_scan: Utc::now(),
    }
}

/// One entry per family, in first-trigger order.
fn push_label(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|existing| existing == label) {
        labels.push(label.to_string());
    }
}
