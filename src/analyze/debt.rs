use super::text;
use crate::types::feed::Commit;
use crate::types::insights::TechnicalDebtMetrics;

const COMPLEXITY_TERMS: &[&str] = &["refactor", "simplify", "cleanup"];
const DUPLICATE_TERMS: &[&str] = &["duplicate", "dry", "reuse"];
const OUTDATED_TERMS: &[&str] = &["update", "upgrade", "dependency"];
const UNUSED_TERMS: &[&str] = &["remove", "cleanup", "unused"];
const DOC_TERMS: &[&str] = &["doc", "readme", "comment"];

pub fn technical_debt(commits: &[Commit]) -> TechnicalDebtMetrics {
    TechnicalDebtMetrics {
        code_complexity: text::percent_matching(commits, COMPLEXITY_TERMS),
        duplicate_code: text::percent_matching(commits, DUPLICATE_TERMS),
        outdated_dependencies: text::count_matching(commits, OUTDATED_TERMS),
        unused_code: text::percent_matching(commits, UNUSED_TERMS),
        test_debt: 100.0 - text::percent_matching(commits, &["test"]),
        documentation_debt: 100.0 - text::percent_matching(commits, DOC_TERMS),
        refactoring_opportunities: refactoring_opportunities(commits),
    }
}

/// Advisories evaluated in fixed order against commit-message ratios.
/// Comparisons are strict, so a ratio exactly at a boundary does not fire.
fn refactoring_opportunities(commits: &[Commit]) -> Vec<String> {
    let total = commits.len() as f64;
    let fixes = text::count_matching(commits, &["fix"]) as f64;
    let refactors = text::count_matching(commits, &["refactor"]) as f64;
    let tests = text::count_matching(commits, &["test"]) as f64;
    let docs = text::count_matching(commits, &["doc"]) as f64;

    let mut opportunities = Vec::new();
    if fixes > total * 0.3 {
        opportunities
            .push("High bug fix ratio suggests code quality improvements needed".to_string());
    }
    if refactors < total * 0.1 {
        opportunities
            .push("Low refactoring activity - consider code structure improvements".to_string());
    }
    if tests < total * 0.2 {
        opportunities.push("Insufficient test coverage - add missing unit tests".to_string());
    }
    if docs < total * 0.1 {
        opportunities.push(
            "Poor documentation coverage - improve code comments and documentation".to_string(),
        );
    }

    if opportunities.is_empty() {
        opportunities.push("Code appears well-maintained".to_string());
    }
    opportunities
}
