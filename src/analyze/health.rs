use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use super::{days_since, distinct_authors, recency_score, text};
use crate::types::feed::{Commit, RepoSummary};
use crate::types::insights::RepositoryHealth;

const CHURN_TERMS: &[&str] = &["fix", "bug"];
const TEST_TERMS: &[&str] = &["test", "spec", "coverage"];
const DOC_TERMS: &[&str] = &["doc", "readme", "comment"];
const DEBT_TERMS: &[&str] = &["fix", "bug", "hotfix"];

pub fn repository_health(
    summary: &RepoSummary,
    commits: &[Commit],
    now: DateTime<Utc>,
) -> RepositoryHealth {
    let last_commit_age_days = commits
        .iter()
        .map(|commit| commit.timestamp)
        .max()
        .map(|latest| days_since(now, latest).max(0.0));

    let cutoff = now - Duration::days(30);
    let mut active = HashSet::new();
    for commit in commits {
        if commit.timestamp > cutoff {
            active.insert(commit.author.as_str());
        }
    }

    let activity = (commits.len() as f64 / 10.0).min(1.0) * 30.0;
    let recency = recency_score(days_since(now, summary.last_updated)) * 0.3;
    let diversity = (distinct_authors(commits) as f64 * 10.0).min(30.0);
    let issue_penalty = (40.0 - summary.open_issues as f64).max(0.0);
    let health_score = (activity + recency + diversity + issue_penalty).min(100.0);

    let issue_resolution_days = if summary.open_issues == 0 {
        0.0
    } else {
        // Feed values are unbounded; sum in floats so the add cannot overflow.
        let audience = (summary.stars as f64 + summary.forks as f64).max(1.0);
        ((summary.open_issues as f64 / audience) * 10.0).min(30.0)
    };

    RepositoryHealth {
        health_score,
        last_commit_age_days,
        active_developers: active.len(),
        code_churn_rate: text::percent_matching(commits, CHURN_TERMS),
        test_coverage: text::percent_matching(commits, TEST_TERMS),
        documentation_score: text::percent_matching(commits, DOC_TERMS),
        issue_resolution_days,
        technical_debt_score: text::percent_matching(commits, DEBT_TERMS),
    }
}
