use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::{days_since, recency_score, MS_PER_DAY};
use crate::types::feed::Commit;
use crate::types::insights::DeveloperActivity;

/// The slice may span repositories; the display name is the only identity
/// available, so equal names collapse into one developer.
pub fn developer_activity(commits: &[Commit], now: DateTime<Utc>) -> Vec<DeveloperActivity> {
    let mut groups: BTreeMap<&str, Vec<&Commit>> = BTreeMap::new();
    for commit in commits {
        groups.entry(commit.author.as_str()).or_default().push(commit);
    }

    let mut developers: Vec<DeveloperActivity> = groups
        .into_iter()
        .map(|(author, group)| {
            let total_commits = group.len();
            let mut first = group[0].timestamp;
            let mut last = group[0].timestamp;
            for commit in group.iter().skip(1) {
                if commit.timestamp < first {
                    first = commit.timestamp;
                }
                if commit.timestamp > last {
                    last = commit.timestamp;
                }
            }

            // A single commit has no span to average over.
            let commit_frequency = if total_commits < 2 {
                0.0
            } else {
                let span_days =
                    last.signed_duration_since(first).num_milliseconds() as f64 / MS_PER_DAY;
                total_commits as f64 / span_days.max(1.0)
            };

            let recency = recency_score(days_since(now, last));
            let volume = (total_commits as f64 / 50.0).min(1.0) * 100.0;

            DeveloperActivity {
                name: author.to_string(),
                total_commits,
                last_activity: last,
                commit_frequency,
                engagement_score: (recency + volume) / 2.0,
            }
        })
        .collect();

    developers.sort_by(|a, b| {
        b.total_commits
            .cmp(&a.total_commits)
            .then_with(|| a.name.cmp(&b.name))
    });
    developers
}
