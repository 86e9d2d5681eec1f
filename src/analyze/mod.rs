pub mod activity;
pub mod collaboration;
pub mod debt;
pub mod health;
pub mod patterns;
pub mod security;
mod text;

use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashSet;

use crate::feed::{self, RawFeed};
use crate::types::feed::{Commit, RepoSnapshot};
use crate::types::insights::{
    DeveloperActivity, PulseReport, PulseSummary, RepoInsights, SkippedRepo,
};

pub(crate) const MS_PER_HOUR: f64 = 3_600_000.0;
pub(crate) const MS_PER_DAY: f64 = 86_400_000.0;

/// Negative when `earlier` is in the future.
pub(crate) fn days_since(now: DateTime<Utc>, earlier: DateTime<FixedOffset>) -> f64 {
    now.signed_duration_since(earlier).num_milliseconds() as f64 / MS_PER_DAY
}

/// Linear recency decay: 100 today, floored at 0 after 50 days.
pub(crate) fn recency_score(days: f64) -> f64 {
    (100.0 - days * 2.0).clamp(0.0, 100.0)
}

pub(crate) fn distinct_authors(commits: &[Commit]) -> usize {
    commits
        .iter()
        .map(|commit| commit.author.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    pub limit: Option<usize>,
    pub skip_archived: bool,
}

pub fn analyze_repo(snapshot: &RepoSnapshot, now: DateTime<Utc>) -> RepoInsights {
    RepoInsights {
        name: snapshot.summary.name.clone(),
        platform: snapshot.summary.platform,
        archived: snapshot.summary.archived,
        patterns: patterns::commit_patterns(&snapshot.commits),
        health: health::repository_health(&snapshot.summary, &snapshot.commits, now),
        security: security::security_metrics(&snapshot.commits),
        collaboration: collaboration::collaboration_signals(&snapshot.commits),
        debt: debt::technical_debt(&snapshot.commits),
    }
}

/// Archived repositories are filtered before they count against the limit;
/// a repository that fails validation consumes its slot but never aborts
/// siblings.
pub fn validated_snapshots(
    feed: &RawFeed,
    options: &AnalyzeOptions,
) -> (Vec<RepoSnapshot>, Vec<SkippedRepo>) {
    let limit = options.limit.unwrap_or(usize::MAX);
    let mut snapshots = Vec::new();
    let mut skipped = Vec::new();
    let mut selected = 0usize;

    for raw in &feed.repositories {
        if selected == limit {
            break;
        }
        if options.skip_archived && raw.archived {
            tracing::debug!("ignoring archived repository {}", raw.name);
            continue;
        }
        selected += 1;
        match feed::validate_repo(raw) {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(err) => {
                tracing::warn!("skipping {}: {}", raw.name, err);
                skipped.push(SkippedRepo {
                    name: raw.name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    (snapshots, skipped)
}

pub fn analyze_feed(feed: &RawFeed, options: &AnalyzeOptions, now: DateTime<Utc>) -> PulseReport {
    let (snapshots, skipped) = validated_snapshots(feed, options);

    let repositories: Vec<RepoInsights> = snapshots
        .iter()
        .map(|snapshot| analyze_repo(snapshot, now))
        .collect();

    let all_commits: Vec<Commit> = snapshots
        .iter()
        .flat_map(|snapshot| snapshot.commits.iter().cloned())
        .collect();
    let developers = activity::developer_activity(&all_commits, now);

    let summary = summarize(&repositories, &developers, &skipped);
    PulseReport {
        generated_at: now,
        summary,
        repositories,
        developers,
        skipped,
    }
}

fn summarize(
    repositories: &[RepoInsights],
    developers: &[DeveloperActivity],
    skipped: &[SkippedRepo],
) -> PulseSummary {
    let analyzed = repositories.len();
    let average = |total: f64| if analyzed == 0 { 0.0 } else { total / analyzed as f64 };

    PulseSummary {
        repositories_analyzed: analyzed,
        repositories_skipped: skipped.len(),
        developer_count: developers.len(),
        average_health: average(
            repositories
                .iter()
                .map(|repo| repo.health.health_score)
                .sum(),
        ),
        average_debt: average(
            repositories
                .iter()
                .map(|repo| repo.health.technical_debt_score)
                .sum(),
        ),
        security_alerts: repositories
            .iter()
            .map(|repo| repo.security.suspicious_patterns.len())
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0)
            .single()
            .expect("now should construct")
    }

    fn feed(json: &str) -> RawFeed {
        serde_json::from_str(json).expect("feed should parse")
    }

    #[test]
    fn recency_decays_linearly_and_clamps() {
        assert_eq!(recency_score(0.0), 100.0);
        assert_eq!(recency_score(10.0), 80.0);
        assert_eq!(recency_score(50.0), 0.0);
        assert_eq!(recency_score(400.0), 0.0);
        assert_eq!(recency_score(-3.0), 100.0);
    }

    #[test]
    fn days_since_crosses_offsets() {
        let now = fixed_now();
        let earlier = DateTime::parse_from_rfc3339("2024-03-09T22:00:00+02:00")
            .expect("timestamp should parse");
        // 20:00 UTC the previous day is four hours before now.
        assert!((days_since(now, earlier) - 4.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn one_bad_repository_does_not_abort_the_batch() {
        let feed = feed(
            r#"{"repositories": [
                {"name": "good", "platform": "github", "last_updated": "2024-03-01T12:00:00Z",
                 "commits": [{"id": "c1", "message": "feat: x", "timestamp": "2024-03-01T10:00:00Z", "author": "alice"}]},
                {"name": "bad", "platform": "github", "last_updated": "2024-03-01T12:00:00Z",
                 "commits": [{"id": "c2", "author": "bob"}]},
                {"name": "also-good", "platform": "gitlab", "last_updated": "2024-03-02T12:00:00Z"}
            ]}"#,
        );

        let (snapshots, skipped) = validated_snapshots(&feed, &AnalyzeOptions::default());
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].summary.name, "good");
        assert_eq!(snapshots[1].summary.name, "also-good");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].name, "bad");
        assert!(skipped[0].reason.contains("missing message"));
    }

    #[test]
    fn limit_caps_intake_in_feed_order() {
        let feed = feed(
            r#"{"repositories": [
                {"name": "one", "platform": "github", "last_updated": "2024-03-01T12:00:00Z"},
                {"name": "two", "platform": "github", "last_updated": "2024-03-01T12:00:00Z"},
                {"name": "three", "platform": "github", "last_updated": "2024-03-01T12:00:00Z"}
            ]}"#,
        );

        let options = AnalyzeOptions {
            limit: Some(2),
            skip_archived: false,
        };
        let (snapshots, skipped) = validated_snapshots(&feed, &options);
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].summary.name, "two");
        assert!(skipped.is_empty());
    }

    #[test]
    fn failed_repository_consumes_its_limit_slot() {
        let feed = feed(
            r#"{"repositories": [
                {"name": "bad", "platform": "github", "last_updated": "nonsense"},
                {"name": "good", "platform": "github", "last_updated": "2024-03-01T12:00:00Z"}
            ]}"#,
        );

        let options = AnalyzeOptions {
            limit: Some(1),
            skip_archived: false,
        };
        let (snapshots, skipped) = validated_snapshots(&feed, &options);
        assert!(snapshots.is_empty());
        assert_eq!(skipped.len(), 1);
    }

    #[test]
    fn archived_repositories_are_filtered_not_failed() {
        let feed = feed(
            r#"{"repositories": [
                {"name": "frozen", "platform": "github", "last_updated": "2024-03-01T12:00:00Z", "archived": true},
                {"name": "live", "platform": "github", "last_updated": "2024-03-01T12:00:00Z"}
            ]}"#,
        );

        let options = AnalyzeOptions {
            limit: Some(1),
            skip_archived: true,
        };
        let (snapshots, skipped) = validated_snapshots(&feed, &options);
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].summary.name, "live");
        assert!(skipped.is_empty());
    }

    #[test]
    fn report_summary_averages_health_and_debt() {
        let feed = feed(
            r#"{"repositories": [
                {"name": "busy", "platform": "github", "open_issues": 0, "last_updated": "2024-03-09T00:00:00Z",
                 "commits": [
                    {"id": "c1", "message": "fix: crash", "timestamp": "2024-03-08T10:00:00Z", "author": "alice"},
                    {"id": "c2", "message": "feat: page", "timestamp": "2024-03-08T11:00:00Z", "author": "bob"}
                 ]},
                {"name": "quiet", "platform": "gitlab", "open_issues": 0, "last_updated": "2024-03-09T00:00:00Z"}
            ]}"#,
        );

        let report = analyze_feed(&feed, &AnalyzeOptions::default(), fixed_now());
        assert_eq!(report.summary.repositories_analyzed, 2);
        assert_eq!(report.summary.repositories_skipped, 0);
        assert_eq!(report.summary.developer_count, 2);

        let expected_health = (report.repositories[0].health.health_score
            + report.repositories[1].health.health_score)
            / 2.0;
        assert!((report.summary.average_health - expected_health).abs() < 1e-9);

        // One of two commits in "busy" mentions fix: 50% debt there, 0 in "quiet".
        assert!((report.summary.average_debt - 25.0).abs() < 1e-9);
        assert_eq!(report.summary.security_alerts, 0);
    }

    #[test]
    fn developers_group_across_repositories() {
        let feed = feed(
            r#"{"repositories": [
                {"name": "one", "platform": "github", "last_updated": "2024-03-09T00:00:00Z",
                 "commits": [{"id": "a1", "message": "feat: x", "timestamp": "2024-03-08T10:00:00Z", "author": "alice"}]},
                {"name": "two", "platform": "github", "last_updated": "2024-03-09T00:00:00Z",
                 "commits": [{"id": "a2", "message": "feat: y", "timestamp": "2024-03-09T10:00:00Z", "author": "alice"}]}
            ]}"#,
        );

        let report = analyze_feed(&feed, &AnalyzeOptions::default(), fixed_now());
        assert_eq!(report.developers.len(), 1);
        assert_eq!(report.developers[0].name, "alice");
        assert_eq!(report.developers[0].total_commits, 2);
    }

    #[test]
    fn repeated_analysis_yields_identical_records() {
        let feed = feed(
            r#"{"repositories": [
                {"name": "alpha", "platform": "github", "open_issues": 3, "stars": 8, "forks": 2,
                 "last_updated": "2024-03-09T00:00:00Z",
                 "commits": [
                    {"id": "c1", "message": "fix: rotate leaked password", "timestamp": "2024-03-08T10:00:00Z", "author": "alice"},
                    {"id": "c2", "message": "Merge review of docs guide", "timestamp": "2024-03-08T11:00:00Z", "author": "bob"},
                    {"id": "c3", "message": "refactor: extract feed module", "timestamp": "2024-03-08T12:00:00Z", "author": "alice"}
                 ]}
            ]}"#,
        );
        let (snapshots, _) = validated_snapshots(&feed, &AnalyzeOptions::default());
        let now = fixed_now();

        let first = analyze_repo(&snapshots[0], now);
        let mut second = analyze_repo(&snapshots[0], now);
        // last_scan is wall clock by contract; align it before comparing.
        second.security.last_scan = first.security.last_scan;

        let first_json = serde_json::to_string(&first).expect("insights should serialize");
        let second_json = serde_json::to_string(&second).expect("insights should serialize");
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn empty_feed_produces_an_empty_report() {
        let feed = feed(r#"{"repositories": []}"#);
        let report = analyze_feed(&feed, &AnalyzeOptions::default(), fixed_now());
        assert_eq!(report.summary.repositories_analyzed, 0);
        assert_eq!(report.summary.average_health, 0.0);
        assert!(report.repositories.is_empty());
        assert!(report.developers.is_empty());
        assert!(report.skipped.is_empty());
    }
}
