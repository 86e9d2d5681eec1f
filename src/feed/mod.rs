use crate::error::{PulseError, Result};
use crate::types::feed::{Commit, Platform, RepoSnapshot, RepoSummary};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::path::Path;

/// Commit timestamps and messages stay raw here so a malformed value fails
/// validation for its own repository instead of failing the whole parse.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeed {
    pub repositories: Vec<RawRepo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub name: String,
    pub platform: Platform,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    pub last_updated: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub commits: Vec<RawCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    pub id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub author: String,
}

pub fn load_feed(path: &Path) -> Result<RawFeed> {
    if !path.exists() {
        return Err(PulseError::FeedNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let feed: RawFeed = serde_json::from_str(&content)?;
    Ok(feed)
}

/// Any malformed field rejects the whole repository.
pub fn validate_repo(raw: &RawRepo) -> Result<RepoSnapshot> {
    let last_updated = parse_timestamp(&raw.name, "last_updated", &raw.last_updated)?;

    let mut commits = Vec::with_capacity(raw.commits.len());
    for commit in &raw.commits {
        let message = commit.message.clone().ok_or_else(|| {
            PulseError::data(&raw.name, format!("commit {}: missing message", commit.id))
        })?;
        let raw_timestamp = commit.timestamp.as_deref().ok_or_else(|| {
            PulseError::data(&raw.name, format!("commit {}: missing timestamp", commit.id))
        })?;
        let timestamp =
            parse_timestamp(&raw.name, &format!("commit {}", commit.id), raw_timestamp)?;
        commits.push(Commit {
            message,
            timestamp,
            author: commit.author.clone(),
        });
    }

    Ok(RepoSnapshot {
        summary: RepoSummary {
            name: raw.name.clone(),
            platform: raw.platform,
            open_issues: raw.open_issues,
            stars: raw.stars,
            forks: raw.forks,
            last_updated,
            archived: raw.archived,
        },
        commits,
    })
}

fn parse_timestamp(repo: &str, field: &str, value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).map_err(|e| {
        PulseError::data(repo, format!("{field}: unparsable timestamp {value:?}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn raw_repo(json: &str) -> RawRepo {
        serde_json::from_str(json).expect("raw repo should parse")
    }

    #[test]
    fn load_feed_rejects_missing_file() {
        let err = load_feed(Path::new("/nonexistent/feed.json")).expect_err("load should fail");
        assert!(matches!(err, PulseError::FeedNotFound(_)));
    }

    #[test]
    fn load_feed_parses_document() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("feed.json");
        std::fs::write(
            &path,
            r#"{"repositories":[{"name":"alpha","platform":"github","last_updated":"2024-03-01T12:00:00Z"}]}"#,
        )
        .expect("feed should write");

        let feed = load_feed(&path).expect("feed should load");
        assert_eq!(feed.repositories.len(), 1);
        assert_eq!(feed.repositories[0].name, "alpha");
        assert!(feed.repositories[0].commits.is_empty());
        assert!(!feed.repositories[0].archived);
    }

    #[test]
    fn load_feed_rejects_invalid_json() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("feed.json");
        std::fs::write(&path, "{not json").expect("feed should write");

        let err = load_feed(&path).expect_err("load should fail");
        assert!(matches!(err, PulseError::Json(_)));
    }

    #[test]
    fn validate_repo_builds_snapshot() {
        let raw = raw_repo(
            r#"{
                "name": "alpha",
                "platform": "gitlab",
                "open_issues": 4,
                "stars": 12,
                "forks": 3,
                "last_updated": "2024-03-01T12:00:00Z",
                "commits": [
                    {"id": "c1", "message": "fix: parser", "timestamp": "2024-02-28T10:00:00+02:00", "author": "alice"}
                ]
            }"#,
        );

        let snapshot = validate_repo(&raw).expect("repo should validate");
        assert_eq!(snapshot.summary.name, "alpha");
        assert_eq!(snapshot.summary.platform, Platform::Gitlab);
        assert_eq!(snapshot.summary.open_issues, 4);
        assert_eq!(snapshot.commits.len(), 1);
        assert_eq!(snapshot.commits[0].author, "alice");
        assert_eq!(snapshot.commits[0].timestamp.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn validate_repo_rejects_missing_commit_timestamp() {
        let raw = raw_repo(
            r#"{
                "name": "alpha",
                "platform": "github",
                "last_updated": "2024-03-01T12:00:00Z",
                "commits": [{"id": "c9", "message": "feat: add", "author": "alice"}]
            }"#,
        );

        let err = validate_repo(&raw).expect_err("validation should fail");
        assert!(err.to_string().contains("alpha"));
        assert!(err.to_string().contains("commit c9"));
        assert!(err.to_string().contains("missing timestamp"));
    }

    #[test]
    fn validate_repo_rejects_unparsable_commit_timestamp() {
        let raw = raw_repo(
            r#"{
                "name": "alpha",
                "platform": "github",
                "last_updated": "2024-03-01T12:00:00Z",
                "commits": [{"id": "c9", "message": "feat: add", "timestamp": "yesterday", "author": "alice"}]
            }"#,
        );

        let err = validate_repo(&raw).expect_err("validation should fail");
        assert!(matches!(err, PulseError::Data { .. }));
        assert!(err.to_string().contains("unparsable timestamp"));
    }

    #[test]
    fn validate_repo_rejects_missing_message() {
        let raw = raw_repo(
            r#"{
                "name": "alpha",
                "platform": "github",
                "last_updated": "2024-03-01T12:00:00Z",
                "commits": [{"id": "c2", "timestamp": "2024-02-28T10:00:00Z", "author": "bob"}]
            }"#,
        );

        let err = validate_repo(&raw).expect_err("validation should fail");
        assert!(err.to_string().contains("commit c2: missing message"));
    }

    #[test]
    fn validate_repo_rejects_unparsable_last_updated() {
        let raw = raw_repo(
            r#"{"name": "alpha", "platform": "github", "last_updated": "not a date"}"#,
        );

        let err = validate_repo(&raw).expect_err("validation should fail");
        assert!(err.to_string().contains("last_updated"));
    }
}
