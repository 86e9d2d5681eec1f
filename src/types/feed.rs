use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Github,
    Gitlab,
    Bitbucket,
    Azure,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Github => "github",
            Platform::Gitlab => "gitlab",
            Platform::Bitbucket => "bitbucket",
            Platform::Azure => "azure",
        };
        f.write_str(name)
    }
}

/// The timestamp keeps the offset it was authored with so hour-of-day and
/// day-of-week stay local to the commit.
#[derive(Debug, Clone)]
pub struct Commit {
    pub message: String,
    pub timestamp: DateTime<FixedOffset>,
    pub author: String,
}

#[derive(Debug, Clone)]
pub struct RepoSummary {
    pub name: String,
    pub platform: Platform,
    pub open_issues: u64,
    pub stars: u64,
    pub forks: u64,
    pub last_updated: DateTime<FixedOffset>,
    pub archived: bool,
}

#[derive(Debug, Clone)]
pub struct RepoSnapshot {
    pub summary: RepoSummary,
    pub commits: Vec<Commit>,
}
