use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::MS_PER_HOUR;
use crate::types::feed::Commit;
use crate::types::insights::CommitPatterns;

static CONVENTIONAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(fix|feat|chore|docs|style|refactor|test|perf|ci|build)(\(.+\))?:")
        .expect("conventional commit pattern should compile")
});

/// Hour and weekday buckets use each commit's own offset; weekday 0 is
/// Sunday.
pub fn commit_patterns(commits: &[Commit]) -> CommitPatterns {
    if commits.is_empty() {
        return CommitPatterns {
            hourly: [0; 24],
            weekly: [0; 7],
            message_quality: 0.0,
            average_gap_hours: 0.0,
            bursty: false,
            consistency: 0.0,
        };
    }

    let mut hourly = [0u32; 24];
    let mut weekly = [0u32; 7];
    for commit in commits {
        hourly[commit.timestamp.hour() as usize] += 1;
        weekly[commit.timestamp.weekday().num_days_from_sunday() as usize] += 1;
    }

    let mut sorted: Vec<DateTime<FixedOffset>> =
        commits.iter().map(|commit| commit.timestamp).collect();
    sorted.sort();

    CommitPatterns {
        hourly,
        weekly,
        message_quality: message_quality(commits),
        average_gap_hours: average_gap_hours(&sorted),
        bursty: detect_bursts(&sorted),
        consistency: consistency_score(commits),
    }
}

/// The collaboration communication metric reuses this scale.
pub(crate) fn message_quality(commits: &[Commit]) -> f64 {
    if commits.is_empty() {
        return 0.0;
    }
    let total: f64 = commits
        .iter()
        .map(|commit| message_score(&commit.message))
        .sum();
    total / commits.len() as f64
}

fn message_score(message: &str) -> f64 {
    let mut score = 0.0;

    let length = message.chars().count();
    if length > 10 && length < 100 {
        score += 25.0;
    }
    if starts_uppercase(message) {
        score += 25.0;
    }
    if !message.ends_with('.') {
        score += 25.0;
    }
    let conventional = CONVENTIONAL_PREFIX.is_match(&message.to_lowercase());
    if conventional || message.split_whitespace().count() > 2 {
        score += 25.0;
    }

    score
}

fn starts_uppercase(message: &str) -> bool {
    message
        .chars()
        .next()
        .map(|first| first.is_uppercase())
        .unwrap_or(false)
}

fn average_gap_hours(sorted: &[DateTime<FixedOffset>]) -> f64 {
    if sorted.len() < 2 {
        return 0.0;
    }
    let total_ms: i64 = sorted
        .windows(2)
        .map(|pair| pair[1].signed_duration_since(pair[0]).num_milliseconds())
        .sum();
    total_ms as f64 / (sorted.len() - 1) as f64 / MS_PER_HOUR
}

fn detect_bursts(sorted: &[DateTime<FixedOffset>]) -> bool {
    if sorted.len() < 3 {
        return false;
    }
    let rapid = sorted
        .windows(2)
        .filter(|pair| pair[1].signed_duration_since(pair[0]) < Duration::hours(1))
        .count();
    rapid as f64 > sorted.len() as f64 * 0.3
}

/// Quiet days are not represented in the per-day counts.
fn consistency_score(commits: &[Commit]) -> f64 {
    if commits.len() < 7 {
        return 0.0;
    }

    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for commit in commits {
        *per_day.entry(commit.timestamp.date_naive()).or_default() += 1;
    }

    let counts: Vec<f64> = per_day.values().map(|&count| count as f64).collect();
    let mean = counts.iter().sum::<f64>() / counts.len() as f64;
    let variance =
        counts.iter().map(|count| (count - mean).powi(2)).sum::<f64>() / counts.len() as f64;

    (100.0 - variance * 10.0).max(0.0)
}
