use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::types::feed::Platform;

#[derive(Debug, Clone, Serialize)]
pub struct DeveloperActivity {
    pub name: String,
    pub total_commits: usize,
    pub last_activity: DateTime<FixedOffset>,
    pub commit_frequency: f64,
    pub engagement_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitPatterns {
    pub hourly: [u32; 24],
    pub weekly: [u32; 7],
    pub message_quality: f64,
    pub average_gap_hours: f64,
    pub bursty: bool,
    pub consistency: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryHealth {
    pub health_score: f64,
    /// None when the repository has no commits.
    pub last_commit_age_days: Option<f64>,
    pub active_developers: usize,
    pub code_churn_rate: f64,
    pub test_coverage: f64,
    pub documentation_score: f64,
    pub issue_resolution_days: f64,
    pub technical_debt_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityMetrics {
    pub suspicious_patterns: Vec<String>,
    pub vulnerability_commits: usize,
    pub secrets_exposed: usize,
    pub dependency_risk: f64,
    pub compliance_score: f64,
    pub last_scan: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollaborationSignals {
    pub code_review_participation: f64,
    pub cross_team_contributions: f64,
    pub knowledge_sharing: f64,
    pub mentorship_activity: f64,
    pub communication_frequency: f64,
    pub conflict_resolution: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalDebtMetrics {
    pub code_complexity: f64,
    pub duplicate_code: f64,
    pub outdated_dependencies: usize,
    pub unused_code: f64,
    pub test_debt: f64,
    pub documentation_debt: f64,
    pub refactoring_opportunities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoInsights {
    pub name: String,
    pub platform: Platform,
    pub archived: bool,
    pub patterns: CommitPatterns,
    pub health: RepositoryHealth,
    pub security: SecurityMetrics,
    pub collaboration: CollaborationSignals,
    pub debt: TechnicalDebtMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRepo {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PulseSummary {
    pub repositories_analyzed: usize,
    pub repositories_skipped: usize,
    pub developer_count: usize,
    pub average_health: f64,
    pub average_debt: f64,
    pub security_alerts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PulseReport {
    pub generated_at: DateTime<Utc>,
    pub summary: PulseSummary,
    pub repositories: Vec<RepoInsights>,
    pub developers: Vec<DeveloperActivity>,
    pub skipped: Vec<SkippedRepo>,
}
