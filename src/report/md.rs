use crate::types::insights::{CommitPatterns, DeveloperActivity, PulseReport, RepoInsights};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn to_markdown(report: &PulseReport) -> String {
    let mut output = String::new();
    output.push_str("# GitPulse Report\n\n");
    output.push_str(&format!(
        "Generated: {}\n\n",
        report.generated_at.to_rfc3339()
    ));

    output.push_str("## Overview\n\n");
    output.push_str(&format!(
        "- repositories analyzed: {}\n- repositories skipped: {}\n- developers: {}\n- average health: {:.1}\n- average technical debt: {:.1}\n- security alerts: {}\n\n",
        report.summary.repositories_analyzed,
        report.summary.repositories_skipped,
        report.summary.developer_count,
        report.summary.average_health,
        report.summary.average_debt,
        report.summary.security_alerts
    ));

    output.push_str("## Repositories\n\n");
    if report.repositories.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for repo in &report.repositories {
            push_repository(&mut output, repo);
        }
    }

    output.push_str("## Developers\n\n");
    if report.developers.is_empty() {
        output.push_str("- none\n");
    } else {
        for developer in &report.developers {
            output.push_str(&developer_line(developer));
        }
    }

    output.push_str("\n## Skipped\n\n");
    if report.skipped.is_empty() {
        output.push_str("- none\n");
    } else {
        for skipped in &report.skipped {
            output.push_str(&format!("- {}: {}\n", skipped.name, skipped.reason));
        }
    }

    output
}

pub fn developers_markdown(developers: &[DeveloperActivity]) -> String {
    let mut output = String::new();
    output.push_str("# GitPulse Developers\n\n");
    if developers.is_empty() {
        output.push_str("- none\n");
        return output;
    }
    for developer in developers {
        output.push_str(&developer_line(developer));
    }
    output
}

fn push_repository(output: &mut String, repo: &RepoInsights) {
    let badge = if repo.archived { ", archived" } else { "" };
    output.push_str(&format!("### {} ({}{})\n\n", repo.name, repo.platform, badge));

    let age = match repo.health.last_commit_age_days {
        Some(days) => format!("{days:.1} days"),
        None => "unknown".to_string(),
    };
    output.push_str(&format!(
        "- health: {:.1}, last commit age: {}, active developers (30d): {}\n",
        repo.health.health_score, age, repo.health.active_developers
    ));
    output.push_str(&format!(
        "- churn: {:.1}%, test coverage: {:.1}%, documentation: {:.1}%, debt: {:.1}%\n",
        repo.health.code_churn_rate,
        repo.health.test_coverage,
        repo.health.documentation_score,
        repo.health.technical_debt_score
    ));
    output.push_str(&format!(
        "- messages: quality {:.1}, average gap {:.1}h, bursty: {}, consistency {:.1}\n",
        repo.patterns.message_quality,
        repo.patterns.average_gap_hours,
        if repo.patterns.bursty { "yes" } else { "no" },
        repo.patterns.consistency
    ));
    if let Some((hour, day)) = peak_activity(&repo.patterns) {
        output.push_str(&format!(
            "- peak activity: {hour:02}:00 on {}\n",
            WEEKDAYS[day]
        ));
    }
    output.push_str(&format!(
        "- security: compliance {:.1}, vulnerability commits: {}, secrets flagged: {}, dependency risk: {:.1}%\n",
        repo.security.compliance_score,
        repo.security.vulnerability_commits,
        repo.security.secrets_exposed,
        repo.security.dependency_risk
    ));
    for pattern in &repo.security.suspicious_patterns {
        output.push_str(&format!("  - {pattern}\n"));
    }
    output.push_str(&format!(
        "- collaboration: review {:.1}, cross-team {:.1}, knowledge {:.1}, mentorship {:.1}, communication {:.1}, conflict {:.1}\n",
        repo.collaboration.code_review_participation,
        repo.collaboration.cross_team_contributions,
        repo.collaboration.knowledge_sharing,
        repo.collaboration.mentorship_activity,
        repo.collaboration.communication_frequency,
        repo.collaboration.conflict_resolution
    ));
    output.push_str(&format!(
        "- debt: complexity {:.1}, duplication {:.1}, unused {:.1}, test debt {:.1}, doc debt {:.1}, dependency commits: {}\n",
        repo.debt.code_complexity,
        repo.debt.duplicate_code,
        repo.debt.unused_code,
        repo.debt.test_debt,
        repo.debt.documentation_debt,
        repo.debt.outdated_dependencies
    ));
    output.push_str("- recommendations:\n");
    for opportunity in &repo.debt.refactoring_opportunities {
        output.push_str(&format!("  - {opportunity}\n"));
    }
    output.push('\n');
}

/// Earliest index wins ties; None when there are no commits at all.
fn peak_activity(patterns: &CommitPatterns) -> Option<(usize, usize)> {
    let total: u32 = patterns.hourly.iter().sum();
    if total == 0 {
        return None;
    }
    Some((argmax(&patterns.hourly), argmax(&patterns.weekly)))
}

fn argmax(buckets: &[u32]) -> usize {
    let mut best = 0;
    for (index, value) in buckets.iter().enumerate() {
        if *value > buckets[best] {
            best = index;
        }
    }
    best
}

fn developer_line(developer: &DeveloperActivity) -> String {
    format!(
        "- {}: {} commits, {:.2}/day, engagement {:.1} ({}), last active {}\n",
        developer.name,
        developer.total_commits,
        developer.commit_frequency,
        developer.engagement_score,
        engagement_label(developer.engagement_score),
        developer.last_activity.format("%Y-%m-%d")
    )
}

fn engagement_label(score: f64) -> &'static str {
    if score >= 80.0 {
        "high"
    } else if score >= 60.0 {
        "medium"
    } else {
        "low"
    }
}
