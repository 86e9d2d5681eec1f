use super::{distinct_authors, patterns, text};
use crate::types::feed::Commit;
use crate::types::insights::CollaborationSignals;

const REVIEW_TERMS: &[&str] = &["review", "merge", "pr", "pull request"];
const SHARING_TERMS: &[&str] = &["doc", "comment", "readme", "guide"];
const MENTORSHIP_TERMS: &[&str] = &["help", "guide", "example", "tutorial"];
const CONFLICT_TERMS: &[&str] = &["conflict", "merge", "resolve"];

pub fn collaboration_signals(commits: &[Commit]) -> CollaborationSignals {
    let volume = (commits.len() as f64 / 30.0).min(1.0) * 100.0;

    CollaborationSignals {
        code_review_participation: text::percent_matching(commits, REVIEW_TERMS),
        cross_team_contributions: (distinct_authors(commits) as f64 * 20.0).min(100.0),
        knowledge_sharing: text::percent_matching(commits, SHARING_TERMS),
        mentorship_activity: text::percent_matching(commits, MENTORSHIP_TERMS),
        communication_frequency: (patterns::message_quality(commits) + volume) / 2.0,
        conflict_resolution: text::percent_matching(commits, CONFLICT_TERMS),
    }
}
