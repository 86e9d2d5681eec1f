use crate::types::feed::Commit;

/// Case-insensitive substring search. Deliberately not word-boundary aware:
/// short needles like "key" or "pr" match inside larger words, and that
/// looseness is part of the scoring contract.
pub(crate) fn matches_any(message: &str, needles: &[&str]) -> bool {
    let lowered = message.to_lowercase();
    needles.iter().any(|needle| lowered.contains(needle))
}

pub(crate) fn count_matching(commits: &[Commit], needles: &[&str]) -> usize {
    commits
        .iter()
        .filter(|commit| matches_any(&commit.message, needles))
        .count()
}

/// `min((matches / max(total, 1)) * 100, 100)`, shared by every keyword score.
pub(crate) fn ratio_to_percent(matches: usize, total: usize) -> f64 {
    ((matches as f64 / total.max(1) as f64) * 100.0).min(100.0)
}

pub(crate) fn percent_matching(commits: &[Commit], needles: &[&str]) -> f64 {
    ratio_to_percent(count_matching(commits, needles), commits.len())
}
