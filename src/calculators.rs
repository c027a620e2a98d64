//! Values derived from the navigated page state: problem links, difficulty
//! aggregates and the current activity streak.

use crate::models::{Difficulty, DifficultyCounts, ProblemLink, ProblemsByDifficulty};
use crate::path::{is_truthy, Node};
use chrono::NaiveDate;
use serde_json::{Map, Value};

pub const PROBLEM_BASE_URL: &str = "https://www.geeksforgeeks.org/problems";

/// Canonical practice URL for a problem slug.
pub fn problem_url(slug: &str) -> String {
    format!("{}/{}/0", PROBLEM_BASE_URL, slug)
}

/// Builds links for every record in a bucket that carries both a display
/// name (`pname`) and a slug. Partial records are skipped.
pub fn problem_links(bucket: Node<'_>) -> Vec<ProblemLink> {
    bucket
        .children()
        .into_iter()
        .filter_map(|record| {
            let name = record.get("pname").as_text()?;
            let slug = record.get("slug").as_text()?;
            Some(ProblemLink {
                name: name.to_string(),
                url: problem_url(slug),
            })
        })
        .collect()
}

/// Entry count of each difficulty bucket, 0 when a bucket is missing.
pub fn difficulty_counts(submissions: Node<'_>) -> DifficultyCounts {
    DifficultyCounts::from_fn(|d| bucket(submissions, d).len().unwrap_or(0) as u64)
}

/// Filtered problem lists of each difficulty bucket.
pub fn problems_by_difficulty(submissions: Node<'_>) -> ProblemsByDifficulty {
    ProblemsByDifficulty::from_fn(|d| problem_links(bucket(submissions, d)))
}

fn bucket(submissions: Node<'_>, difficulty: Difficulty) -> Node<'_> {
    submissions.get(difficulty.label())
}

/// Number of consecutive active days counting back from the most recent
/// calendar entry. 0 when the most recent entry is inactive or the calendar
/// is empty.
///
/// Keys are ordered by their `%Y-%m-%d` date, most recent first; keys that do
/// not parse as dates sort after all real dates.
pub fn current_streak_len(calendar: &Map<String, Value>) -> u32 {
    let mut days: Vec<(Option<NaiveDate>, &str, &Value)> = calendar
        .iter()
        .map(|(key, active)| {
            let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok();
            (date, key.as_str(), active)
        })
        .collect();
    days.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));

    days.iter()
        .take_while(|(_, _, active)| is_truthy(active))
        .count() as u32
}

/// Current streak as reported by the API: absent rather than zero when there
/// is no ongoing streak.
pub fn current_streak(calendar: &Map<String, Value>) -> Option<u32> {
    Some(current_streak_len(calendar)).filter(|&n| n > 0)
}
