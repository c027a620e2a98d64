//! Pure functions pulling typed records out of the embedded page state.
//!
//! Every field is read independently: a missing or malformed branch leaves
//! that field absent and never affects its siblings.

use crate::calculators;
use crate::models::{
    CodingStats, DifficultyStats, InstitutionLanguages, RawState, StreakData, SubmissionData,
    UserInfo,
};
use crate::path::Node;

fn page_props(state: &RawState) -> Node<'_> {
    Node::new(state).path(&["props", "pageProps"])
}

fn user_node(state: &RawState) -> Node<'_> {
    page_props(state).get("userInfo")
}

fn submissions_node(state: &RawState) -> Node<'_> {
    page_props(state).get("userSubmissionsInfo")
}

pub fn user_info(state: &RawState, username: &str) -> UserInfo {
    let user = user_node(state);
    UserInfo {
        username: username.to_string(),
        fullname: user.get("name").as_str().map(str::to_string),
        qualification: user.get("institute_name").as_str().map(str::to_string),
        joined_date: user.get("created_date").as_str().map(str::to_string),
    }
}

pub fn coding_stats(state: &RawState) -> CodingStats {
    let user = user_node(state);
    let contest = page_props(state).get("contestData");
    CodingStats {
        coding_score: user.get("score").as_count(),
        problems_solved: user.get("total_problems_solved").as_count(),
        contest_rating: contest
            .path(&["user_contest_data", "current_rating"])
            .as_count(),
        overall_rank: contest.get("user_global_rank").as_count(),
    }
}

pub fn submission_data(state: &RawState) -> SubmissionData {
    let user = user_node(state);
    SubmissionData {
        total_submissions: user.get("total_problems_solved").as_count(),
        monthly_problems_solved: user.get("monthly_score").as_count(),
        submissions_by_difficulty: calculators::problems_by_difficulty(submissions_node(state)),
    }
}

pub fn difficulty_stats(state: &RawState, include_problems: bool) -> DifficultyStats {
    let submissions = submissions_node(state);
    DifficultyStats {
        solved_by_difficulty: calculators::difficulty_counts(submissions),
        problems_by_difficulty: include_problems
            .then(|| calculators::problems_by_difficulty(submissions)),
    }
}

pub fn institution_languages(state: &RawState) -> InstitutionLanguages {
    let languages_used = page_props(state)
        .get("languages")
        .as_str()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|lang| !lang.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    InstitutionLanguages {
        institution: user_node(state)
            .get("institute_name")
            .as_str()
            .map(str::to_string),
        languages_used,
    }
}

pub fn streak(state: &RawState) -> StreakData {
    let user = user_node(state);
    let calendar = page_props(state).path(&["heatMapData", "result"]);
    StreakData {
        current_streak: calendar.as_object().and_then(calculators::current_streak),
        longest_streak: user.get("pod_solved_longest_streak").as_count(),
        monthly_score: user.get("monthly_score").as_count(),
    }
}
