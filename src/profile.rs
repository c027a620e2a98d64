//! Assembles API response shapes from one extraction of a profile page.

use crate::errors::AppError;
use crate::extractor;
use crate::fetcher::PageFetcher;
use crate::models::*;
use crate::navigators;
use std::sync::Arc;

/// All navigator and calculator output for one fetched page. Every response
/// shape is a projection of this.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSnapshot {
    pub user_info: UserInfo,
    pub coding_stats: CodingStats,
    pub submissions: SubmissionData,
    pub difficulty: DifficultyStats,
    pub institution_languages: InstitutionLanguages,
    pub streak: StreakData,
}

impl ProfileSnapshot {
    pub fn from_state(state: &RawState, username: &str) -> Self {
        Self {
            user_info: navigators::user_info(state, username),
            coding_stats: navigators::coding_stats(state),
            submissions: navigators::submission_data(state),
            difficulty: navigators::difficulty_stats(state, true),
            institution_languages: navigators::institution_languages(state),
            streak: navigators::streak(state),
        }
    }

    pub fn complete_profile(self) -> CompleteProfile {
        let Self {
            user_info,
            coding_stats,
            submissions,
            difficulty,
            institution_languages,
            streak,
        } = self;

        CompleteProfile {
            info: ProfileInfo {
                username: user_info.username,
                fullname: user_info.fullname,
                qualification: user_info.qualification,
                joined_date: user_info.joined_date,
                institution: institution_languages.institution,
                languages_used: institution_languages.languages_used,
            },
            solved_stats: SolvedStats {
                coding_score: coding_stats.coding_score,
                problems_solved: coding_stats.problems_solved,
                contest_rating: coding_stats.contest_rating,
                overall_rank: coding_stats.overall_rank,
                total_submissions: submissions.total_submissions,
                monthly_score: streak.monthly_score,
                current_streak: streak.current_streak,
                longest_streak: streak.longest_streak,
                difficulty_breakdown: difficulty.solved_by_difficulty,
                problems_by_difficulty: difficulty.problems_by_difficulty.unwrap_or_default(),
            },
        }
    }

    /// Difficulty counts without the problem lists.
    pub fn difficulty_summary(self) -> DifficultyStats {
        DifficultyStats {
            solved_by_difficulty: self.difficulty.solved_by_difficulty,
            problems_by_difficulty: None,
        }
    }
}

/// Runs the fetch-extract-navigate pipeline for each API shape.
///
/// Exactly one upstream fetch happens per call; failures are returned as-is.
#[derive(Clone)]
pub struct ProfileService {
    fetcher: Arc<dyn PageFetcher>,
}

impl ProfileService {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches and extracts one snapshot of `username`'s profile.
    pub async fn snapshot(&self, username: &str) -> Result<ProfileSnapshot, AppError> {
        let markup = self.fetcher.fetch(username).await?;
        let state = extractor::extract(&markup, username)?;
        Ok(ProfileSnapshot::from_state(&state, username))
    }

    pub async fn complete_profile(&self, username: &str) -> Result<CompleteProfile, AppError> {
        Ok(self.snapshot(username).await?.complete_profile())
    }

    pub async fn basic_info(&self, username: &str) -> Result<UserInfo, AppError> {
        Ok(self.snapshot(username).await?.user_info)
    }

    pub async fn coding_stats(&self, username: &str) -> Result<CodingStats, AppError> {
        Ok(self.snapshot(username).await?.coding_stats)
    }

    pub async fn submission_data(&self, username: &str) -> Result<SubmissionData, AppError> {
        Ok(self.snapshot(username).await?.submissions)
    }

    pub async fn difficulty_stats(&self, username: &str) -> Result<DifficultyStats, AppError> {
        Ok(self.snapshot(username).await?.difficulty_summary())
    }

    pub async fn institution_languages(
        &self,
        username: &str,
    ) -> Result<InstitutionLanguages, AppError> {
        Ok(self.snapshot(username).await?.institution_languages)
    }

    pub async fn streak(&self, username: &str) -> Result<StreakData, AppError> {
        Ok(self.snapshot(username).await?.streak)
    }
}
