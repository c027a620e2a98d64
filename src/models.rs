use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Untyped embedded page state. Created per request and discarded afterwards.
pub type RawState = Value;

// ============ Difficulty Buckets ============

/// One of the four fixed problem difficulty categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Basic,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Label used by the upstream payload (`"Basic"`, `"Easy"`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Basic => "Basic",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A value for each difficulty bucket. Always serializes all four keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ByDifficulty<T> {
    pub basic: T,
    pub easy: T,
    pub medium: T,
    pub hard: T,
}

impl<T> ByDifficulty<T> {
    /// Builds a value per bucket from a function of the difficulty.
    pub fn from_fn(mut f: impl FnMut(Difficulty) -> T) -> Self {
        Self {
            basic: f(Difficulty::Basic),
            easy: f(Difficulty::Easy),
            medium: f(Difficulty::Medium),
            hard: f(Difficulty::Hard),
        }
    }
}

/// A solved problem with its canonical link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemLink {
    pub name: String,
    pub url: String,
}

pub type DifficultyCounts = ByDifficulty<u64>;
pub type ProblemsByDifficulty = ByDifficulty<Vec<ProblemLink>>;

// ============ Response Records ============

/// GET /api/basic-info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub fullname: Option<String>,
    pub qualification: Option<String>,
    pub joined_date: Option<String>,
}

/// GET /api/coding-stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodingStats {
    pub coding_score: Option<Number>,
    pub problems_solved: Option<Number>,
    pub contest_rating: Option<Number>,
    pub overall_rank: Option<Number>,
}

/// GET /api/difficulty-stats
///
/// `problems_by_difficulty` is only present when problem lists were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub solved_by_difficulty: DifficultyCounts,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub problems_by_difficulty: Option<ProblemsByDifficulty>,
}

/// GET /api/submission-data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionData {
    pub total_submissions: Option<Number>,
    pub monthly_problems_solved: Option<Number>,
    pub submissions_by_difficulty: ProblemsByDifficulty,
}

/// GET /api/institution-languages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstitutionLanguages {
    pub institution: Option<String>,
    pub languages_used: Vec<String>,
}

/// GET /api/streak
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakData {
    pub current_streak: Option<u32>,
    pub longest_streak: Option<Number>,
    pub monthly_score: Option<Number>,
}

/// `info` section of the complete profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub username: String,
    pub fullname: Option<String>,
    pub qualification: Option<String>,
    pub joined_date: Option<String>,
    pub institution: Option<String>,
    pub languages_used: Vec<String>,
}

/// `solved_stats` section of the complete profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedStats {
    pub coding_score: Option<Number>,
    pub problems_solved: Option<Number>,
    pub contest_rating: Option<Number>,
    pub overall_rank: Option<Number>,
    pub total_submissions: Option<Number>,
    pub monthly_score: Option<Number>,
    pub current_streak: Option<u32>,
    pub longest_streak: Option<Number>,
    pub difficulty_breakdown: DifficultyCounts,
    pub problems_by_difficulty: ProblemsByDifficulty,
}

/// GET /api/profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteProfile {
    pub info: ProfileInfo,
    pub solved_stats: SolvedStats,
}

// ============ Request Models ============

#[derive(Debug, Clone, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}
