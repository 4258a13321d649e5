use chrono::Local;
use serde::Serialize;
use std::fmt;

/// The five platforms the updater knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Platform {
    Codeforces,
    LeetCode,
    CodeChef,
    AtCoder,
    Cses,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Platform::Codeforces => write!(f, "Codeforces"),
            Platform::LeetCode => write!(f, "LeetCode"),
            Platform::CodeChef => write!(f, "CodeChef"),
            Platform::AtCoder => write!(f, "AtCoder"),
            Platform::Cses => write!(f, "CSES"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatStatus {
    Active,
    Error,
}

/// Normalized per-platform statistics snapshot.
///
/// Every record carries the full field set regardless of platform or
/// outcome, so consumers never branch on missing keys. The LeetCode
/// difficulty breakdown and acceptance rate stay at their zero defaults
/// for the other platforms.
#[derive(Debug, Clone, Serialize)]
pub struct StatRecord {
    pub platform: Platform,
    pub username: String,
    pub status: StatStatus,
    pub rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub rank: Option<String>,
    pub problems_solved: u64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
    pub acceptance_rate: f64,
    pub last_updated: String,
}

impl StatRecord {
    /// Uniform failure record: placeholder values, `Error` status.
    pub fn error(platform: Platform, username: &str) -> Self {
        StatRecord {
            platform,
            username: username.to_string(),
            status: StatStatus::Error,
            rating: None,
            max_rating: None,
            rank: None,
            problems_solved: 0,
            easy_solved: 0,
            medium_solved: 0,
            hard_solved: 0,
            acceptance_rate: 0.0,
            last_updated: now_timestamp(),
        }
    }

    pub fn rating_label(&self) -> String {
        self.rating
            .map_or_else(|| String::from("N/A"), |rating| rating.to_string())
    }

    pub fn rank_label(&self) -> &str {
        self.rank.as_deref().unwrap_or("N/A")
    }
}

pub fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_record_defaults() {
        let record = StatRecord::error(Platform::AtCoder, "d_nex");
        assert_eq!(record.status, StatStatus::Error);
        assert_eq!(record.username, "d_nex");
        assert_eq!(record.rating_label(), "N/A");
        assert_eq!(record.rank_label(), "N/A");
        assert_eq!(record.max_rating, None);
        assert_eq!(record.problems_solved, 0);
        assert_eq!(record.easy_solved, 0);
        assert_eq!(record.medium_solved, 0);
        assert_eq!(record.hard_solved, 0);
        assert_eq!(record.acceptance_rate, 0.0);
        assert!(!record.last_updated.is_empty());
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::Cses.to_string(), "CSES");
        assert_eq!(Platform::LeetCode.to_string(), "LeetCode");
    }
}
