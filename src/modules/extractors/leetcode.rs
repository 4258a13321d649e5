use crate::modules::extractors::{ExtractError, PlatformExtractor, Result};
use crate::types::stats::{now_timestamp, Platform, StatRecord, StatStatus};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use tokio::time::Duration;

const USER_PROFILE_QUERY: &str = r#"
query userProfile($username: String!) {
  matchedUser(username: $username) {
    username
    submitStats: submitStatsGlobal {
      acSubmissionNum {
        difficulty
        count
        submissions
      }
    }
    profile {
      ranking
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct LcResponse {
    #[serde(default)]
    data: Option<LcData>,
    #[serde(default)]
    errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LcData {
    matched_user: Option<LcUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LcUser {
    submit_stats: LcSubmitStats,
    profile: LcProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LcSubmitStats {
    ac_submission_num: Vec<LcDifficultyCount>,
}

#[derive(Debug, Deserialize)]
struct LcDifficultyCount {
    difficulty: String,
    count: u64,
    submissions: u64,
}

#[derive(Debug, Deserialize)]
struct LcProfile {
    ranking: Option<i64>,
}

#[derive(Debug, Default, PartialEq)]
struct SolvedSummary {
    total: u64,
    easy: u64,
    medium: u64,
    hard: u64,
    acceptance_rate: f64,
}

pub struct LeetCodeExtractor {
    username: String,
    graphql_url: Url,
    client: Client,
}

impl LeetCodeExtractor {
    pub fn new(username: &str) -> Self {
        LeetCodeExtractor {
            username: username.to_string(),
            graphql_url: Url::parse("https://leetcode.com/graphql").unwrap(),
            client: Client::builder()
                .gzip(true)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }

    async fn fetch_user(&self) -> Result<LcUser> {
        let body = json!({
            "query": USER_PROFILE_QUERY,
            "variables": {"username": self.username},
        });

        let res = self
            .client
            .post(self.graphql_url.clone())
            .json(&body)
            .send()
            .await?;
        let response: LcResponse = res.error_for_status()?.json().await?;

        if let Some(errors) = response.errors {
            if !errors.is_empty() {
                return Err(ExtractError::Api(format!(
                    "graphql errors: {}",
                    serde_json::Value::Array(errors)
                )));
            }
        }

        response
            .data
            .and_then(|data| data.matched_user)
            .ok_or_else(|| {
                ExtractError::Api(format!("user {} not found on LeetCode", self.username))
            })
    }
}

/// Flatten the per-difficulty accepted-submission buckets. Buckets absent
/// from the response stay at 0; the acceptance rate comes from the "All"
/// bucket alone, one decimal place.
fn summarize(buckets: &[LcDifficultyCount]) -> SolvedSummary {
    let mut summary = SolvedSummary::default();
    let mut all_submissions = 0;

    for bucket in buckets {
        match bucket.difficulty.as_str() {
            "All" => {
                summary.total = bucket.count;
                all_submissions += bucket.submissions;
            }
            "Easy" => summary.easy = bucket.count,
            "Medium" => summary.medium = bucket.count,
            "Hard" => summary.hard = bucket.count,
            _ => {}
        }
    }

    if all_submissions > 0 {
        summary.acceptance_rate =
            ((summary.total as f64 / all_submissions as f64) * 1000.0).round() / 10.0;
    }

    summary
}

#[async_trait]
impl PlatformExtractor for LeetCodeExtractor {
    fn platform(&self) -> Platform {
        Platform::LeetCode
    }

    fn username(&self) -> &str {
        &self.username
    }

    async fn try_get_stats(&self) -> Result<StatRecord> {
        let user = self.fetch_user().await?;
        let summary = summarize(&user.submit_stats.ac_submission_num);

        // LeetCode has no contest-style rating; the rating slot carries the
        // total solved count, and a ranking of 0 means unranked.
        Ok(StatRecord {
            platform: Platform::LeetCode,
            username: self.username.clone(),
            status: StatStatus::Active,
            rating: Some(summary.total as i64),
            max_rating: None,
            rank: user
                .profile
                .ranking
                .filter(|ranking| *ranking != 0)
                .map(|ranking| ranking.to_string()),
            problems_solved: summary.total,
            easy_solved: summary.easy,
            medium_solved: summary.medium,
            hard_solved: summary.hard,
            acceptance_rate: summary.acceptance_rate,
            last_updated: now_timestamp(),
        })
    }
}
