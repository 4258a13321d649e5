use crate::modules::extractors::{ExtractError, PlatformExtractor, Result};
use crate::types::stats::{now_timestamp, Platform, StatRecord, StatStatus};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashSet;
use tokio::time::Duration;

/// Codeforces exposes a JSON API; every response is wrapped in a
/// status/result envelope.
#[derive(Debug, Deserialize)]
struct CfEnvelope<T> {
    status: String,
    result: Option<T>,
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfUserInfo {
    rating: Option<i64>,
    max_rating: Option<i64>,
    rank: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CfSubmission {
    #[serde(default)]
    verdict: Option<String>,
    problem: CfProblemRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfProblemRef {
    #[serde(default)]
    contest_id: Option<i64>,
    index: String,
}

pub struct CodeforcesExtractor {
    username: String,
    info_url: Url,
    status_url: Url,
    client: Client,
}

impl CodeforcesExtractor {
    pub fn new(username: &str) -> Self {
        CodeforcesExtractor {
            username: username.to_string(),
            info_url: Url::parse(&format!(
                "https://codeforces.com/api/user.info?handles={}",
                username
            ))
            .unwrap(),
            // Bounded to the most recent 1000 submissions.
            status_url: Url::parse(&format!(
                "https://codeforces.com/api/user.status?handle={}&from=1&count=1000",
                username
            ))
            .unwrap(),
            client: Client::builder()
                .gzip(true)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }

    async fn fetch_user_info(&self) -> Result<CfUserInfo> {
        let res = self.client.get(self.info_url.clone()).send().await?;
        let envelope: CfEnvelope<Vec<CfUserInfo>> = res.error_for_status()?.json().await?;

        if envelope.status != "OK" {
            return Err(ExtractError::Api(format!(
                "user.info returned status {}: {}",
                envelope.status,
                envelope.comment.unwrap_or_default()
            )));
        }

        envelope
            .result
            .and_then(|mut users| {
                if users.is_empty() {
                    None
                } else {
                    Some(users.swap_remove(0))
                }
            })
            .ok_or_else(|| ExtractError::Parse(String::from("user.info result is empty")))
    }

    /// Count of distinct accepted (contest, index) pairs; a non-"OK"
    /// submissions response degrades to 0 rather than failing the record.
    async fn count_solved(&self) -> Result<u64> {
        let res = self.client.get(self.status_url.clone()).send().await?;
        let envelope: CfEnvelope<Vec<CfSubmission>> = res.error_for_status()?.json().await?;

        if envelope.status != "OK" {
            tracing::warn!(
                "user.status returned status {}: {}",
                envelope.status,
                envelope.comment.unwrap_or_default()
            );
            return Ok(0);
        }

        Ok(count_distinct_solved(
            &envelope.result.unwrap_or_default(),
        ))
    }
}

fn count_distinct_solved(submissions: &[CfSubmission]) -> u64 {
    let solved: HashSet<(Option<i64>, &str)> = submissions
        .iter()
        .filter(|submission| submission.verdict.as_deref() == Some("OK"))
        .map(|submission| {
            (
                submission.problem.contest_id,
                submission.problem.index.as_str(),
            )
        })
        .collect();

    solved.len() as u64
}

#[async_trait]
impl PlatformExtractor for CodeforcesExtractor {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    fn username(&self) -> &str {
        &self.username
    }

    async fn try_get_stats(&self) -> Result<StatRecord> {
        let user = self.fetch_user_info().await?;
        let problems_solved = self.count_solved().await?;

        Ok(StatRecord {
            platform: Platform::Codeforces,
            username: self.username.clone(),
            status: StatStatus::Active,
            // A user who hasn't finished a rated contest yet has no rating
            // fields at all; report them as 0, not as a failure.
            rating: Some(user.rating.unwrap_or(0)),
            max_rating: Some(user.max_rating.unwrap_or(0)),
            rank: Some(user.rank.unwrap_or_else(|| String::from("Unrated"))),
            problems_solved,
            easy_solved: 0,
            medium_solved: 0,
            hard_solved: 0,
            acceptance_rate: 0.0,
            last_updated: now_timestamp(),
        })
    }
}
