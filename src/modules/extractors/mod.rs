pub mod atcoder;
pub mod codechef;
pub mod codeforces;
pub mod cses;
pub mod leetcode;

use crate::types::stats::{Platform, StatRecord};
use async_trait::async_trait;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shared extractor contract; one implementation per platform.
///
/// `get_stats` never fails: every internal error collapses to the uniform
/// `Error`-status record, so a broken platform can't block the others.
#[async_trait]
pub trait PlatformExtractor {
    fn platform(&self) -> Platform;

    fn username(&self) -> &str;

    /// Fetch and normalize the user's statistics; errors are absorbed
    /// by `get_stats`.
    async fn try_get_stats(&self) -> Result<StatRecord>;

    async fn get_stats(&self) -> StatRecord {
        match self.try_get_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(
                    "failed to extract {} stats for {}: {}",
                    self.platform(),
                    self.username(),
                    e
                );
                StatRecord::error(self.platform(), self.username())
            }
        }
    }
}
