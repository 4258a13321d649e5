use crate::config::PROFILES;
use crate::modules::extractors::{
    atcoder::AtCoderExtractor, codechef::CodeChefExtractor, codeforces::CodeforcesExtractor,
    cses::CsesExtractor, leetcode::LeetCodeExtractor, PlatformExtractor,
};
use crate::types::stats::{Platform, StatRecord};
use std::collections::BTreeMap;

/// Runs every configured extractor in turn and collects the results.
///
/// One entry per platform, always: an extractor that fails internally
/// already reports the uniform error record, so collection never aborts
/// half-way.
pub struct StatsAggregator {
    extractors: Vec<Box<dyn PlatformExtractor + Send + Sync>>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        let mut extractors: Vec<Box<dyn PlatformExtractor + Send + Sync>> = Vec::new();

        for (platform, profile) in PROFILES.iter() {
            match platform {
                Platform::Codeforces => {
                    extractors.push(Box::new(CodeforcesExtractor::new(&profile.username)))
                }
                Platform::LeetCode => {
                    extractors.push(Box::new(LeetCodeExtractor::new(&profile.username)))
                }
                Platform::CodeChef => {
                    extractors.push(Box::new(CodeChefExtractor::new(&profile.username)))
                }
                Platform::AtCoder => {
                    extractors.push(Box::new(AtCoderExtractor::new(&profile.username)))
                }
                Platform::Cses => extractors.push(Box::new(CsesExtractor::new(&profile.username))),
            }
        }

        StatsAggregator { extractors }
    }

    pub fn with_extractors(extractors: Vec<Box<dyn PlatformExtractor + Send + Sync>>) -> Self {
        StatsAggregator { extractors }
    }

    pub async fn collect_stats(&self) -> BTreeMap<Platform, StatRecord> {
        let mut stats = BTreeMap::new();

        for extractor in self.extractors.iter() {
            tracing::info!(
                "collecting {} stats for {}",
                extractor.platform(),
                extractor.username()
            );
            let record = extractor.get_stats().await;
            tracing::info!("{} stats collected: {:?}", extractor.platform(), record);
            stats.insert(extractor.platform(), record);
        }

        stats
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::extractors::{ExtractError, Result};
    use crate::types::stats::{now_timestamp, StatStatus};
    use async_trait::async_trait;

    struct FixedExtractor {
        platform: Platform,
        solved: u64,
    }

    struct BrokenExtractor {
        platform: Platform,
    }

    #[async_trait]
    impl PlatformExtractor for FixedExtractor {
        fn platform(&self) -> Platform {
            self.platform
        }

        fn username(&self) -> &str {
            "someone"
        }

        async fn try_get_stats(&self) -> Result<StatRecord> {
            Ok(StatRecord {
                platform: self.platform,
                username: String::from("someone"),
                status: StatStatus::Active,
                rating: Some(1500),
                max_rating: Some(1600),
                rank: Some(String::from("specialist")),
                problems_solved: self.solved,
                easy_solved: 0,
                medium_solved: 0,
                hard_solved: 0,
                acceptance_rate: 0.0,
                last_updated: now_timestamp(),
            })
        }
    }

    #[async_trait]
    impl PlatformExtractor for BrokenExtractor {
        fn platform(&self) -> Platform {
            self.platform
        }

        fn username(&self) -> &str {
            "someone"
        }

        async fn try_get_stats(&self) -> Result<StatRecord> {
            Err(ExtractError::Api(String::from("simulated outage")))
        }
    }

    #[tokio::test]
    async fn test_one_failure_never_blocks_the_others() {
        let aggregator = StatsAggregator::with_extractors(vec![
            Box::new(FixedExtractor {
                platform: Platform::Codeforces,
                solved: 12,
            }),
            Box::new(BrokenExtractor {
                platform: Platform::LeetCode,
            }),
            Box::new(FixedExtractor {
                platform: Platform::CodeChef,
                solved: 3,
            }),
            Box::new(BrokenExtractor {
                platform: Platform::AtCoder,
            }),
            Box::new(FixedExtractor {
                platform: Platform::Cses,
                solved: 7,
            }),
        ]);

        let stats = aggregator.collect_stats().await;
        assert_eq!(stats.len(), 5);

        assert_eq!(stats[&Platform::Codeforces].status, StatStatus::Active);
        assert_eq!(stats[&Platform::Codeforces].problems_solved, 12);

        let failed = &stats[&Platform::LeetCode];
        assert_eq!(failed.status, StatStatus::Error);
        assert_eq!(failed.rating, None);
        assert_eq!(failed.problems_solved, 0);

        assert_eq!(stats[&Platform::AtCoder].status, StatStatus::Error);
        assert_eq!(stats[&Platform::Cses].problems_solved, 7);
    }

    #[test]
    fn test_default_aggregator_covers_every_platform() {
        let aggregator = StatsAggregator::new();
        assert_eq!(aggregator.extractors.len(), 5);
    }
}
