use crate::config;
use crate::modules::extractors::{ExtractError, PlatformExtractor, Result};
use crate::types::stats::{now_timestamp, Platform, StatRecord, StatStatus};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use tokio::time::Duration;

static SCRAPER: Lazy<ProfilePageScraper> = Lazy::new(ProfilePageScraper::new);

struct ProfilePageScraper {
    rating: Selector,
    stars: Selector,
    problems: Selector,
}

#[derive(Debug, PartialEq)]
struct ProfileDigest {
    rating: Option<i64>,
    rank: String,
    problems_solved: u64,
}

impl ProfilePageScraper {
    fn new() -> Self {
        let rating = Selector::parse(".rating-number").unwrap();
        let stars = Selector::parse(".rating-star").unwrap();
        let problems = Selector::parse(".problems-solved").unwrap();

        Self {
            rating,
            stars,
            problems,
        }
    }

    /// Missing elements degrade individually; a rating element whose text
    /// isn't an integer fails the whole extraction.
    fn extract_profile(&self, html: &str) -> Result<ProfileDigest> {
        let html = Html::parse_document(html);

        let rating = match html.select(&self.rating).next() {
            Some(elem) => {
                let text: String = elem.text().collect();
                let rating = text.trim().parse::<i64>().map_err(|_| {
                    ExtractError::Parse(format!("malformed rating element: {:?}", text.trim()))
                })?;
                Some(rating)
            }
            None => {
                tracing::warn!("no rating element on CodeChef profile page");
                None
            }
        };

        let rank = html
            .select(&self.stars)
            .next()
            .map(|elem| elem.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| String::from("Unrated"));

        // Best-effort approximation: the profile lists solved problems as a
        // comma-delimited run of links.
        let problems_solved = html
            .select(&self.problems)
            .next()
            .map(|elem| {
                let text: String = elem.text().collect();
                if text.contains(',') {
                    text.split(',').count() as u64
                } else {
                    0
                }
            })
            .unwrap_or(0);

        Ok(ProfileDigest {
            rating,
            rank,
            problems_solved,
        })
    }
}

pub struct CodeChefExtractor {
    username: String,
    profile_url: Url,
    client: Client,
}

impl CodeChefExtractor {
    pub fn new(username: &str) -> Self {
        CodeChefExtractor {
            username: username.to_string(),
            profile_url: Url::parse(&format!("https://www.codechef.com/users/{}", username))
                .unwrap(),
            client: Client::builder()
                .user_agent(config::USER_AGENT)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }
}

#[async_trait]
impl PlatformExtractor for CodeChefExtractor {
    fn platform(&self) -> Platform {
        Platform::CodeChef
    }

    fn username(&self) -> &str {
        &self.username
    }

    async fn try_get_stats(&self) -> Result<StatRecord> {
        let res = self.client.get(self.profile_url.clone()).send().await?;
        let html = res.error_for_status()?.text().await?;

        let digest = SCRAPER.extract_profile(&html)?;

        Ok(StatRecord {
            platform: Platform::CodeChef,
            username: self.username.clone(),
            status: StatStatus::Active,
            rating: digest.rating,
            max_rating: None,
            rank: Some(digest.rank),
            problems_solved: digest.problems_solved,
            easy_solved: 0,
            medium_solved: 0,
            hard_solved: 0,
            acceptance_rate: 0.0,
            last_updated: now_timestamp(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extract_full_profile() {
        let html = r##"
            <html><body>
                <div class="rating-number">1742</div>
                <span class="rating-star">★★★</span>
                <div class="problems-solved">
                    <a href="#">ABC</a>, <a href="#">DEF</a>, <a href="#">GHI</a>
                </div>
            </body></html>
        "##;

        let digest = SCRAPER.extract_profile(html).unwrap();
        assert_eq!(digest.rating, Some(1742));
        assert_eq!(digest.rank, "★★★");
        assert_eq!(digest.problems_solved, 3);
    }

    #[test]
    fn test_missing_elements_degrade_individually() {
        let digest = SCRAPER
            .extract_profile("<html><body><p>nothing here</p></body></html>")
            .unwrap();
        assert_eq!(digest.rating, None);
        assert_eq!(digest.rank, "Unrated");
        assert_eq!(digest.problems_solved, 0);
    }

    #[test]
    fn test_malformed_rating_is_a_parse_error() {
        let html = r#"<div class="rating-number">unrated</div>"#;
        assert!(SCRAPER.extract_profile(html).is_err());
    }

    #[test]
    fn test_problem_listing_without_commas() {
        let html = r#"<div class="problems-solved">single</div>"#;
        let digest = SCRAPER.extract_profile(html).unwrap();
        assert_eq!(digest.problems_solved, 0);
    }
}
