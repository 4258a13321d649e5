use crate::config;
use crate::modules::extractors::{PlatformExtractor, Result};
use crate::types::stats::{now_timestamp, Platform, StatRecord, StatStatus};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use tokio::time::Duration;

static SCRAPER: Lazy<UserPageScraper> = Lazy::new(UserPageScraper::new);

struct UserPageScraper {
    content: Selector,
}

impl UserPageScraper {
    fn new() -> Self {
        let content = Selector::parse(".content").unwrap();

        Self { content }
    }

    /// The user page has no markup around the count; find the
    /// "Solved tasks: N" line in the content block's text.
    fn extract_solved_count(&self, html: &str) -> u64 {
        let html = Html::parse_document(html);

        let Some(content) = html.select(&self.content).next() else {
            tracing::warn!("no content block on CSES user page");
            return 0;
        };

        let text: String = content.text().collect();
        for line in text.lines() {
            if !line.contains("Solved tasks") {
                continue;
            }
            match line
                .split(':')
                .nth(1)
                .and_then(|count| count.trim().parse::<u64>().ok())
            {
                Some(count) => return count,
                None => {
                    tracing::warn!("could not extract solved count from {:?}", line.trim());
                    return 0;
                }
            }
        }

        0
    }
}

pub struct CsesExtractor {
    username: String,
    profile_url: Url,
    client: Client,
}

impl CsesExtractor {
    pub fn new(username: &str) -> Self {
        CsesExtractor {
            username: username.to_string(),
            profile_url: Url::parse(&format!("https://cses.fi/user/{}", username)).unwrap(),
            client: Client::builder()
                .user_agent(config::USER_AGENT)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }
}

#[async_trait]
impl PlatformExtractor for CsesExtractor {
    fn platform(&self) -> Platform {
        Platform::Cses
    }

    fn username(&self) -> &str {
        &self.username
    }

    async fn try_get_stats(&self) -> Result<StatRecord> {
        let res = self.client.get(self.profile_url.clone()).send().await?;
        let html = res.error_for_status()?.text().await?;

        let problems_solved = SCRAPER.extract_solved_count(&html);

        // CSES has no rating or rank concept.
        Ok(StatRecord {
            platform: Platform::Cses,
            username: self.username.clone(),
            status: StatStatus::Active,
            rating: None,
            max_rating: None,
            rank: None,
            problems_solved,
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
    fn test_extract_solved_count() {
        let html = r#"
            <html><body><div class="content">
                <h1>User 334483</h1>
                <p>Country: FI</p>
                <p>Solved tasks: 142</p>
            </div></body></html>
        "#;

        assert_eq!(SCRAPER.extract_solved_count(html), 142);
    }

    #[test]
    fn test_missing_solved_line_defaults_to_zero() {
        let html = r#"<div class="content"><p>nothing relevant</p></div>"#;
        assert_eq!(SCRAPER.extract_solved_count(html), 0);
    }

    #[test]
    fn test_malformed_count_defaults_to_zero() {
        let html = r#"<div class="content"><p>Solved tasks: plenty</p></div>"#;
        assert_eq!(SCRAPER.extract_solved_count(html), 0);
    }

    #[test]
    fn test_missing_content_block_defaults_to_zero() {
        assert_eq!(SCRAPER.extract_solved_count("<html><body></body></html>"), 0);
    }
}
