use crate::config;
use crate::modules::extractors::{PlatformExtractor, Result};
use crate::types::stats::{now_timestamp, Platform, StatRecord, StatStatus};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use tokio::time::Duration;

static SCRAPER: Lazy<ProfilePageScraper> = Lazy::new(ProfilePageScraper::new);

struct ProfilePageScraper {
    table: Selector,
    tr: Selector,
    cell: Selector,
    ac_link: Selector,
}

#[derive(Debug, PartialEq)]
struct ProfileDigest {
    rating: Option<i64>,
    rank: String,
    problems_solved: u64,
}

impl ProfilePageScraper {
    fn new() -> Self {
        let table = Selector::parse("table.dl-table").unwrap();
        let tr = Selector::parse("tr").unwrap();
        let cell = Selector::parse("td, th").unwrap();
        let ac_link = Selector::parse(r#"a[href*="/submissions?f.Status=AC"]"#).unwrap();

        Self {
            table,
            tr,
            cell,
            ac_link,
        }
    }

    /// Walk the profile's key/value tables row by row. Later matching rows
    /// overwrite earlier ones; an unparseable rating value degrades to N/A.
    fn extract_profile(&self, html: &str) -> ProfileDigest {
        let html = Html::parse_document(html);

        let mut rating = None;
        let mut rank = String::from("Unrated");

        for table in html.select(&self.table) {
            for row in table.select(&self.tr) {
                let cells: Vec<ElementRef<'_>> = row.select(&self.cell).collect();
                if cells.len() < 2 {
                    continue;
                }

                let header: String = cells[0].text().collect();
                let value: String = cells[1].text().collect();
                let header = header.trim();
                let value = value.trim();

                if header.contains("Rating") {
                    rating = value
                        .split_whitespace()
                        .next()
                        .and_then(|token| token.parse::<i64>().ok());
                }
                if header.contains("Class") || header.contains("Rank") {
                    rank = value.to_string();
                }
            }
        }

        // The AC submissions link carries a parenthesized count in its
        // visible text.
        let problems_solved = html
            .select(&self.ac_link)
            .next()
            .and_then(|link| {
                let text: String = link.text().collect();
                let count = text
                    .split('(')
                    .nth(1)
                    .and_then(|rest| rest.split(')').next())
                    .and_then(|count| count.trim().parse::<u64>().ok());
                if count.is_none() {
                    tracing::warn!("could not extract solved count from {:?}", text.trim());
                }
                count
            })
            .unwrap_or(0);

        ProfileDigest {
            rating,
            rank,
            problems_solved,
        }
    }
}

pub struct AtCoderExtractor {
    username: String,
    profile_url: Url,
    client: Client,
}

impl AtCoderExtractor {
    pub fn new(username: &str) -> Self {
        AtCoderExtractor {
            username: username.to_string(),
            profile_url: Url::parse(&format!("https://atcoder.jp/users/{}", username)).unwrap(),
            client: Client::builder()
                .user_agent(config::USER_AGENT)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }
}

#[async_trait]
impl PlatformExtractor for AtCoderExtractor {
    fn platform(&self) -> Platform {
        Platform::AtCoder
    }

    fn username(&self) -> &str {
        &self.username
    }

    async fn try_get_stats(&self) -> Result<StatRecord> {
        let res = self.client.get(self.profile_url.clone()).send().await?;
        let html = res.error_for_status()?.text().await?;

        let digest = SCRAPER.extract_profile(&html);

        Ok(StatRecord {
            platform: Platform::AtCoder,
            username: self.username.clone(),
            status: StatStatus::Active,
            rating: digest.rating,
            // The profile page doesn't expose the highest rating.
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
