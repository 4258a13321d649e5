use crate::config::PROFILES;
use crate::types::stats::{Platform, StatRecord};
use chrono::Local;
use std::collections::BTreeMap;

/// Three-bucket platform distribution, in whole percent.
///
/// Codeforces and LeetCode round independently (ties to even) and Others
/// takes the uncorrected remainder, so the three always sum to 100.
fn distribution(codeforces: u64, leetcode: u64, total: u64) -> (i64, i64, i64) {
    let denominator = total.max(1) as f64;
    let codeforces_pct = ((codeforces as f64 / denominator) * 100.0).round_ties_even() as i64;
    let leetcode_pct = ((leetcode as f64 / denominator) * 100.0).round_ties_even() as i64;

    (
        codeforces_pct,
        leetcode_pct,
        100 - codeforces_pct - leetcode_pct,
    )
}

/// Render the aggregated records into the dark-theme Markdown fragment.
///
/// Every field read falls back to an explicit default ("N/A" labels, zero
/// counts), so error records render as placeholders instead of breaking
/// the layout. The "last updated" date is taken at render time.
pub fn render(stats: &BTreeMap<Platform, StatRecord>) -> String {
    let cf = stats.get(&Platform::Codeforces);
    let lc = stats.get(&Platform::LeetCode);
    let cc = stats.get(&Platform::CodeChef);
    let ac = stats.get(&Platform::AtCoder);
    let cses = stats.get(&Platform::Cses);

    let cf_rating = cf.map_or_else(|| String::from("N/A"), |r| r.rating_label());
    let cf_rank = cf.map_or("N/A", |r| r.rank_label());
    let cf_problems = cf.map_or(0, |r| r.problems_solved);

    let lc_problems = lc.map_or(0, |r| r.problems_solved);
    let lc_easy = lc.map_or(0, |r| r.easy_solved);
    let lc_medium = lc.map_or(0, |r| r.medium_solved);
    let lc_hard = lc.map_or(0, |r| r.hard_solved);

    let cc_rating = cc.map_or_else(|| String::from("N/A"), |r| r.rating_label());
    let cc_rank = cc.map_or("N/A", |r| r.rank_label());
    let cc_problems = cc.map_or(0, |r| r.problems_solved);

    let ac_problems = ac.map_or(0, |r| r.problems_solved);
    let cses_problems = cses.map_or(0, |r| r.problems_solved);

    let total_problems = cf_problems + lc_problems + cc_problems + ac_problems + cses_problems;
    let (cf_percent, lc_percent, others_percent) =
        distribution(cf_problems, lc_problems, total_problems);

    let cf_user = &PROFILES[&Platform::Codeforces].username;
    let lc_user = &PROFILES[&Platform::LeetCode].username;
    let cc_user = &PROFILES[&Platform::CodeChef].username;

    let last_updated = Local::now().format("%B %d, %Y");

    format!(
        r##"<!-- Competitive Programming Stats - Dark Theme -->

<div align="center">

  <!-- Title with custom styling -->
  <h2>🏆 Competitive Programming Stats</h2>

  <!-- Main Stats Cards - Top Row -->
  <a href="https://codeforces.com/profile/{cf_user}">
    <img src="https://img.shields.io/badge/Codeforces-{cf_rating}-58d3b9?style=for-the-badge&logo=codeforces&logoColor=white&labelColor=0d1117" alt="Codeforces">
  </a>
  <a href="https://leetcode.com/{lc_user}/">
    <img src="https://img.shields.io/badge/LeetCode-{lc_problems}_problems-58d3b9?style=for-the-badge&logo=leetcode&logoColor=white&labelColor=0d1117" alt="LeetCode">
  </a>
  <a href="https://www.codechef.com/users/{cc_user}">
    <img src="https://img.shields.io/badge/CodeChef-{cc_rating}-58d3b9?style=for-the-badge&logo=codechef&logoColor=white&labelColor=0d1117" alt="CodeChef">
  </a>

  <!-- Stats Summary in GitHub-compatible table -->
  <table>
    <tr>
      <td align="center" width="200">
        <h1>{cf_rating}</h1>
        <strong>Codeforces Rating</strong>
        <br>
        <code>{cf_rank}</code>
      </td>
      <td align="center" width="200">
        <h1>{lc_problems}</h1>
        <strong>Problems Solved</strong>
        <br>
        <code>LeetCode</code>
      </td>
      <td align="center" width="200">
        <h1>{cc_rating}</h1>
        <strong>CodeChef Rating</strong>
        <br>
        <code>{cc_rank}</code>
      </td>
    </tr>
  </table>

  <!-- LeetCode Progress -->
  <h3>LeetCode Progress</h3>
  <a href="https://leetcode.com/{lc_user}/">
    <img src="https://img.shields.io/badge/Easy-{lc_easy}-3498db?style=flat-square&labelColor=0d1117" alt="Easy">
    <img src="https://img.shields.io/badge/Medium-{lc_medium}-f39c12?style=flat-square&labelColor=0d1117" alt="Medium">
    <img src="https://img.shields.io/badge/Hard-{lc_hard}-e74c3c?style=flat-square&labelColor=0d1117" alt="Hard">
  </a>

  <!-- Platform Distribution -->
  <h3>Platform Activity</h3>
  <a href="#">
    <img src="https://img.shields.io/badge/Codeforces-{cf_percent}%25-58d3b9?style=flat-square&labelColor=0d1117" alt="Codeforces">
    <img src="https://img.shields.io/badge/LeetCode-{lc_percent}%25-58d3b9?style=flat-square&labelColor=0d1117" alt="LeetCode">
    <img src="https://img.shields.io/badge/Others-{others_percent}%25-58d3b9?style=flat-square&labelColor=0d1117" alt="Others">
  </a>

  <br><br>
  <i>Last updated: {last_updated}</i>
</div>"##
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::stats::{now_timestamp, StatStatus};

    fn record(platform: Platform, solved: u64) -> StatRecord {
        StatRecord {
            platform,
            username: String::from("someone"),
            status: StatStatus::Active,
            rating: Some(1500),
            max_rating: None,
            rank: Some(String::from("specialist")),
            problems_solved: solved,
            easy_solved: 0,
            medium_solved: 0,
            hard_solved: 0,
            acceptance_rate: 0.0,
            last_updated: now_timestamp(),
        }
    }

    #[test]
    fn test_distribution_sums_to_one_hundred() {
        let (cf, lc, others) = distribution(10, 20, 40);
        assert_eq!((cf, lc, others), (25, 50, 25));
        assert_eq!(cf + lc + others, 100);
    }

    #[test]
    fn test_distribution_with_no_problems() {
        assert_eq!(distribution(0, 0, 0), (0, 0, 100));
    }

    #[test]
    fn test_distribution_rounds_ties_to_even() {
        // 37.5% rounds up to the even 38, 62.5% rounds down to the even 62.
        let (cf, lc, others) = distribution(3, 5, 8);
        assert_eq!((cf, lc, others), (38, 62, 0));
        assert_eq!(cf + lc + others, 100);
    }

    #[test]
    fn test_distribution_remainder_is_not_corrected() {
        // Others always takes 100 minus the two rounded shares, whatever
        // their rounding did.
        for (cf, lc, total) in [(3u64, 5u64, 8u64), (1, 2, 3), (19, 19, 40), (7, 0, 9)] {
            let (cf_pct, lc_pct, others_pct) = distribution(cf, lc, total);
            assert_eq!(cf_pct + lc_pct + others_pct, 100);
        }
    }

    #[test]
    fn test_render_with_active_records() {
        let mut stats = BTreeMap::new();
        let mut lc = record(Platform::LeetCode, 50);
        lc.easy_solved = 30;
        lc.medium_solved = 15;
        lc.hard_solved = 5;
        stats.insert(Platform::Codeforces, record(Platform::Codeforces, 25));
        stats.insert(Platform::LeetCode, lc);
        stats.insert(Platform::CodeChef, record(Platform::CodeChef, 10));
        stats.insert(Platform::AtCoder, record(Platform::AtCoder, 10));
        stats.insert(Platform::Cses, record(Platform::Cses, 5));

        let markdown = render(&stats);
        assert!(markdown.contains("Codeforces-1500-"));
        assert!(markdown.contains("LeetCode-50_problems"));
        assert!(markdown.contains("Easy-30-"));
        assert!(markdown.contains("Medium-15-"));
        assert!(markdown.contains("Hard-5-"));
        assert!(markdown.contains("<code>specialist</code>"));
        // 25/100 and 50/100
        assert!(markdown.contains("Codeforces-25%25"));
        assert!(markdown.contains("LeetCode-50%25"));
        assert!(markdown.contains("Others-25%25"));
        assert!(markdown.contains("Last updated:"));
    }

    #[test]
    fn test_render_never_fails_on_missing_records() {
        let markdown = render(&BTreeMap::new());
        assert!(markdown.contains("Codeforces-N/A-"));
        assert!(markdown.contains("LeetCode-0_problems"));
        assert!(markdown.contains("<code>N/A</code>"));
        assert!(markdown.contains("Others-100%25"));
    }

    #[test]
    fn test_render_with_error_records() {
        let mut stats = BTreeMap::new();
        stats.insert(
            Platform::Codeforces,
            StatRecord::error(Platform::Codeforces, "someone"),
        );
        stats.insert(Platform::LeetCode, record(Platform::LeetCode, 40));

        let markdown = render(&stats);
        assert!(markdown.contains("Codeforces-N/A-"));
        assert!(markdown.contains("Codeforces-0%25"));
        assert!(markdown.contains("LeetCode-100%25"));
        assert!(markdown.contains("Others-0%25"));
    }
}
