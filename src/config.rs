use crate::types::stats::Platform;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::env;

/// Browser user-agent for the profile pages that reject default clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Heading literal that marks the replaceable README section.
pub const SECTION_HEADER: &str = "## Competitive Programming Stats";

/// File name of the standalone rendered artifact.
pub const STATS_ARTIFACT: &str = "cp_stats.md";

#[derive(Debug, Clone)]
pub struct Profile {
    pub username: String,
    pub url: String,
}

/// Static platform -> profile mapping, fixed at process start.
///
/// Usernames come from the environment when set (loaded via dotenvy in
/// main before first access), otherwise from the built-in defaults.
pub static PROFILES: Lazy<BTreeMap<Platform, Profile>> = Lazy::new(|| {
    let codeforces = username_for("CODEFORCES_USERNAME", "dxnxsh06");
    let leetcode = username_for("LEETCODE_USERNAME", "dxnxsh06");
    let codechef = username_for("CODECHEF_USERNAME", "dxnxsh06");
    let atcoder = username_for("ATCODER_USERNAME", "d_nex");
    let cses = username_for("CSES_USER_ID", "334483");

    BTreeMap::from([
        (
            Platform::Codeforces,
            Profile {
                url: format!("https://codeforces.com/profile/{}", codeforces),
                username: codeforces,
            },
        ),
        (
            Platform::LeetCode,
            Profile {
                url: format!("https://leetcode.com/{}/", leetcode),
                username: leetcode,
            },
        ),
        (
            Platform::CodeChef,
            Profile {
                url: format!("https://www.codechef.com/users/{}", codechef),
                username: codechef,
            },
        ),
        (
            Platform::AtCoder,
            Profile {
                url: format!("https://atcoder.jp/users/{}", atcoder),
                username: atcoder,
            },
        ),
        (
            Platform::Cses,
            Profile {
                url: format!("https://cses.fi/user/{}", cses),
                username: cses,
            },
        ),
    ])
});

fn username_for(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}
