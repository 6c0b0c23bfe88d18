//! Fixed policy tables
//!
//! Everything the router knows about specific hosts is data in this module.

use serde::{Deserialize, Serialize};

/// History marker for the blank new-tab page.
pub const BLANK_URL: &str = "about:blank";

/// Hosts known to refuse embedding. Always routed through the proxy.
pub const FORCE_PROXY_HOSTS: &[&str] = &[
    "chatgpt.com",
    "openai.com",
    "x.com",
    "twitter.com",
    "instagram.com",
    "facebook.com",
    "github.com",
    "discord.com",
    "linkedin.com",
];

/// The default search engine. Matched exactly so that sibling services
/// (translate, news) are left alone.
const SEARCH_ENGINE_HOSTS: &[&str] = &["google.com", "www.google.com"];

/// The default video platform, including its short-link and no-cookie hosts.
const VIDEO_PLATFORM_HOSTS: &[&str] = &["youtube.com", "youtu.be", "youtube-nocookie.com"];

/// `%s` is the percent-encoded query. `igu=1` lets the results page be framed.
const SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=%s&igu=1";

const SEARCH_HOME_EMBED: &str = "https://www.google.com/webhp?igu=1";

/// `%s` is the video id.
const VIDEO_EMBED_TEMPLATE: &str = "https://www.youtube.com/embed/%s";

/// `%l` is the target language, `%s` the percent-encoded original URL.
const PROXY_TEMPLATE: &str =
    "https://translate.google.com/translate?sl=auto&tl=%l&u=%s&client=webapp";

const DEFAULT_PROXY_LANGUAGE: &str = "ar";

/// A shortcut shown on the blank-tab page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickLink {
    pub label: &'static str,
    pub url: &'static str,
}

pub const QUICK_LINKS: &[QuickLink] = &[
    QuickLink {
        label: "Google",
        url: "https://www.google.com",
    },
    QuickLink {
        label: "YouTube",
        url: "https://www.youtube.com",
    },
    QuickLink {
        label: "ChatGPT",
        url: "https://chatgpt.com",
    },
    QuickLink {
        label: "Wiki",
        url: "https://www.wikipedia.org",
    },
    QuickLink {
        label: "News",
        url: "https://news.google.com",
    },
    QuickLink {
        label: "X",
        url: "https://x.com",
    },
];

/// The full set of tables a [`crate::RoutingPolicy`] is built from.
///
/// `Default` yields the fixed tables above; hosts can extend the block-list
/// or change the proxy language through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTables {
    pub force_proxy_hosts: Vec<String>,
    pub search_engine_hosts: Vec<String>,
    pub video_platform_hosts: Vec<String>,
    pub search_template: String,
    pub search_home_embed: String,
    pub video_embed_template: String,
    pub proxy_template: String,
    pub proxy_language: String,
}

impl PolicyTables {
    /// Add hosts to the block-list, skipping blanks and duplicates.
    pub fn with_extra_proxy_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for host in hosts {
            let host = host.as_ref().trim().to_ascii_lowercase();
            if !host.is_empty() && !self.force_proxy_hosts.contains(&host) {
                self.force_proxy_hosts.push(host);
            }
        }
        self
    }

    pub fn with_proxy_language(mut self, language: impl Into<String>) -> Self {
        self.proxy_language = language.into();
        self
    }
}

impl Default for PolicyTables {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            force_proxy_hosts: owned(FORCE_PROXY_HOSTS),
            search_engine_hosts: owned(SEARCH_ENGINE_HOSTS),
            video_platform_hosts: owned(VIDEO_PLATFORM_HOSTS),
            search_template: SEARCH_TEMPLATE.to_string(),
            search_home_embed: SEARCH_HOME_EMBED.to_string(),
            video_embed_template: VIDEO_EMBED_TEMPLATE.to_string(),
            proxy_template: PROXY_TEMPLATE.to_string(),
            proxy_language: DEFAULT_PROXY_LANGUAGE.to_string(),
        }
    }
}
