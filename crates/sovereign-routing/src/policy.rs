//! Routing policy: input → embeddable target

use serde::{Deserialize, Serialize};
use url::Url;

use crate::input::{classify, InputKind};
use crate::rules::{RouteAction, RoutingTable};
use crate::tables::{PolicyTables, BLANK_URL};
use crate::video::video_id_from;

/// Outcome of resolving one piece of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// What the content surface loads (may be rewritten or proxied)
    pub target_url: String,
    /// What the address bar shows; never rewritten
    pub display_url: String,
    /// Whether `target_url` goes through the rendering proxy
    pub use_proxy: bool,
}

impl Resolution {
    pub fn blank() -> Self {
        Self {
            target_url: BLANK_URL.to_string(),
            display_url: String::new(),
            use_proxy: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.display_url.is_empty()
    }

    /// The entry recorded in a tab's history for this resolution.
    pub fn history_entry(&self) -> &str {
        if self.is_blank() {
            BLANK_URL
        } else {
            &self.display_url
        }
    }
}

/// Stateless resolver over an immutable set of tables.
#[derive(Debug, Clone)]
pub struct RoutingPolicy {
    tables: PolicyTables,
    routes: RoutingTable,
}

impl RoutingPolicy {
    pub fn new() -> Self {
        Self::with_tables(PolicyTables::default())
    }

    pub fn with_tables(tables: PolicyTables) -> Self {
        let routes = RoutingTable::from_tables(&tables);
        Self { tables, routes }
    }

    pub fn tables(&self) -> &PolicyTables {
        &self.tables
    }

    pub fn routing_table(&self) -> &RoutingTable {
        &self.routes
    }

    /// Resolve input into a navigation target.
    ///
    /// Never fails: anything that cannot be read as a URL becomes a search.
    /// A block-listed host is proxied whatever `force_proxy` says.
    pub fn resolve(&self, input: &str, force_proxy: bool) -> Resolution {
        let input = input.trim();

        let (display_url, parsed) = match classify(input) {
            InputKind::Blank => return Resolution::blank(),
            InputKind::Url => match Url::parse(input) {
                Ok(url) => (input.to_string(), Some(url)),
                Err(_) => self.search(input),
            },
            InputKind::BareDomain => {
                let candidate = format!("https://{}", input);
                match Url::parse(&candidate) {
                    Ok(url) if url.host_str().is_some() => (candidate, Some(url)),
                    _ => self.search(input),
                }
            }
            InputKind::Query => self.search(input),
        };

        let host = parsed
            .as_ref()
            .and_then(|url| url.host_str())
            .map(|host| host.trim_end_matches('.').to_ascii_lowercase());

        let mandatory = host
            .as_deref()
            .is_some_and(|host| self.routes.requires_proxy(host));
        let use_proxy = mandatory || force_proxy;

        let target_url = if use_proxy {
            self.proxy_url(&display_url)
        } else {
            host.as_deref()
                .and_then(|host| self.routes.rewrite_for(host))
                .zip(parsed.as_ref())
                .and_then(|(action, url)| self.rewrite(action, url))
                .unwrap_or_else(|| display_url.clone())
        };

        tracing::debug!(
            display = %display_url,
            target = %target_url,
            use_proxy,
            mandatory,
            "Resolved navigation input"
        );

        Resolution {
            target_url,
            display_url,
            use_proxy,
        }
    }

    fn search(&self, query: &str) -> (String, Option<Url>) {
        let encoded = urlencoding::encode(query);
        let url = self.tables.search_template.replace("%s", &encoded);
        let parsed = Url::parse(&url).ok();
        (url, parsed)
    }

    fn proxy_url(&self, original: &str) -> String {
        self.tables
            .proxy_template
            .replace("%l", &self.tables.proxy_language)
            .replace("%s", &urlencoding::encode(original))
    }

    /// Embedding-compatibility rewrite; `None` keeps the URL unchanged.
    fn rewrite(&self, action: RouteAction, url: &Url) -> Option<String> {
        match action {
            RouteAction::ForceProxy => None,
            RouteAction::SearchEngineEmbed => self.search_engine_embed(url),
            RouteAction::VideoEmbed => video_id_from(url)
                .map(|id| self.tables.video_embed_template.replace("%s", &id)),
        }
    }

    fn search_engine_embed(&self, url: &Url) -> Option<String> {
        if url.query_pairs().any(|(key, _)| key == "igu") {
            return None;
        }

        match url.path() {
            "" | "/" | "/webhp" => Some(self.tables.search_home_embed.clone()),
            path if path.starts_with("/search") => {
                let mut embedded = url.clone();
                embedded.query_pairs_mut().append_pair("igu", "1");
                Some(embedded.to_string())
            }
            _ => None,
        }
    }
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self::new()
    }
}
