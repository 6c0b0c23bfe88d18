//! Declarative host routing table
//!
//! An ordered list of `{pattern, action}` rules. The proxy check looks at
//! every rule; rewrites use the first matching non-proxy rule.

use serde::{Deserialize, Serialize};

use crate::tables::PolicyTables;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "host", rename_all = "lowercase")]
pub enum HostPattern {
    /// Host must equal the pattern
    Exact(String),
    /// Host equals the domain or is one of its subdomains
    Domain(String),
}

impl HostPattern {
    pub fn exact(host: &str) -> Self {
        HostPattern::Exact(host.trim().to_ascii_lowercase())
    }

    pub fn domain(domain: &str) -> Self {
        HostPattern::Domain(domain.trim().to_ascii_lowercase())
    }

    /// `host` is expected lowercase, without a trailing dot.
    pub fn matches(&self, host: &str) -> bool {
        match self {
            HostPattern::Exact(pattern) => host == pattern,
            HostPattern::Domain(domain) => {
                host == domain
                    || host
                        .strip_suffix(domain.as_str())
                        .is_some_and(|rest| rest.ends_with('.'))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAction {
    /// Host refuses embedding; wrap it in the rendering proxy
    ForceProxy,
    /// Add the search engine's allow-embedding flag
    SearchEngineEmbed,
    /// Rewrite watch/share links into the platform's embed path
    VideoEmbed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub pattern: HostPattern,
    pub action: RouteAction,
}

impl RouteRule {
    pub fn new(pattern: HostPattern, action: RouteAction) -> Self {
        Self { pattern, action }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    rules: Vec<RouteRule>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: &PolicyTables) -> Self {
        let mut table = Self::new();

        for host in &tables.force_proxy_hosts {
            table.push(RouteRule::new(
                HostPattern::domain(host),
                RouteAction::ForceProxy,
            ));
        }
        for host in &tables.search_engine_hosts {
            table.push(RouteRule::new(
                HostPattern::exact(host),
                RouteAction::SearchEngineEmbed,
            ));
        }
        for host in &tables.video_platform_hosts {
            table.push(RouteRule::new(
                HostPattern::domain(host),
                RouteAction::VideoEmbed,
            ));
        }

        table
    }

    /// Append a rule. Later rules lose to earlier ones for rewrites.
    pub fn push(&mut self, rule: RouteRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Mandatory-proxy check.
    pub fn requires_proxy(&self, host: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.action == RouteAction::ForceProxy && rule.pattern.matches(host))
    }

    /// First embedding-compatibility rewrite that applies to `host`.
    pub fn rewrite_for(&self, host: &str) -> Option<RouteAction> {
        self.rules
            .iter()
            .filter(|rule| rule.action != RouteAction::ForceProxy)
            .find(|rule| rule.pattern.matches(host))
            .map(|rule| rule.action)
    }
}
