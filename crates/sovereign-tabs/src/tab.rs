//! Tab data structure
//!
//! Field names on disk follow the persisted session schema
//! (`rawUrl`, `displayUrl`, `historyIndex`, ...).

use serde::{Deserialize, Serialize};
use sovereign_routing::{Resolution, BLANK_URL};
use url::Url;
use uuid::Uuid;

/// Label for a tab that has nothing better to show.
pub const NEW_TAB_LABEL: &str = "New Tab";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Unique identifier, stable for the tab's lifetime
    pub id: String,
    /// Address handed to the content surface (possibly rewritten or proxied)
    #[serde(default)]
    pub raw_url: String,
    /// Address shown to the user; empty for a blank tab
    pub display_url: String,
    /// Best-effort label, defaults to the display address
    #[serde(default)]
    pub title: String,
    /// Visited display addresses, the blank page as `about:blank`
    #[serde(default)]
    pub history: Vec<String>,
    /// Current position in `history`
    #[serde(default)]
    pub history_index: usize,
    /// Render-only; never meaningful after a restart
    #[serde(default)]
    pub is_loading: bool,
    /// Whether the current resolution went through the proxy
    #[serde(default)]
    pub is_proxy_active: bool,
}

impl Tab {
    /// A fresh blank tab with a single history entry.
    pub fn blank() -> Self {
        Self::blank_with_id(Uuid::new_v4().to_string())
    }

    pub fn blank_with_id(id: String) -> Self {
        Self {
            id,
            raw_url: BLANK_URL.to_string(),
            display_url: String::new(),
            title: String::new(),
            history: vec![BLANK_URL.to_string()],
            history_index: 0,
            is_loading: false,
            is_proxy_active: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.display_url.is_empty()
    }

    /// History entry under the cursor.
    pub fn current_entry(&self) -> Option<&str> {
        self.history.get(self.history_index).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    /// History entry that corresponds to the current display address.
    pub fn expected_entry(&self) -> &str {
        if self.is_blank() {
            BLANK_URL
        } else {
            &self.display_url
        }
    }

    /// Cursor in range and pointing at the display address.
    pub fn is_consistent(&self) -> bool {
        self.current_entry() == Some(self.expected_entry())
    }

    /// Title for tab cards: title, then address, then the new-tab label.
    pub fn label(&self) -> &str {
        if !self.title.is_empty() {
            &self.title
        } else if !self.display_url.is_empty() {
            &self.display_url
        } else {
            NEW_TAB_LABEL
        }
    }

    /// Host for the address capsule, without a leading `www.`.
    pub fn host_label(&self) -> Option<String> {
        let url = Url::parse(&self.display_url).ok()?;
        let host = url.host_str()?;
        Some(host.strip_prefix("www.").unwrap_or(host).to_string())
    }

    /// Point the tab at a new resolution. History is the caller's business.
    pub(crate) fn apply(&mut self, resolution: &Resolution) {
        self.raw_url = resolution.target_url.clone();
        self.display_url = resolution.display_url.clone();
        self.title = resolution.display_url.clone();
        self.is_proxy_active = resolution.use_proxy;
        // The blank page is rendered locally; nothing will report it ready
        self.is_loading = !resolution.is_blank();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_tab() {
        let tab = Tab::blank();
        assert!(tab.is_blank());
        assert_eq!(tab.raw_url, BLANK_URL);
        assert_eq!(tab.history, vec![BLANK_URL.to_string()]);
        assert_eq!(tab.history_index, 0);
        assert!(!tab.is_loading);
        assert!(tab.is_consistent());
        assert!(!tab.can_go_back());
        assert!(!tab.can_go_forward());
        assert_eq!(tab.label(), NEW_TAB_LABEL);
    }

    #[test]
    fn test_blank_tabs_get_unique_ids() {
        assert_ne!(Tab::blank().id, Tab::blank().id);
    }

    #[test]
    fn test_host_label() {
        let mut tab = Tab::blank();
        assert_eq!(tab.host_label(), None);

        tab.display_url = "https://www.wikipedia.org/wiki/Rust".to_string();
        assert_eq!(tab.host_label().as_deref(), Some("wikipedia.org"));

        tab.display_url = "https://news.google.com".to_string();
        assert_eq!(tab.host_label().as_deref(), Some("news.google.com"));
    }

    #[test]
    fn test_serialized_field_names() {
        let tab = Tab::blank_with_id("tab-1".to_string());
        let value = serde_json::to_value(&tab).unwrap();

        for key in [
            "id",
            "rawUrl",
            "displayUrl",
            "title",
            "history",
            "historyIndex",
            "isLoading",
            "isProxyActive",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_lenient_deserialize() {
        let tab: Tab =
            serde_json::from_str(r#"{"id":"t","displayUrl":"https://example.com"}"#).unwrap();
        assert!(tab.history.is_empty());
        assert!(!tab.is_consistent());
    }
}
