//! Ordered tab collection
//!
//! The persisted unit of a browsing session. Anything read back from storage
//! goes through [`TabCollection::sanitize`] before it is trusted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sovereign_routing::BLANK_URL;

use crate::tab::Tab;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCollection {
    pub tabs: Vec<Tab>,
    pub active_tab_id: String,
}

impl TabCollection {
    /// A collection holding one blank tab.
    pub fn seeded() -> Self {
        let tab = Tab::blank();
        Self {
            active_tab_id: tab.id.clone(),
            tabs: vec![tab],
        }
    }

    /// Build from restored parts. Returns `None` when nothing usable is left.
    pub fn from_parts(tabs: Vec<Tab>, active_tab_id: Option<String>) -> Option<Self> {
        Self {
            tabs,
            active_tab_id: active_tab_id.unwrap_or_default(),
        }
        .sanitize()
    }

    /// Repair a collection that may have been written by another version or
    /// edited by hand.
    ///
    /// Tabs without an id and duplicate ids are dropped, empty histories are
    /// reseeded from the display address, out-of-range cursors are clamped and
    /// loading flags are cleared. An unknown active id falls back to the first
    /// tab.
    pub fn sanitize(self) -> Option<Self> {
        let mut seen = HashSet::new();
        let tabs: Vec<Tab> = self
            .tabs
            .into_iter()
            .filter(|tab| !tab.id.is_empty() && seen.insert(tab.id.clone()))
            .map(repair_tab)
            .collect();

        if tabs.is_empty() {
            return None;
        }

        let active_tab_id = if tabs.iter().any(|tab| tab.id == self.active_tab_id) {
            self.active_tab_id
        } else {
            tabs[0].id.clone()
        };

        Some(Self {
            tabs,
            active_tab_id,
        })
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id == id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.get(&self.active_tab_id)
    }

    /// Every structural invariant at once: non-empty, unique ids, the active
    /// id refers to a member and every tab's cursor is consistent.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        !self.tabs.is_empty()
            && self.tabs.iter().all(|tab| seen.insert(tab.id.as_str()))
            && self.active_tab().is_some()
            && self.tabs.iter().all(Tab::is_consistent)
    }
}

impl Default for TabCollection {
    fn default() -> Self {
        Self::seeded()
    }
}

fn repair_tab(mut tab: Tab) -> Tab {
    if tab.history.is_empty() {
        tab.history.push(tab.expected_entry().to_string());
        tab.history_index = 0;
    }
    if tab.history_index >= tab.history.len() {
        tab.history_index = tab.history.len() - 1;
    }
    if !tab.is_consistent() {
        let entry = tab.expected_entry().to_string();
        tab.history[tab.history_index] = entry;
    }
    if tab.raw_url.is_empty() {
        tab.raw_url = if tab.is_blank() {
            BLANK_URL.to_string()
        } else {
            tab.display_url.clone()
        };
    }
    tab.is_loading = false;
    tab
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: &str, display: &str) -> Tab {
        let mut tab = Tab::blank_with_id(id.to_string());
        tab.display_url = display.to_string();
        tab.raw_url = display.to_string();
        tab.history = vec![tab.expected_entry().to_string()];
        tab
    }

    #[test]
    fn test_seeded() {
        let collection = TabCollection::seeded();
        assert_eq!(collection.len(), 1);
        assert!(collection.active_tab().unwrap().is_blank());
        assert!(collection.is_consistent());
    }

    #[test]
    fn test_sanitize_empty_is_none() {
        assert!(TabCollection::from_parts(Vec::new(), None).is_none());
    }

    #[test]
    fn test_sanitize_unknown_active_falls_back_to_first() {
        let collection = TabCollection::from_parts(
            vec![tab("a", "https://a.example"), tab("b", "https://b.example")],
            Some("missing".to_string()),
        )
        .unwrap();

        assert_eq!(collection.active_tab_id, "a");
        assert!(collection.is_consistent());
    }

    #[test]
    fn test_sanitize_drops_duplicates_and_missing_ids() {
        let collection = TabCollection::from_parts(
            vec![
                tab("a", "https://a.example"),
                tab("", "https://nobody.example"),
                tab("a", "https://dup.example"),
            ],
            Some("a".to_string()),
        )
        .unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.tabs[0].display_url, "https://a.example");
    }

    #[test]
    fn test_sanitize_repairs_history() {
        let mut broken = tab("a", "https://a.example");
        broken.history.clear();
        broken.history_index = 7;
        broken.is_loading = true;

        let mut clamped = tab("b", "https://b.example");
        clamped.history = vec!["https://old.example".to_string()];
        clamped.history_index = 3;

        let collection =
            TabCollection::from_parts(vec![broken, clamped], Some("b".to_string())).unwrap();

        let a = collection.get("a").unwrap();
        assert_eq!(a.history, vec!["https://a.example".to_string()]);
        assert_eq!(a.history_index, 0);
        assert!(!a.is_loading);

        let b = collection.get("b").unwrap();
        assert_eq!(b.history_index, 0);
        assert_eq!(b.current_entry(), Some("https://b.example"));
        assert!(collection.is_consistent());
    }

    #[test]
    fn test_sanitize_fills_missing_raw_url() {
        let mut blank = Tab::blank_with_id("a".to_string());
        blank.raw_url.clear();

        let collection = TabCollection::from_parts(vec![blank], None).unwrap();
        assert_eq!(collection.tabs[0].raw_url, BLANK_URL);
    }

    #[test]
    fn test_json_schema() {
        let collection = TabCollection::from_parts(
            vec![tab("a", "https://a.example")],
            Some("a".to_string()),
        )
        .unwrap();

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["activeTabId"], "a");
        assert_eq!(json["tabs"][0]["displayUrl"], "https://a.example");
        assert_eq!(json["tabs"][0]["historyIndex"], 0);
    }
}
