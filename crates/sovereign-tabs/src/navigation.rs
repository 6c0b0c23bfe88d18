//! Per-tab navigation
//!
//! Every move re-runs the routing policy over a display address, so a tab
//! never reloads a stale proxied or rewritten target.

use sovereign_routing::{Resolution, RoutingPolicy};

use crate::tab::Tab;

pub struct NavigationController<'a> {
    policy: &'a RoutingPolicy,
}

impl<'a> NavigationController<'a> {
    pub fn new(policy: &'a RoutingPolicy) -> Self {
        Self { policy }
    }

    /// A new tab whose history starts at `input`.
    pub fn open(&self, input: &str) -> Tab {
        let resolution = self.policy.resolve(input, false);
        let mut tab = Tab::blank();
        tab.history = vec![resolution.history_entry().to_string()];
        tab.apply(&resolution);
        tab
    }

    /// Resolve `input` and push it, discarding any forward entries.
    pub fn navigate(&self, tab: &mut Tab, input: &str, force_proxy: bool) -> Resolution {
        let resolution = self.policy.resolve(input, force_proxy);

        let keep = (tab.history_index + 1).min(tab.history.len());
        tab.history.truncate(keep);
        tab.history.push(resolution.history_entry().to_string());
        tab.history_index = tab.history.len() - 1;
        tab.apply(&resolution);

        tracing::info!(
            tab_id = %tab.id,
            url = %tab.display_url,
            proxied = tab.is_proxy_active,
            depth = tab.history.len(),
            "Navigated tab"
        );

        resolution
    }

    /// Step back one entry. Returns `false` at the start of history.
    pub fn back(&self, tab: &mut Tab) -> bool {
        if !tab.can_go_back() {
            return false;
        }
        let index = tab.history_index - 1;
        self.move_to(tab, index);
        true
    }

    /// Step forward one entry. Returns `false` at the end of history.
    pub fn forward(&self, tab: &mut Tab) -> bool {
        if !tab.can_go_forward() {
            return false;
        }
        let index = tab.history_index + 1;
        self.move_to(tab, index);
        true
    }

    /// Flip the manual proxy override for the current address.
    ///
    /// Re-resolves in place; history is untouched. Block-listed hosts stay
    /// proxied either way. No-op on a blank tab.
    pub fn toggle_proxy_override(&self, tab: &mut Tab) -> bool {
        if tab.is_blank() {
            return false;
        }
        let resolution = self.policy.resolve(&tab.display_url, !tab.is_proxy_active);
        self.replace_current(tab, &resolution);

        tracing::info!(tab_id = %tab.id, proxied = tab.is_proxy_active, "Toggled proxy override");
        true
    }

    /// Load the current address again, keeping the proxy state.
    pub fn reload(&self, tab: &mut Tab) -> bool {
        if tab.is_blank() {
            return false;
        }
        let resolution = self.policy.resolve(&tab.display_url, tab.is_proxy_active);
        self.replace_current(tab, &resolution);
        true
    }

    fn move_to(&self, tab: &mut Tab, index: usize) {
        let Some(entry) = tab.history.get(index).cloned() else {
            return;
        };
        tab.history_index = index;
        let resolution = self.policy.resolve(&entry, false);
        self.replace_current(tab, &resolution);

        tracing::debug!(tab_id = %tab.id, index, url = %tab.display_url, "Moved through history");
    }

    fn replace_current(&self, tab: &mut Tab, resolution: &Resolution) {
        if let Some(slot) = tab.history.get_mut(tab.history_index) {
            *slot = resolution.history_entry().to_string();
        }
        tab.apply(resolution);
    }
}
