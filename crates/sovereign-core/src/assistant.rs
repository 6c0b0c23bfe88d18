//! Assistant context bridge
//!
//! The assistant panel sees what the user is looking at through a shared
//! borrow of the store. It navigates only by asking the store like any other
//! caller.

use serde::Serialize;
use sovereign_session::TabStore;
use sovereign_tabs::NEW_TAB_LABEL;

/// What the assistant knows about the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssistantContext {
    pub current_display_url: String,
    pub current_title: String,
}

impl AssistantContext {
    /// Address to mention in the assistant prompt.
    pub fn page_label(&self) -> &str {
        if self.current_display_url.is_empty() {
            NEW_TAB_LABEL
        } else {
            &self.current_display_url
        }
    }
}

pub struct AssistantContextBridge<'a> {
    store: &'a TabStore,
}

impl<'a> AssistantContextBridge<'a> {
    pub fn new(store: &'a TabStore) -> Self {
        Self { store }
    }

    pub fn snapshot(&self) -> AssistantContext {
        let tab = self.store.active_tab();
        AssistantContext {
            current_display_url: tab.display_url.clone(),
            current_title: tab.title.clone(),
        }
    }
}
