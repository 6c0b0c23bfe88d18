//! Store change notifications

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    TabOpened { tab_id: String },
    TabClosed { tab_id: String },
    ActiveTabChanged { tab_id: String },
    Navigated {
        tab_id: String,
        display_url: String,
        use_proxy: bool,
    },
    /// The active surface reported its content ready
    LoadFinished { tab_id: String },
}

impl StoreEvent {
    pub fn tab_id(&self) -> &str {
        match self {
            StoreEvent::TabOpened { tab_id }
            | StoreEvent::TabClosed { tab_id }
            | StoreEvent::ActiveTabChanged { tab_id }
            | StoreEvent::Navigated { tab_id, .. }
            | StoreEvent::LoadFinished { tab_id } => tab_id,
        }
    }
}

/// Handle returned by `TabStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
