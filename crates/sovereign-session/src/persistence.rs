//! Session persistence adapters
//!
//! The session is one JSON array of tabs in a key-value slot. Reads never
//! fail: a missing, corrupt or empty value means "no prior session".

use std::sync::Arc;

use parking_lot::Mutex;
use sovereign_storage::Database;
use sovereign_tabs::{Tab, TabCollection};

use crate::error::SessionError;
use crate::Result;

/// Key of the tab array in the settings table.
pub const DEFAULT_SESSION_KEY: &str = "sovereign.browser.tabs";

const ACTIVE_KEY_SUFFIX: &str = ".active";

pub trait SessionPersistence {
    /// Last saved collection, already sanitized. `None` if there is nothing
    /// usable.
    fn load(&self) -> Option<TabCollection>;

    /// Best-effort write of the whole collection.
    fn save(&self, collection: &TabCollection) -> Result<()>;
}

/// Decode a stored tab array. Logs and drops anything unreadable.
fn decode(raw: &str, active_tab_id: Option<String>) -> Option<TabCollection> {
    let tabs: Vec<Tab> = match serde_json::from_str(raw) {
        Ok(tabs) => tabs,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable saved session");
            return None;
        }
    };

    TabCollection::from_parts(tabs, active_tab_id)
}

/// Persistence in the `settings` table of the browser database.
#[derive(Clone)]
pub struct SqlitePersistence {
    db: Database,
    key: String,
    active_key: String,
}

impl SqlitePersistence {
    pub fn new(db: Database) -> Self {
        Self::with_key(db, DEFAULT_SESSION_KEY)
    }

    pub fn with_key(db: Database, key: impl Into<String>) -> Self {
        let key = key.into();
        let active_key = format!("{}{}", key, ACTIVE_KEY_SUFFIX);
        Self {
            db,
            key,
            active_key,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Forget the saved session.
    pub fn clear(&self) -> Result<()> {
        self.db.delete_setting(&self.key)?;
        self.db.delete_setting(&self.active_key)?;
        Ok(())
    }
}

impl SessionPersistence for SqlitePersistence {
    fn load(&self) -> Option<TabCollection> {
        let raw = match self.db.get_setting(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read saved session");
                return None;
            }
        };
        let active_tab_id = self.db.get_setting(&self.active_key).ok().flatten();

        decode(&raw, active_tab_id)
    }

    fn save(&self, collection: &TabCollection) -> Result<()> {
        let tabs = serde_json::to_string(&collection.tabs)?;
        self.db.set_settings(&[
            (self.key.as_str(), tabs.as_str()),
            (self.active_key.as_str(), collection.active_tab_id.as_str()),
        ])?;

        tracing::debug!(key = %self.key, tab_count = collection.len(), "Saved session");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemorySlot {
    tabs: Option<String>,
    active_tab_id: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// In-process slot. Clones share the same slot, so a test can keep a handle
/// while the store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Arc<Mutex<MemorySlot>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.slot.lock().fail_writes = fail;
    }

    /// Stored tab array as written.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().tabs.clone()
    }

    /// Overwrite the stored tab array, e.g. with data from another version.
    pub fn put_raw(&self, raw: impl Into<String>) {
        self.slot.lock().tabs = Some(raw.into());
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.slot.lock().writes
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Option<TabCollection> {
        let slot = self.slot.lock();
        let raw = slot.tabs.as_deref()?;
        decode(raw, slot.active_tab_id.clone())
    }

    fn save(&self, collection: &TabCollection) -> Result<()> {
        let mut slot = self.slot.lock();
        if slot.fail_writes {
            return Err(SessionError::WriteRejected(
                "memory slot is read-only".to_string(),
            ));
        }

        slot.tabs = Some(serde_json::to_string(&collection.tabs)?);
        slot.active_tab_id = Some(collection.active_tab_id.clone());
        slot.writes += 1;
        Ok(())
    }
}
