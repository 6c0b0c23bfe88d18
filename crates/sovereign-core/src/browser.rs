//! Main browser state container
//!
//! The host renders whatever the store says; all browsing state lives here.

use sovereign_routing::{QuickLink, RoutingPolicy, QUICK_LINKS};
use sovereign_session::{SqlitePersistence, TabStore};
use sovereign_storage::Database;

use crate::assistant::{AssistantContext, AssistantContextBridge};
use crate::config::Config;
use crate::Result;

pub struct Browser {
    config: Config,
    db: Database,
    store: TabStore,
}

impl Browser {
    /// Open the database named by `config` and restore the last session.
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    /// A browser backed by an in-memory database, for tests and previews.
    pub fn in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Self::with_database(Config::default(), db)
    }

    fn with_database(config: Config, db: Database) -> Result<Self> {
        let persistence = SqlitePersistence::with_key(db.clone(), config.session_key.clone());
        if !config.restore_session {
            persistence.clear()?;
        }

        let policy = RoutingPolicy::with_tables(config.policy_tables());
        let store = TabStore::restore(persistence, policy);

        tracing::info!(
            database = %config.database_path.display(),
            tab_count = store.list_tabs().len(),
            "Browser initialized"
        );

        Ok(Self { config, db, store })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn store(&self) -> &TabStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TabStore {
        &mut self.store
    }

    pub fn assistant_context(&self) -> AssistantContext {
        AssistantContextBridge::new(&self.store).snapshot()
    }

    /// Shortcuts for the blank-tab page.
    pub fn quick_links(&self) -> &'static [QuickLink] {
        QUICK_LINKS
    }
}
