//! Sovereign Core
//!
//! Wires storage, routing and the tab store into one [`Browser`] and exposes
//! the read-only context the assistant panel works from.

mod assistant;
mod browser;
mod config;
mod error;

pub use assistant::{AssistantContext, AssistantContextBridge};
pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;

pub use sovereign_routing::{
    classify, InputKind, PolicyTables, QuickLink, Resolution, RoutingPolicy, QUICK_LINKS,
};
pub use sovereign_session::{
    LoadTicket, MemoryPersistence, SessionError, SessionPersistence, SqlitePersistence,
    StoreEvent, SubscriptionId, SurfaceTarget, TabStore,
};
pub use sovereign_storage::{Database, StorageError};
pub use sovereign_tabs::{Tab, TabCollection, TabError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
