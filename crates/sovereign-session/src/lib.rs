//! Sovereign Session
//!
//! The [`TabStore`] owns the tab collection, funnels every mutation through
//! the navigation controller, notifies subscribers and auto-saves after each
//! change.

mod error;
mod events;
mod persistence;
mod store;

pub use error::SessionError;
pub use events::{StoreEvent, SubscriptionId};
pub use persistence::{
    MemoryPersistence, SessionPersistence, SqlitePersistence, DEFAULT_SESSION_KEY,
};
pub use store::{LoadTicket, SurfaceTarget, TabStore};

pub type Result<T> = std::result::Result<T, SessionError>;
