//! Sovereign Storage Layer
//!
//! SQLite-backed persistent key-value store used by the dashboard host.
//! The browsing subsystem keeps its session snapshot in a single slot here.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
