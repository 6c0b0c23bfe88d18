//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] sovereign_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] sovereign_tabs::TabError),

    #[error("Session error: {0}")]
    Session(#[from] sovereign_session::SessionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
