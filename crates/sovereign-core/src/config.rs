//! Browser configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sovereign_routing::PolicyTables;
use sovereign_session::DEFAULT_SESSION_KEY;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Settings key the tab array is saved under
    pub session_key: String,
    /// Target language passed to the rendering proxy
    pub proxy_language: String,
    /// Hosts to proxy in addition to the built-in block-list
    pub extra_proxy_hosts: Vec<String>,
    /// Reopen the previous session's tabs on start
    pub restore_session: bool,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("sovereign.db"),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            proxy_language: PolicyTables::default().proxy_language,
            extra_proxy_hosts: Vec::new(),
            restore_session: true,
        }
    }

    pub fn data_dir() -> PathBuf {
        ProjectDirs::from("", "", "sovereign")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".sovereign"))
    }

    /// Read a TOML config file. A missing file yields the defaults; keys
    /// left out of the file keep their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Config = toml::from_str(&text)?;
        config.validate()?;

        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.session_key.trim().is_empty() {
            return Err(CoreError::Config("session_key cannot be empty".to_string()));
        }
        if self.proxy_language.trim().is_empty() {
            return Err(CoreError::Config(
                "proxy_language cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Routing tables with this configuration applied.
    pub fn policy_tables(&self) -> PolicyTables {
        PolicyTables::default()
            .with_extra_proxy_hosts(&self.extra_proxy_hosts)
            .with_proxy_language(self.proxy_language.trim())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.restore_session);
        assert_eq!(config.session_key, DEFAULT_SESSION_KEY);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sovereign.toml");
        std::fs::write(
            &path,
            "proxy_language = \"en\"\nextra_proxy_hosts = [\"reddit.com\"]\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.proxy_language, "en");
        assert_eq!(config.extra_proxy_hosts, vec!["reddit.com".to_string()]);
        assert_eq!(config.session_key, DEFAULT_SESSION_KEY);

        let tables = config.policy_tables();
        assert_eq!(tables.proxy_language, "en");
        assert!(tables.force_proxy_hosts.contains(&"reddit.com".to_string()));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sovereign.toml");

        std::fs::write(&path, "restore_session = \"sometimes\"").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(CoreError::ConfigParse(_))
        ));

        std::fs::write(&path, "session_key = \"  \"").unwrap();
        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_database_path_under_data_dir() {
        let config = Config::new(PathBuf::from("/tmp/sovereign-data"));
        assert_eq!(
            config.database_path,
            PathBuf::from("/tmp/sovereign-data/sovereign.db")
        );
    }
}
