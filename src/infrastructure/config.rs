// src/infrastructure/config.rs
use crate::constants::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration for the comment board
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    /// Backend API root, e.g. `http://localhost:8000/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// `<config dir>/comment-board/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("comment-board").join("config.toml"))
    }

    /// Load the explicitly named file, else the default file if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from default path");
                Self::load(path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Pick the backend root: an explicit value wins over the file.
    pub fn resolve_base_url(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(self.api.base_url.as_str())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn given_file_with_base_url_when_loading_then_reads_it() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://board.test:9000/api\"").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.api.base_url, "http://board.test:9000/api");
    }

    #[test]
    fn given_empty_file_when_loading_then_uses_defaults() {
        let file = NamedTempFile::new().unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn given_invalid_toml_when_loading_then_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url =").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn given_missing_explicit_file_when_discovering_then_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let result = Config::discover(Some(missing.as_path()));
        assert!(result.is_err());
    }

    #[test]
    fn given_explicit_url_when_resolving_then_overrides_file() {
        let config = Config::default();

        assert_eq!(
            config.resolve_base_url(Some("http://other:1/api")),
            "http://other:1/api"
        );
        assert_eq!(config.resolve_base_url(Some("  ")), DEFAULT_BASE_URL);
        assert_eq!(config.resolve_base_url(None), DEFAULT_BASE_URL);
    }
}
