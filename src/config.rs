//! Application configuration management.
//!
//! This module handles loading and saving the client configuration: the API
//! base URL and which storage back-end holds the session token.
//!
//! Configuration is stored at `~/.config/wasatext/config.json`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "wasatext";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "WASATEXT_API_URL";

/// API base URL baked in at build time
pub static DEFAULT_API_URL: &str = match option_env!("WASATEXT_API_URL") {
    Some(x) => x,
    None => "http://localhost:3000",
};

/// Where the session token is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file in the cache directory
    #[default]
    File,
    /// OS keychain
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_url: Option<String>,
    #[serde(default)]
    pub storage: StorageBackend,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply a `wasatext config set <key> <value>` change
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => {
                let value = value.trim();
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    anyhow::bail!("api_url must start with http:// or https://");
                }
                self.api_url = Some(value.to_string());
            }
            "storage" => {
                self.storage = match value {
                    "file" => StorageBackend::File,
                    "keyring" => StorageBackend::Keyring,
                    other => anyhow::bail!("Unknown storage back-end {} (expected file or keyring)", other),
                };
            }
            other => anyhow::bail!("Unknown config key {} (expected api_url or storage)", other),
        }
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Base URL for API requests: environment, then config file, then build default
    pub fn api_url(&self) -> String {
        let from_env = std::env::var(API_URL_ENV).ok();
        Self::resolve_api_url(from_env.as_deref(), self.api_url.as_deref())
    }

    fn resolve_api_url(from_env: Option<&str>, from_file: Option<&str>) -> String {
        from_env
            .filter(|url| !url.trim().is_empty())
            .or(from_file.filter(|url| !url.trim().is_empty()))
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }
}
