//! Application configuration management.
//!
//! This module handles loading and saving the client configuration, which
//! includes the API base URL, the requested token lifetime, and the last
//! used username.
//!
//! Configuration is stored at `~/.config/plater/config.json`; the base URL
//! can be overridden with the `PLATER_BASE_URL` environment variable
//! (a `.env` file is honored).

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "plater";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Production API base URL
const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default requested token lifetime in minutes.
/// 30 minutes matches the backend's default access token expiry.
const DEFAULT_TOKEN_TTL_MINS: u32 = 30;

/// Environment variable overriding the API base URL
const BASE_URL_ENV: &str = "PLATER_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_token_ttl_mins")]
    pub token_ttl_mins: u32,
    pub last_username: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token_ttl_mins() -> u32 {
    DEFAULT_TOKEN_TTL_MINS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_ttl_mins: default_token_ttl_mins(),
            last_username: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Effective API base URL: environment override, then config value.
    pub fn api_base_url(&self) -> String {
        std::env::var(BASE_URL_ENV).unwrap_or_else(|_| self.base_url.clone())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the encrypted session record.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
