//! CLI configuration: TOML file with environment overrides.
//!
//! ## Configuration file format
//! ```toml
//! # hotsync.toml
//! [hotmart]
//! base_url = "https://api.hotmart.com"
//!
//! [woocommerce]
//! base_url = "https://shop.example.com"
//! consumer_key = "ck_..."
//! consumer_secret = "cs_..."
//!
//! [sync]
//! interval_secs = 3600
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use hotsync_core::sync::SYNC_INTERVAL_SECS;

const CONFIG_FILE: &str = "hotsync.toml";
const SECRETS_FILE: &str = "credentials.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotmartConfig {
    pub base_url: String,
}

impl Default for HotmartConfig {
    fn default() -> Self {
        Self {
            base_url: hotsync_hotmart::DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WooConfig {
    pub base_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: SYNC_INTERVAL_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotmart: HotmartConfig,
    pub woocommerce: WooConfig,
    pub sync: SyncConfig,

    /// Directory the config was loaded from; secrets live next to it.
    #[serde(skip)]
    config_dir: PathBuf,
}

fn env_url(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    fn default_dir() -> Result<PathBuf> {
        directories::ProjectDirs::from("", "", "hotsync")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .context("could not determine a configuration directory for this platform")
    }

    /// Load the configuration, falling back to defaults when no file exists
    /// yet. Environment variables `HOTSYNC_HOTMART_URL` and
    /// `HOTSYNC_WOO_URL` override the file.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let (path, dir) = match explicit_path {
            Some(path) => {
                let dir = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                (path.to_path_buf(), dir)
            }
            None => {
                let dir = Self::default_dir()?;
                (dir.join(CONFIG_FILE), dir)
            }
        };

        let mut config = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str::<Config>(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        } else {
            log::debug!("no config file at {}, using defaults", path.display());
            Config::default()
        };
        config.config_dir = dir;

        if let Some(url) = env_url("HOTSYNC_HOTMART_URL") {
            config.hotmart.base_url = url;
        }
        if let Some(url) = env_url("HOTSYNC_WOO_URL") {
            config.woocommerce.base_url = url;
        }

        Ok(config)
    }

    /// Where the credential file lives.
    pub fn secrets_path(&self) -> PathBuf {
        self.config_dir.join(SECRETS_FILE)
    }

    /// The sync commands need a reachable store; fail early with a usable
    /// message instead of a connection error mid-pass.
    pub fn validate_for_sync(&self) -> Result<()> {
        if self.woocommerce.base_url.trim().is_empty() {
            bail!("woocommerce.base_url is not configured");
        }
        if self.woocommerce.consumer_key.trim().is_empty()
            || self.woocommerce.consumer_secret.trim().is_empty()
        {
            bail!("woocommerce consumer_key/consumer_secret are not configured");
        }
        Ok(())
    }
}
