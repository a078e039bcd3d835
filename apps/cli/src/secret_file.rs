//! File-backed credential store.
//!
//! A headless sync job has no OS keyring to lean on, so the two credentials
//! live in a JSON file next to the config, readable only by the owner.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;

use hotsync_core::secrets::SecretStore;
use hotsync_core::{Error, Result};

pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| Error::secrets(format!("failed to read {}: {}", self.path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::secrets(format!("failed to parse {}: {}", self.path.display(), e)))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::secrets(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| Error::secrets(format!("failed to serialize credentials: {}", e)))?;
        fs::write(&self.path, raw)
            .map_err(|e| Error::secrets(format!("failed to write {}: {}", self.path.display(), e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, permissions).map_err(|e| {
                Error::secrets(format!("failed to restrict {}: {}", self.path.display(), e))
            })?;
        }

        Ok(())
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get_secret(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    async fn set_secret(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}
