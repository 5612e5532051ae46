// src/core/config_manager.rs
//! Bootstrap configuration - reads the credential and base URL written by the Nimrobo CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::net_client::DEFAULT_NET_API_BASE_URL;
use crate::core::session::FileTokenStore;

const CONFIG_DIR: &str = ".nimrobo";
const CONFIG_FILE: &str = "config.json";
const STATE_FILE: &str = "net-studio/session.json";

/// Contents of `~/.nimrobo/config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(rename = "API_BASE_URL", default)]
    pub api_base_url: Option<String>,
    #[serde(rename = "NET_API_BASE_URL", default)]
    pub net_api_base_url: Option<String>,
    #[serde(rename = "API_KEY", default)]
    pub api_key: Option<String>,
    #[serde(rename = "defaultProject", default)]
    pub default_project: Option<String>,
    #[serde(default)]
    pub context: ConfigContext,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigContext {
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl BootstrapConfig {
    /// Read the bootstrap file. A missing or malformed file means
    /// "unauthenticated", so both yield `None` rather than an error.
    pub fn read(path: &Path) -> Option<Self> {
        if !path.exists() {
            info!("No bootstrap config at {}", path.display());
            return None;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring malformed bootstrap config {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub config_path: PathBuf,
    pub state_path: PathBuf,
    pub bootstrap: Option<BootstrapConfig>,
    base_url_override: Option<String>,
}

impl ConfigManager {
    /// Resolve paths from the environment and read the bootstrap file.
    ///
    /// `NET_STUDIO_CONFIG` points at another bootstrap file,
    /// `NET_STUDIO_STATE` at another token store, and `NET_API_BASE_URL`
    /// overrides the base URL found in the file.
    pub fn load() -> Result<Self> {
        let (config_path, state_path) = resolve_paths(
            std::env::var_os("NET_STUDIO_CONFIG").map(PathBuf::from),
            std::env::var_os("NET_STUDIO_STATE").map(PathBuf::from),
            home_dir(),
        )?;

        let manager = Self::load_from(config_path, state_path)
            .with_base_url(std::env::var("NET_API_BASE_URL").ok());
        info!("Loaded configuration from {}", manager.config_path.display());
        Ok(manager)
    }

    pub fn load_from(config_path: PathBuf, state_path: PathBuf) -> Self {
        let bootstrap = BootstrapConfig::read(&config_path);
        Self {
            config_path,
            state_path,
            bootstrap,
            base_url_override: None,
        }
    }

    /// Replace the bootstrap file location, re-reading it.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.bootstrap = BootstrapConfig::read(&path);
        self.config_path = path;
        self
    }

    /// Override the base URL; `None` and empty strings leave it unchanged.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|url| !url.is_empty()) {
            self.base_url_override = Some(url);
        }
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.bootstrap.as_ref().and_then(BootstrapConfig::api_key)
    }

    pub fn net_api_base_url(&self) -> String {
        self.base_url_override
            .clone()
            .or_else(|| {
                self.bootstrap
                    .as_ref()
                    .and_then(|config| config.net_api_base_url.clone())
                    .filter(|url| !url.is_empty())
            })
            .unwrap_or_else(|| DEFAULT_NET_API_BASE_URL.to_string())
    }

    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(self.state_path.clone())
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Bootstrap and state paths. The home directory is only needed for a path
/// that has no override.
fn resolve_paths(
    config_override: Option<PathBuf>,
    state_override: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf)> {
    let under_home = |file: &str| -> Result<PathBuf> {
        home.as_ref()
            .map(|home| home.join(CONFIG_DIR).join(file))
            .context("Failed to locate home directory (HOME is not set)")
    };

    let config_path = match config_override {
        Some(path) => path,
        None => under_home(CONFIG_FILE)?,
    };
    let state_path = match state_override {
        Some(path) => path,
        None => under_home(STATE_FILE)?,
    };
    Ok((config_path, state_path))
}
