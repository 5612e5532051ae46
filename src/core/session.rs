// src/core/session.rs
//! Session context - owns the bearer credential and mirrors it to a token store

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::core::config_manager::BootstrapConfig;

/// Key the token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "nimrobo_token";

/// Persistent home of the bearer token between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON object on disk, token stored under [`TOKEN_STORAGE_KEY`].
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token store: {}", self.path.display()))?;
        match serde_json::from_str(&content) {
            Ok(Value::Object(entries)) => Ok(entries),
            _ => Ok(Map::new()),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory: {}", parent.display())
            })?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write token store: {}", self.path.display()))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .read_entries()?
            .get(TOKEN_STORAGE_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string))
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_STORAGE_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_STORAGE_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// Store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("token store lock poisoned"))?
            .clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("token store lock poisoned"))? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("token store lock poisoned"))? = None;
        Ok(())
    }
}

/// Credential context handed to the client. The token is read once per
/// request; writes go to memory first and are then mirrored to the store.
pub struct Session {
    token: RwLock<Option<String>>,
    store: Box<dyn TokenStore>,
}

impl Session {
    /// Start from whatever the store already holds.
    pub fn new(store: impl TokenStore + 'static) -> Result<Self> {
        let token = store.load()?;
        Ok(Self {
            token: RwLock::new(token),
            store: Box::new(store),
        })
    }

    /// Session with a fixed token and no persistence.
    pub fn ephemeral(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.is_empty());
        Self {
            token: RwLock::new(token.clone()),
            store: Box::new(MemoryTokenStore::new(token)),
        }
    }

    /// A stored token wins; otherwise the bootstrap file's key is adopted
    /// and persisted so later runs skip the file.
    pub fn bootstrap(
        store: impl TokenStore + 'static,
        config: Option<&BootstrapConfig>,
    ) -> Result<Self> {
        let session = Self::new(store)?;
        if session.is_authenticated() {
            debug!("Using stored token");
            return Ok(session);
        }

        if let Some(key) = config.and_then(BootstrapConfig::api_key) {
            info!("Adopting API key from bootstrap config");
            session.set_token(Some(key.to_string()))?;
        }
        Ok(session)
    }

    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(token) => token.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Replace the credential. `None` or an empty string signs out and
    /// removes the persisted copy.
    pub fn set_token(&self, token: Option<String>) -> Result<()> {
        let token = token.filter(|t| !t.is_empty());
        {
            let mut current = match self.token.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *current = token.clone();
        }

        match token {
            Some(token) => self.store.save(&token),
            None => self.store.clear(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> BootstrapConfig {
        BootstrapConfig {
            api_key: key.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_stored_token_wins_over_bootstrap() {
        let store = MemoryTokenStore::new(Some("stored".to_string()));
        let config = config_with_key(Some("from-file"));
        let session = Session::bootstrap(store, Some(&config)).unwrap();
        assert_eq!(session.token().as_deref(), Some("stored"));
    }

    #[test]
    fn test_bootstrap_key_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state/session.json");
        let config = config_with_key(Some("from-file"));

        let session = Session::bootstrap(FileTokenStore::new(path.clone()), Some(&config)).unwrap();
        assert_eq!(session.token().as_deref(), Some("from-file"));
        assert_eq!(
            FileTokenStore::new(path).load().unwrap().as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn test_no_token_anywhere() {
        let session = Session::bootstrap(MemoryTokenStore::default(), None).unwrap();
        assert!(!session.is_authenticated());

        let config = config_with_key(None);
        let session = Session::bootstrap(MemoryTokenStore::default(), Some(&config)).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_ephemeral_token_is_no_token() {
        let session = Session::ephemeral(Some(String::new()));
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_clearing_removes_persisted_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"nimrobo_token": "abc123", "theme": "dark"}"#).unwrap();

        let session = Session::new(FileTokenStore::new(path.clone())).unwrap();
        assert_eq!(session.token().as_deref(), Some("abc123"));

        session.set_token(Some(String::new())).unwrap();
        assert!(!session.is_authenticated());

        let stored: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(stored.get(TOKEN_STORAGE_KEY).is_none());
        assert_eq!(stored["theme"], "dark");
    }
}
