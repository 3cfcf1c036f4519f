use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

pub const PREFS_ENV: &str = "VITRINE_PREFS";

/// String key/value storage for UI preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat JSON object on disk, e.g. `{"productCardClosed": "true"}`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let text = std::fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.load()?;
        Ok(map.get(key).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// `$VITRINE_PREFS`, then `vitrine/prefs.json` under the platform config directory.
pub fn default_prefs_path() -> Option<PathBuf> {
    resolve_prefs_path(None, non_empty_env(PREFS_ENV), dirs::config_dir())
}

/// An explicit path wins over the environment override, which wins over the config dir.
pub fn resolve_prefs_path(
    explicit: Option<PathBuf>,
    env_override: Option<String>,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit
        .or_else(|| env_override.map(PathBuf::from))
        .or_else(|| config_dir.map(|dir| dir.join("vitrine").join("prefs.json")))
}

/// A file store at `path`, or an in-memory one when no location resolved.
pub fn open_store(path: Option<PathBuf>) -> Box<dyn PreferenceStore> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "using preference file");
            Box::new(JsonFileStore::new(path))
        }
        None => {
            warn!("no preference location available, preferences will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
