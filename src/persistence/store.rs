//! Store implementations
//!
//! - `MemoryStore`: tests and throwaway sessions
//! - `FileStore`: one JSON object on disk, rewritten through a temp file

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unparseable value {value:?} under key {key}")]
    Parse { key: String, value: String },

    #[error("Store unavailable")]
    Unavailable,

    #[error("No home or config directory for the default store; pass a path")]
    NoHomeDir,
}

/// String-keyed storage service
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove several keys at once; missing keys are not an error
    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.remove_many(&[key])
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    /// When set, every call fails with `StoreError::Unavailable`
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate storage going away (all reads and writes fail)
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError> {
        self.check()?;
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

/// JSON object file. The whole map is cached and rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(json) if json.trim().is_empty() => BTreeMap::new(),
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No store at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        log::debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// `~/.umbrella_drop.json`, else `<config dir>/umbrella_drop.json`
    pub fn default_path() -> Result<PathBuf, StoreError> {
        default_path_in(dirs::home_dir(), dirs::config_dir())
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError> {
        let mut changed = false;
        for key in keys {
            changed |= self.entries.remove(*key).is_some();
        }
        if changed { self.flush() } else { Ok(()) }
    }
}

fn default_path_in(
    home: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<PathBuf, StoreError> {
    if let Some(home) = home.filter(|p| p.is_absolute()) {
        return Ok(home.join(".umbrella_drop.json"));
    }
    config
        .filter(|p| p.is_absolute())
        .map(|config| config.join("umbrella_drop.json"))
        .ok_or(StoreError::NoHomeDir)
}
