use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use garden_core::progression::ProgressionState;

use crate::error::StoreError;

/// Load/save collaborator for player progression.
pub trait ProgressionStore: Send {
    /// Load progression, falling back to defaults on missing or malformed data.
    fn load(&mut self) -> ProgressionState;

    /// Persist progression.
    fn save(&mut self, progression: &ProgressionState) -> Result<(), StoreError>;
}

/// Progression stored as a pretty-printed JSON file.
#[derive(Debug, Clone)]
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
}

impl ProgressionStore for JsonFileStore {
    fn load(&mut self) -> ProgressionState {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no save file; using default progression");
                return ProgressionState::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read save file; using default progression");
                return ProgressionState::default();
            }
        };
        match serde_json::from_str::<Value>(&json) {
            Ok(value) => progression_from_value(value),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "save file is not valid JSON; using default progression");
                ProgressionState::default()
            }
        }
    }

    fn save(&mut self, progression: &ProgressionState) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(progression)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Build progression from arbitrary JSON, keeping every field that parses
/// and defaulting the rest.
pub fn progression_from_value(value: Value) -> ProgressionState {
    let mut progression = ProgressionState::default();
    let Value::Object(map) = value else {
        warn!("save data is not an object; using default progression");
        return progression;
    };

    fn field<T: DeserializeOwned>(map: &serde_json::Map<String, Value>, key: &str) -> Option<T> {
        let value = map.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(field = key, error = %e, "malformed save field; using default");
                None
            }
        }
    }

    if let Some(coins) = field(&map, "coins") {
        progression.coins = coins;
    }
    if let Some(unlocked) = field(&map, "unlocked") {
        progression.unlocked = unlocked;
    }
    if let Some(levels) = field(&map, "levels") {
        progression.levels = levels;
    }
    if let Some(max_level_reached) = field(&map, "max_level_reached") {
        progression.max_level_reached = max_level_reached;
    }
    if let Some(current_level) = field(&map, "current_level") {
        progression.current_level = current_level;
    }
    progression.sanitized()
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// while the engine owns the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    saved: Option<ProgressionState>,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that loads `progression` until something else is saved.
    pub fn with(progression: ProgressionState) -> Self {
        let store = Self::default();
        if let Ok(mut slot) = store.inner.lock() {
            slot.saved = Some(progression);
        }
        store
    }

    /// Most recently saved progression.
    pub fn saved(&self) -> Option<ProgressionState> {
        self.inner.lock().ok().and_then(|slot| slot.saved.clone())
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner.lock().map(|slot| slot.save_count).unwrap_or(0)
    }
}

impl ProgressionStore for MemoryStore {
    fn load(&mut self) -> ProgressionState {
        self.saved().unwrap_or_default()
    }

    fn save(&mut self, progression: &ProgressionState) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.inner.lock() {
            slot.saved = Some(progression.clone());
            slot.save_count += 1;
        }
        Ok(())
    }
}
