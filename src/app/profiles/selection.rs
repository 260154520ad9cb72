//! Sticky profile selection.
//!
//! The chosen profile name is the only durable state of the launcher. It is stored under the
//! fixed key [`SELECTION_KEY`] and survives restarts; [`ProfileSelection::reconcile`] replaces
//! it when the configuration no longer contains it.

use super::resolver::{reconcile_selection, ProfileOption};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const SELECTION_KEY: &str = "aws_profile";

/// Storage for the selected profile name
pub trait SelectionStore: Send {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, selected: Option<&str>) -> Result<()>;
}

/// JSON state file, e.g. `<config_dir>/state.json` holding `{"aws_profile": "dev"}`.
///
/// Other keys already present in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
    path: PathBuf,
}

impl FileSelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `state.json` in the launcher's config directory
    pub fn in_config_dir() -> Option<Self> {
        directories::ProjectDirs::from("com", "", "glue-launcher")
            .map(|dirs| Self::new(dirs.config_dir().join("state.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read selection state {:?}", self.path))?;
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                log_warn!("Ignoring malformed selection state {:?}", self.path);
                Ok(Map::new())
            }
        }
    }
}

impl SelectionStore for FileSelectionStore {
    fn load(&self) -> Result<Option<String>> {
        let state = self.read_state()?;
        Ok(state
            .get(SELECTION_KEY)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string))
    }

    fn save(&self, selected: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        match selected {
            Some(name) => {
                state.insert(SELECTION_KEY.to_string(), Value::String(name.to_string()));
            }
            None => {
                state.remove(SELECTION_KEY);
            }
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(state))
            .context("Failed to serialize selection state")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write selection state {:?}", self.path))?;
        Ok(())
    }
}

/// In-memory store, used when no config directory exists and in tests.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    selected: Mutex<Option<String>>,
}

impl MemorySelectionStore {
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            selected: Mutex::new(initial.map(str::to_string)),
        }
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> Result<Option<String>> {
        let selected = self
            .selected
            .lock()
            .map_err(|e| anyhow::anyhow!("Selection lock poisoned: {}", e))?;
        Ok(selected.clone())
    }

    fn save(&self, selected: Option<&str>) -> Result<()> {
        let mut slot = self
            .selected
            .lock()
            .map_err(|e| anyhow::anyhow!("Selection lock poisoned: {}", e))?;
        *slot = selected.map(str::to_string);
        Ok(())
    }
}

/// The selected profile name plus its backing store.
pub struct ProfileSelection {
    store: Box<dyn SelectionStore>,
    selected: Option<String>,
}

impl ProfileSelection {
    /// Load the persisted selection. A store that cannot be read starts empty.
    pub fn new(store: Box<dyn SelectionStore>) -> Self {
        let selected = match store.load() {
            Ok(selected) => selected,
            Err(e) => {
                log_warn!("Failed to load persisted profile selection: {:#}", e);
                None
            }
        };
        Self { store, selected }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replace the selection and persist it. Returns true when the value changed.
    pub fn set(&mut self, selected: Option<String>) -> bool {
        let selected = selected.filter(|name| !name.is_empty());
        if selected == self.selected {
            return false;
        }
        if let Err(e) = self.store.save(selected.as_deref()) {
            // The in-memory choice still applies for this session
            log_warn!("Failed to persist profile selection: {:#}", e);
        }
        self.selected = selected;
        true
    }

    /// Heal the selection against a freshly resolved list. Returns true when it changed.
    pub fn reconcile(&mut self, options: &[ProfileOption]) -> bool {
        let reconciled = reconcile_selection(self.selected(), options);
        if reconciled != self.selected {
            log_info!(
                "Profile selection {:?} replaced by {:?}",
                self.selected,
                reconciled
            );
        }
        self.set(reconciled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn option(name: &str) -> ProfileOption {
        ProfileOption {
            name: name.to_string(),
            region: None,
            source_profile: None,
        }
    }

    #[test]
    fn test_file_store_round_trip_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"window_width": 800}"#).unwrap();

        let store = FileSelectionStore::new(&path);
        store.save(Some("dev")).unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("dev"));
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["window_width"], 800);
        assert_eq!(raw[SELECTION_KEY], "dev");
    }

    #[test]
    fn test_file_store_clear_removes_key() {
        let dir = TempDir::new().unwrap();
        let store = FileSelectionStore::new(dir.path().join("state.json"));

        store.save(Some("dev")).unwrap();
        store.save(None).unwrap();

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_or_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let store = FileSelectionStore::new(&path);
        assert_eq!(store.load().unwrap(), None);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_reconcile_persists_replacement() {
        let mut selection = ProfileSelection::new(Box::new(MemorySelectionStore::new(Some("gone"))));

        assert!(selection.reconcile(&[option("a"), option("b")]));
        assert_eq!(selection.selected(), Some("a"));
        assert!(!selection.reconcile(&[option("b"), option("a")]));
        assert_eq!(selection.selected(), Some("a"));
    }

    #[test]
    fn test_reconcile_empty_list_clears() {
        let mut selection = ProfileSelection::new(Box::new(MemorySelectionStore::new(Some("a"))));

        assert!(selection.reconcile(&[]));
        assert_eq!(selection.selected(), None);
    }
}
