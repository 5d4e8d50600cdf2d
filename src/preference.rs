//! Persisted persona preference.
//!
//! The preference is the only durable state. Reads are tolerant: anything
//! missing or unparsable is treated as "no preference" and the caller keeps
//! its default.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

use crate::config::STORAGE_KEY;
use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default)]
    pub persona: String,
}

impl Preference {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
        }
    }
}

/// Where the preference lives between sessions.
pub trait PreferenceStore {
    /// Returns `None` when nothing usable is stored.
    fn load(&self) -> Option<Preference>;

    /// Overwrites the stored preference with the full record.
    fn save(&self, preference: &Preference) -> Result<()>;
}

/// Browser `localStorage`, one JSON object under a fixed key.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::with_key(STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self) -> Option<Preference> {
        match LocalStorage::get::<Preference>(&self.key) {
            Ok(preference) => Some(preference),
            Err(err) => {
                tracing::debug!("Ignoring stored preference under '{}': {}", self.key, err);
                None
            }
        }
    }

    fn save(&self, preference: &Preference) -> Result<()> {
        LocalStorage::set(&self.key, preference)?;
        Ok(())
    }
}

/// JSON file on disk, for native builds.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Option<Preference> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!("No preference file at {:?}: {}", self.path, err);
                return None;
            }
        };
        parse_preference(&content)
    }

    fn save(&self, preference: &Preference) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(preference)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Keeps the raw JSON in memory, so malformed content can be seeded.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    /// The JSON text as last written.
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Option<Preference> {
        self.raw.borrow().as_deref().and_then(parse_preference)
    }

    fn save(&self, preference: &Preference) -> Result<()> {
        let json = serde_json::to_string(preference)?;
        *self.raw.borrow_mut() = Some(json);
        Ok(())
    }
}

fn parse_preference(raw: &str) -> Option<Preference> {
    // `null` parses fine as an Option, but means nothing was stored.
    match serde_json::from_str::<Option<Preference>>(raw) {
        Ok(preference) => preference,
        Err(err) => {
            tracing::debug!("Ignoring malformed preference: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());

        store.save(&Preference::new("學術精準")).unwrap();
        assert_eq!(store.raw().as_deref(), Some(r#"{"persona":"學術精準"}"#));
        assert_eq!(store.load(), Some(Preference::new("學術精準")));
    }

    #[test]
    fn malformed_content_is_ignored() {
        for raw in ["", "null", "{not json", "42", r#"{"persona": 7}"#] {
            assert!(MemoryStore::with_raw(raw).load().is_none(), "raw: {raw}");
        }
    }

    #[test]
    fn missing_persona_field_loads_empty() {
        let store = MemoryStore::with_raw(r#"{"theme":"dark"}"#);
        assert_eq!(store.load(), Some(Preference::default()));
    }

    #[test]
    fn file_store_missing_file_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::with_path(temp_dir.path().join("prefs.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_creates_parent_dirs_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("hanbox").join("prefs.json");
        let store = FileStore::with_path(&path);

        store
            .save(&Preference::new("活潑互動的課堂助教（提問式引導）"))
            .expect("Should save preference");

        assert!(path.exists());
        let reopened = FileStore::with_path(&path);
        assert_eq!(
            reopened.load().map(|p| p.persona),
            Some("活潑互動的課堂助教（提問式引導）".to_string())
        );
    }

    #[test]
    fn file_store_malformed_file_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        fs::write(&path, "persona = 'toml?'").unwrap();
        assert!(FileStore::with_path(path).load().is_none());
    }
}
