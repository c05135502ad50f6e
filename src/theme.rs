//! Theme preference persistence.
//!
//! The preference is a single key in a key-value [`Storage`], the stand-in for
//! browser local storage. Reading never fails: a missing, unreadable or invalid
//! value means dark. Writing never fails either: if storage refuses the write
//! the preference still applies to the page for this session.

use crate::view::{Surface, ids};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "portfolio-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything but the two literals is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Icon class on the toggle control.
    pub fn icon_class(self) -> &'static str {
        match self {
            ThemePreference::Light => "fas fa-sun",
            ThemePreference::Dark => "fas fa-moon",
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage with local-storage semantics.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Session-only storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object on disk, so a preference survives across
/// CLI runs.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut items) => items.remove(key),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "theme storage unreadable");
                None
            }
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking the write.
        let mut items = self.read_all().unwrap_or_default();
        items.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&items)?)?;
        Ok(())
    }
}

/// Storage that refuses every access, like local storage in a locked-down
/// browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl Storage for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

pub struct ThemeStore {
    storage: Box<dyn Storage>,
    current: ThemePreference,
}

impl ThemeStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let mut store = Self {
            storage,
            current: ThemePreference::default(),
        };
        store.current = store.get();
        store
    }

    /// The persisted preference, dark when absent or invalid.
    pub fn get(&self) -> ThemePreference {
        self.storage
            .get_item(THEME_KEY)
            .and_then(|v| ThemePreference::parse(&v))
            .unwrap_or_default()
    }

    /// The preference applied to the page, which may differ from storage when
    /// a write failed.
    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Apply the persisted preference to the page.
    pub fn init(&mut self, surface: &mut dyn Surface) {
        let pref = self.get();
        self.set(surface, pref);
    }

    /// Apply `pref` to the document and persist it.
    pub fn set(&mut self, surface: &mut dyn Surface, pref: ThemePreference) {
        self.current = pref;
        surface.set_attribute(ids::ROOT, "data-theme", pref.as_str());
        surface.set_attribute(ids::THEME_ICON, "class", pref.icon_class());
        if let Err(e) = self.storage.set_item(THEME_KEY, pref.as_str()) {
            warn!(error = %e, theme = pref.as_str(), "theme not persisted");
        }
        debug!(theme = pref.as_str(), "theme applied");
    }

    /// Flip the applied theme and return the new one.
    pub fn toggle(&mut self, surface: &mut dyn Surface) -> ThemePreference {
        let next = self.current.toggled();
        self.set(surface, next);
        next
    }
}
