//! Preference store implementations.
//!
//! - [`TomlPreferenceStore`]: persisted to `preferences.toml`
//! - [`InMemoryPreferenceStore`]: process-local, for tests and previews

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use fiscal_core::error::Result;
use fiscal_core::preference::PreferenceStore;

use crate::paths::FiscalPaths;
use crate::storage::{AtomicTomlError, AtomicTomlFile};

type PreferenceMap = BTreeMap<String, String>;

/// Preferences persisted as a flat TOML table.
///
/// Values are cached in memory at open time; every `set` writes through to
/// disk before returning, so the file and the cache never disagree after a
/// successful call.
///
/// # Example
///
/// ```ignore
/// use fiscal_infrastructure::TomlPreferenceStore;
///
/// let store = TomlPreferenceStore::open(path);
/// store.set("sidebarCollapsed", "true")?;
/// ```
#[derive(Debug)]
pub struct TomlPreferenceStore {
    file: AtomicTomlFile<PreferenceMap>,
    cache: RwLock<PreferenceMap>,
}

impl TomlPreferenceStore {
    /// Opens (without creating) the preferences file at `path`.
    ///
    /// A missing file is an empty store. A malformed file is logged and
    /// treated as empty; it is replaced on the next write.
    pub fn open(path: PathBuf) -> Self {
        let file = AtomicTomlFile::new(path);
        let cache = match file.load() {
            Ok(loaded) => loaded.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "[Preferences] Ignoring unreadable {}: {}",
                    file.path().display(),
                    e
                );
                PreferenceMap::new()
            }
        };

        Self {
            file,
            cache: RwLock::new(cache),
        }
    }

    /// Opens the store at the default location.
    pub fn from_paths(paths: &FiscalPaths) -> Result<Self> {
        Ok(Self::open(paths.preferences_file()?))
    }

    fn write_through(&self, key: &str, value: &str) -> std::result::Result<PreferenceMap, AtomicTomlError> {
        let result = self.file.update(PreferenceMap::new(), |prefs| {
            prefs.insert(key.to_string(), value.to_string());
            Ok(())
        });

        match result {
            Err(AtomicTomlError::Parse(e)) => {
                tracing::warn!(
                    "[Preferences] Overwriting malformed {}: {}",
                    self.file.path().display(),
                    e
                );
                let mut prefs = self.snapshot();
                prefs.insert(key.to_string(), value.to_string());
                self.file.save(&prefs)?;
                Ok(prefs)
            }
            other => other,
        }
    }

    fn snapshot(&self) -> PreferenceMap {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let persisted = self.write_through(key, value)?;
        *self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = persisted;
        tracing::debug!("[Preferences] {} = {}", key, value);
        Ok(())
    }
}

/// Process-local preference store.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value, for tests and previews.
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into());
        self
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
