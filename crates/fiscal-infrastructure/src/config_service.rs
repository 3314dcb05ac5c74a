//! Configuration service implementation.
//!
//! Loads `ShellConfig` from `config.toml` in the shell's config directory.

use std::sync::{Arc, RwLock};

use fiscal_core::config::ShellConfig;
use fiscal_core::error::Result;

use crate::paths::FiscalPaths;
use crate::storage::AtomicTomlFile;

/// Loads and caches the shell configuration.
///
/// A missing file is created with defaults. A malformed file is logged and
/// the defaults are used without touching the file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: FiscalPaths,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ShellConfig>>>,
}

impl ConfigService {
    pub fn new(paths: FiscalPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> ShellConfig {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return cached.clone();
        }

        let loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!("[Config] Using defaults: {}", e);
            ShellConfig::default()
        });

        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    fn load_config(&self) -> Result<ShellConfig> {
        let file = AtomicTomlFile::<ShellConfig>::new(self.paths.config_file()?);

        match file.load()? {
            Some(config) => Ok(config),
            None => {
                let config = ShellConfig::default();
                if let Err(e) = file.save(&config) {
                    tracing::warn!(
                        "[Config] Could not write default {}: {}",
                        file.path().display(),
                        e
                    );
                } else {
                    tracing::info!("[Config] Created default {}", file.path().display());
                }
                Ok(config)
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(FiscalPaths::default())
    }
}
