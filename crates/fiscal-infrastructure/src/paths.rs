//! Unified path management for shell files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/fiscal-flow/        # Config directory (dirs::config_dir)
//! ├── config.toml               # ShellConfig
//! └── preferences.toml          # PreferenceStore backing file
//! ```

use std::path::PathBuf;

/// Application directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "fiscal-flow";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for fiscal_core::ShellError {
    fn from(err: PathError) -> Self {
        fiscal_core::ShellError::config(err.to_string())
    }
}

/// Resolves the files the shell reads and writes.
///
/// `base_dir` overrides the platform config directory (tests, `--config-dir`).
#[derive(Debug, Clone, Default)]
pub struct FiscalPaths {
    base_dir: Option<PathBuf>,
}

impl FiscalPaths {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the shell's configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/fiscal-flow/`
    /// - `Err(PathError::ConfigDirNotFound)`: no override and no platform directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path to `preferences.toml`.
    pub fn preferences_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("preferences.toml"))
    }
}
