//! Preference store capability.
//!
//! A tiny synchronous key/value store, the moral equivalent of browser
//! local storage. The shell keeps exactly one boolean in it.

use crate::error::Result;

/// Default key under which the sidebar collapse flag is stored.
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

/// Synchronous string key/value storage.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value, `None` if the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage could not be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Decodes a persisted boolean.
///
/// Only the literal `"true"` is true; anything else, including `"TRUE"` and
/// garbage, is false.
pub fn decode_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Encodes a boolean the way [`decode_flag`] reads it.
pub fn encode_flag(value: bool) -> String {
    value.to_string()
}
