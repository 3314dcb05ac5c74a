//! Sidebar collapse preference.

use fiscal_core::preference::{PreferenceStore, decode_flag, encode_flag};

/// In-memory collapse flag mirrored to a preference store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsePreference {
    key: String,
    collapsed: bool,
}

impl CollapsePreference {
    /// Reads the persisted flag. Anything but the literal `"true"` (including
    /// no value at all) starts expanded.
    pub fn load(store: &dyn PreferenceStore, key: impl Into<String>) -> Self {
        let key = key.into();
        let collapsed = decode_flag(store.get(&key).as_deref());
        tracing::debug!("[Collapse] Loaded {} = {}", key, collapsed);
        Self { key, collapsed }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Flips the flag and writes it through immediately.
    ///
    /// A failed write is logged; the in-memory value still flips.
    pub fn toggle(&mut self, store: &dyn PreferenceStore) -> bool {
        self.collapsed = !self.collapsed;
        if let Err(e) = store.set(&self.key, &encode_flag(self.collapsed)) {
            tracing::warn!("[Collapse] Failed to persist {}: {}", self.key, e);
        }
        self.collapsed
    }
}
