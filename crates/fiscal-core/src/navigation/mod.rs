//! Navigation domain module.
//!
//! # Module Structure
//!
//! - `entry`: the static navigation table and active-entry resolution
//! - `router`: `Router` capability (current path + navigate)

mod entry;
mod router;

// Re-export public API
pub use entry::{
    EntryKind, NAVIGATION_ENTRIES, NavIcon, NavSection, NavigationEntry, resolve_active,
};
pub use router::Router;
