//! Render-agnostic snapshot of the sidebar.

use fiscal_core::navigation::{NavSection, NavigationEntry};
use serde::Serialize;

/// Accessible label of the toggle button while collapsed.
pub const EXPAND_LABEL: &str = "Expandir menu";
/// Accessible label of the toggle button while expanded.
pub const COLLAPSE_LABEL: &str = "Retrair menu";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SidebarItem {
    pub entry: NavigationEntry,
    pub active: bool,
    /// Labels are hidden when the sidebar is collapsed; icons remain.
    pub show_label: bool,
}

/// What a renderer needs to draw the sidebar for one path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SidebarView {
    pub collapsed: bool,
    pub toggle_label: &'static str,
    pub primary: Vec<SidebarItem>,
    pub secondary: Vec<SidebarItem>,
}

impl SidebarView {
    pub fn build(entries: &[NavigationEntry], current_path: &str, collapsed: bool) -> Self {
        let item = |entry: &NavigationEntry| SidebarItem {
            entry: *entry,
            active: entry.matches(current_path),
            show_label: !collapsed,
        };
        let in_section = |section: NavSection| {
            entries
                .iter()
                .filter(|entry| entry.section == section)
                .map(&item)
                .collect::<Vec<_>>()
        };

        Self {
            collapsed,
            toggle_label: if collapsed { EXPAND_LABEL } else { COLLAPSE_LABEL },
            primary: in_section(NavSection::Primary),
            secondary: in_section(NavSection::Secondary),
        }
    }

    /// All items in display order.
    pub fn items(&self) -> impl Iterator<Item = &SidebarItem> {
        self.primary.iter().chain(self.secondary.iter())
    }

    pub fn active(&self) -> Option<&SidebarItem> {
        self.items().find(|item| item.active)
    }
}
