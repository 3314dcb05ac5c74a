//! Static navigation table.

use serde::Serialize;

/// Sidebar group an entry belongs to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NavSection {
    /// Main business pages, top of the sidebar.
    Primary,
    /// Settings and session actions, pinned to the bottom.
    Secondary,
}

/// Icon hint for the renderer.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NavIcon {
    Home,
    FileText,
    Printer,
    Users,
    BarChart,
    Settings,
    LogOut,
}

/// What activating an entry does.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Navigates to `path`.
    Link,
    /// Runs the logout flow. Never highlighted.
    Logout,
}

/// One item of the sidebar.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct NavigationEntry {
    /// Route path. Empty for action entries.
    pub path: &'static str,
    pub label: &'static str,
    pub icon: NavIcon,
    pub section: NavSection,
    pub kind: EntryKind,
}

impl NavigationEntry {
    const fn link(
        path: &'static str,
        label: &'static str,
        icon: NavIcon,
        section: NavSection,
    ) -> Self {
        Self {
            path,
            label,
            icon,
            section,
            kind: EntryKind::Link,
        }
    }

    /// Whether this entry is a route link (as opposed to an action).
    pub fn is_link(&self) -> bool {
        self.kind == EntryKind::Link
    }

    /// Whether this entry should be highlighted for `current_path`.
    ///
    /// Exact equality only: `/dashboard/edit` does not match `/dashboard`.
    pub fn matches(&self, current_path: &str) -> bool {
        self.is_link() && self.path == current_path
    }
}

/// The sidebar of the application, in display order.
pub const NAVIGATION_ENTRIES: &[NavigationEntry] = &[
    NavigationEntry::link("/dashboard", "Início", NavIcon::Home, NavSection::Primary),
    NavigationEntry::link("/notes/new", "Nova Nota", NavIcon::FileText, NavSection::Primary),
    NavigationEntry::link("/print", "Impressão", NavIcon::Printer, NavSection::Primary),
    NavigationEntry::link("/customers", "Clientes", NavIcon::Users, NavSection::Primary),
    NavigationEntry::link("/reports", "Relatórios", NavIcon::BarChart, NavSection::Primary),
    NavigationEntry::link(
        "/settings",
        "Configurações",
        NavIcon::Settings,
        NavSection::Secondary,
    ),
    NavigationEntry {
        path: "",
        label: "Sair",
        icon: NavIcon::LogOut,
        section: NavSection::Secondary,
        kind: EntryKind::Logout,
    },
];

/// Returns the entry that corresponds to `current_path`, if any.
///
/// At most one entry is returned even if the table were to contain
/// duplicates; the first in display order wins.
pub fn resolve_active<'a>(
    current_path: &str,
    entries: &'a [NavigationEntry],
) -> Option<&'a NavigationEntry> {
    entries.iter().find(|entry| entry.matches(current_path))
}
