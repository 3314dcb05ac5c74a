//! Application layer of the Fiscal Flow shell.
//!
//! Provides `NavigationShell`, the session-gated frame that wraps every
//! authenticated page: it redirects unauthenticated users to the entry
//! route, keeps the sidebar collapse preference, highlights the active
//! navigation entry and runs the logout flow.

pub mod shell;

pub use shell::{
    CollapsePreference, GateOutcome, LogoutGuard, NavigationShell, SessionGate,
    ShellCollaborators, SidebarItem, SidebarView,
};
