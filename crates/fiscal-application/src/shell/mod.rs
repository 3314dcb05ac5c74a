//! Navigation shell.
//!
//! `NavigationShell` is mounted once per authenticated view tree and
//! unmounted when the user leaves it. While mounted it:
//! - redirects to the entry route when there is no session
//! - owns the sidebar collapse flag
//! - resolves the active navigation entry from the current path
//! - runs the logout flow

mod collapse;
mod session_gate;
mod shell_test;
mod view;

pub use collapse::CollapsePreference;
pub use session_gate::{GateOutcome, LogoutGuard, SessionGate};
pub use view::{COLLAPSE_LABEL, EXPAND_LABEL, SidebarItem, SidebarView};

use std::sync::Arc;

use fiscal_core::config::ShellConfig;
use fiscal_core::error::{Result, ShellError};
use fiscal_core::navigation::{
    EntryKind, NAVIGATION_ENTRIES, NavigationEntry, Router, resolve_active,
};
use fiscal_core::notification::Notifier;
use fiscal_core::preference::PreferenceStore;
use fiscal_core::session::SessionOracle;

/// External collaborators the shell is written against.
#[derive(Clone)]
pub struct ShellCollaborators {
    pub oracle: Arc<dyn SessionOracle>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub router: Arc<dyn Router>,
    pub notifier: Arc<dyn Notifier>,
}

/// Session-gated frame around every authenticated page.
pub struct NavigationShell {
    collaborators: ShellCollaborators,
    config: ShellConfig,
    collapse: CollapsePreference,
    gate: SessionGate,
}

impl NavigationShell {
    /// Mounts the shell.
    ///
    /// Subscribes to auth transitions, starts the session query in the
    /// background and loads the collapse preference.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Internal` when called outside a tokio runtime.
    pub fn mount(collaborators: ShellCollaborators, config: ShellConfig) -> Result<Self> {
        tracing::info!(
            "[Shell] Mounting at {}",
            collaborators.router.current_path()
        );

        let gate = SessionGate::engage(
            collaborators.oracle.clone(),
            collaborators.router.clone(),
            config.entry_route.clone(),
        )?;
        let collapse = CollapsePreference::load(
            collaborators.preferences.as_ref(),
            config.collapse_preference_key.clone(),
        );

        Ok(Self {
            collaborators,
            config,
            collapse,
            gate,
        })
    }

    /// Waits for the mount-time session query to settle.
    pub async fn session_checked(&mut self) -> Result<GateOutcome> {
        self.gate.initial_check().await
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapse.is_collapsed()
    }

    /// Flips the sidebar and persists the new state. Returns the new state.
    pub fn toggle_sidebar(&mut self) -> bool {
        let collapsed = self
            .collapse
            .toggle(self.collaborators.preferences.as_ref());
        tracing::debug!("[Shell] Sidebar collapsed = {}", collapsed);
        collapsed
    }

    pub fn current_path(&self) -> String {
        self.collaborators.router.current_path()
    }

    /// The navigation entry matching the current path exactly, if any.
    pub fn active_entry(&self) -> Option<&'static NavigationEntry> {
        resolve_active(&self.current_path(), NAVIGATION_ENTRIES)
    }

    pub fn is_active(&self, path: &str) -> bool {
        self.active_entry().is_some_and(|entry| entry.path == path)
    }

    /// Snapshot for the renderer, computed from the current path.
    pub fn sidebar_view(&self) -> SidebarView {
        SidebarView::build(NAVIGATION_ENTRIES, &self.current_path(), self.is_collapsed())
    }

    /// Activates a sidebar entry: links navigate, the logout entry logs out.
    pub async fn select(&self, entry: &NavigationEntry) -> Result<()> {
        match entry.kind {
            EntryKind::Link => {
                self.collaborators.router.navigate(entry.path);
                Ok(())
            }
            EntryKind::Logout => self.logout().await,
        }
    }

    /// Ends the session.
    ///
    /// On success the user is notified and sent to the entry route, in that
    /// order. On failure a destructive notification is shown and nothing
    /// else changes; the user may retry.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::SignOutFailed` when the provider rejects the request.
    pub async fn logout(&self) -> Result<()> {
        tracing::info!("[Shell] Logging out");
        let messages = &self.config.logout_messages;

        let in_flight = self.gate.begin_logout();
        let result = self.collaborators.oracle.sign_out().await;
        let owes_redirect = in_flight.finish();

        match result {
            Ok(()) => {
                self.collaborators.notifier.notify(messages.success());
                self.collaborators.router.navigate(&self.config.entry_route);
                tracing::info!("[Shell] Logged out");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[Shell] Logout failed: {}", e);
                self.collaborators.notifier.notify(messages.failure());
                if owes_redirect {
                    // The session ended elsewhere while we were waiting
                    self.collaborators.router.navigate(&self.config.entry_route);
                }
                Err(match e {
                    ShellError::SignOutFailed(_) => e,
                    other => ShellError::sign_out_failed(other.to_string()),
                })
            }
        }
    }

    /// Whether the shell still listens for auth transitions.
    pub fn is_mounted(&self) -> bool {
        self.gate.is_engaged()
    }

    /// Tears the shell down. Dropping the shell has the same effect.
    pub fn unmount(mut self) {
        if self.gate.release() {
            tracing::info!("[Shell] Unmounted");
        }
    }
}

impl std::fmt::Debug for NavigationShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationShell")
            .field("config", &self.config)
            .field("collapse", &self.collapse)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
