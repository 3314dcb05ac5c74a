//! Process-local identity provider.
//!
//! Holds at most one session in memory and publishes auth transitions to
//! registered handlers. Used by the CLI simulator and by integration tests;
//! a real deployment plugs its identity provider client in behind the same
//! `SessionOracle` trait.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use async_trait::async_trait;
use fiscal_core::error::{Result, ShellError};
use fiscal_core::session::{
    Session, SessionChangeEvent, SessionChangeHandler, SessionOracle, Subscription,
};

#[derive(Default)]
struct OracleState {
    session: RwLock<Option<Session>>,
    handlers: Mutex<BTreeMap<u64, SessionChangeHandler>>,
    next_handler_id: AtomicU64,
    unreachable: AtomicBool,
    reject_sign_out: AtomicBool,
}

impl OracleState {
    fn current(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn replace(&self, session: Option<Session>) {
        *self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }

    fn remove_handler(&self, id: u64) {
        self.handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&id);
    }
}

/// In-memory `SessionOracle`.
///
/// Cloning yields another handle to the same provider state.
#[derive(Clone, Default)]
pub struct LocalSessionOracle {
    state: Arc<OracleState>,
}

impl LocalSessionOracle {
    /// A provider with no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that already holds `session`.
    pub fn with_session(session: Session) -> Self {
        let oracle = Self::new();
        oracle.state.replace(Some(session));
        oracle
    }

    /// Stores `session` and publishes `SignedIn`.
    pub fn sign_in(&self, session: Session) {
        tracing::info!("[LocalSessionOracle] Signed in user {}", session.user_id);
        self.state.replace(Some(session));
        self.emit(SessionChangeEvent::SignedIn);
    }

    /// Drops the session without a sign-out request, as an expired or
    /// revoked token would, and publishes `TokenRefreshed` with no session.
    pub fn expire_session(&self) {
        tracing::info!("[LocalSessionOracle] Session expired");
        self.state.replace(None);
        self.emit(SessionChangeEvent::TokenRefreshed);
    }

    /// Publishes `event` with the current session to every live handler.
    pub fn emit(&self, event: SessionChangeEvent) {
        let session = self.state.current();
        // Snapshot so handlers may (un)subscribe without deadlocking.
        let handlers: Vec<SessionChangeHandler> = self
            .state
            .handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .cloned()
            .collect();

        tracing::debug!(
            "[LocalSessionOracle] {:?} -> {} handler(s)",
            event,
            handlers.len()
        );
        for handler in handlers {
            handler(event, session.as_ref());
        }
    }

    /// Makes `get_session` fail as if the provider were unreachable.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Makes `sign_out` fail and leave the session in place.
    pub fn set_reject_sign_out(&self, reject: bool) {
        self.state.reject_sign_out.store(reject, Ordering::SeqCst);
    }

    /// Number of currently registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.state
            .handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn has_session(&self) -> bool {
        self.state.current().is_some()
    }
}

#[async_trait]
impl SessionOracle for LocalSessionOracle {
    async fn get_session(&self) -> Result<Option<Session>> {
        if self.state.unreachable.load(Ordering::SeqCst) {
            return Err(ShellError::session_unavailable("identity provider unreachable"));
        }
        Ok(self.state.current())
    }

    fn on_session_change(&self, handler: SessionChangeHandler) -> Subscription {
        let id = self.state.next_handler_id.fetch_add(1, Ordering::SeqCst);
        self.state
            .handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, handler);

        let state: Weak<OracleState> = Arc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.remove_handler(id);
            }
        })
    }

    async fn sign_out(&self) -> Result<()> {
        if self.state.reject_sign_out.load(Ordering::SeqCst) {
            return Err(ShellError::sign_out_failed("sign out rejected by provider"));
        }
        self.state.replace(None);
        self.emit(SessionChangeEvent::SignedOut);
        Ok(())
    }
}
