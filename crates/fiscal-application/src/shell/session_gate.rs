//! Session gate.
//!
//! Keeps unauthenticated users out of the shell: one session query at mount
//! plus a subscription to auth transitions for as long as the shell is
//! mounted. Both paths redirect to the entry route.

use std::sync::{Arc, Mutex, MutexGuard};

use fiscal_core::error::{Result, ShellError};
use fiscal_core::navigation::Router;
use fiscal_core::session::{
    Session, SessionChangeEvent, SessionChangeHandler, SessionOracle, Subscription,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Result of the mount-time session query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// A session was present; the shell stays.
    Authenticated,
    /// No session (or the query failed); the view was sent to the entry route.
    Redirected,
}

#[derive(Debug)]
struct GateFlags {
    /// Cleared at release; handlers must not redirect afterwards.
    live: bool,
    /// Logout requests currently awaiting the provider.
    logouts_in_flight: usize,
    /// An end-of-session event arrived while a logout was in flight.
    deferred_redirect: bool,
}

type SharedFlags = Arc<Mutex<GateFlags>>;

fn lock(flags: &SharedFlags) -> MutexGuard<'_, GateFlags> {
    flags.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mount-scoped session guard.
///
/// The subscription is released exactly once, by [`release`] or on drop.
///
/// [`release`]: SessionGate::release
pub struct SessionGate {
    flags: SharedFlags,
    router: Arc<dyn Router>,
    entry_route: String,
    subscription: Option<Subscription>,
    initial_check: Option<JoinHandle<GateOutcome>>,
    outcome: Option<GateOutcome>,
}

impl SessionGate {
    /// Subscribes to auth transitions and starts the one-shot session query.
    ///
    /// The query runs as a spawned task so the caller is not blocked while
    /// it is pending.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Internal` when called outside a tokio runtime.
    pub fn engage(
        oracle: Arc<dyn SessionOracle>,
        router: Arc<dyn Router>,
        entry_route: String,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            ShellError::internal(format!("no tokio runtime to check the session: {}", e))
        })?;

        let flags: SharedFlags = Arc::new(Mutex::new(GateFlags {
            live: true,
            logouts_in_flight: 0,
            deferred_redirect: false,
        }));

        let handler = redirect_on_session_end(flags.clone(), router.clone(), entry_route.clone());
        let subscription = oracle.on_session_change(handler);
        let initial_check =
            runtime.spawn(verify_session(oracle, router.clone(), entry_route.clone()));

        Ok(Self {
            flags,
            router,
            entry_route,
            subscription: Some(subscription),
            initial_check: Some(initial_check),
            outcome: None,
        })
    }

    /// Waits for the mount-time session query.
    ///
    /// The query itself runs once; later calls return the same outcome.
    pub async fn initial_check(&mut self) -> Result<GateOutcome> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }

        let handle = self
            .initial_check
            .take()
            .ok_or_else(|| ShellError::internal("session check already consumed"))?;
        let outcome = handle
            .await
            .map_err(|e| ShellError::internal(format!("session check task failed: {}", e)))?;

        self.outcome = Some(outcome);
        Ok(outcome)
    }

    /// Whether the subscription is still registered.
    pub fn is_engaged(&self) -> bool {
        self.subscription.is_some()
    }

    /// Unsubscribes and stops handlers from redirecting.
    ///
    /// Returns `false` if the gate was already released.
    pub fn release(&mut self) -> bool {
        lock(&self.flags).live = false;
        match self.subscription.take() {
            Some(subscription) => {
                subscription.unsubscribe();
                tracing::debug!("[SessionGate] Released session subscription");
                true
            }
            None => false,
        }
    }

    /// Marks a logout request as in flight until the returned guard is
    /// finished or dropped.
    ///
    /// While any guard is alive, end-of-session events are recorded instead
    /// of redirecting, so the logout flow controls the order of its
    /// notification and redirect.
    pub fn begin_logout(&self) -> LogoutGuard {
        lock(&self.flags).logouts_in_flight += 1;
        LogoutGuard {
            flags: self.flags.clone(),
            router: self.router.clone(),
            entry_route: self.entry_route.clone(),
            settled: false,
        }
    }
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("flags", &self.flags)
            .field("entry_route", &self.entry_route)
            .field("subscription", &self.subscription)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        self.release();
    }
}

/// In-flight logout mark returned by [`SessionGate::begin_logout`].
///
/// Dropped without [`finish`], it still clears the mark and performs any
/// redirect that was deferred while it was alive.
///
/// [`finish`]: LogoutGuard::finish
#[must_use = "dropping the guard ends the logout immediately"]
pub struct LogoutGuard {
    flags: SharedFlags,
    router: Arc<dyn Router>,
    entry_route: String,
    settled: bool,
}

impl LogoutGuard {
    /// Ends the logout request.
    ///
    /// Returns `true` if an end-of-session event was deferred while no other
    /// logout is still pending, meaning the caller owes a redirect.
    pub fn finish(mut self) -> bool {
        self.settled = true;
        settle(&self.flags)
    }
}

impl Drop for LogoutGuard {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if settle(&self.flags) {
            tracing::info!("[SessionGate] Logout abandoned after session ended, redirecting");
            self.router.navigate(&self.entry_route);
        }
    }
}

impl std::fmt::Debug for LogoutGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoutGuard")
            .field("settled", &self.settled)
            .finish_non_exhaustive()
    }
}

fn settle(flags: &SharedFlags) -> bool {
    let mut flags = lock(flags);
    flags.logouts_in_flight = flags.logouts_in_flight.saturating_sub(1);
    if flags.logouts_in_flight > 0 {
        return false;
    }
    std::mem::take(&mut flags.deferred_redirect) && flags.live
}

fn redirect_on_session_end(
    flags: SharedFlags,
    router: Arc<dyn Router>,
    entry_route: String,
) -> SessionChangeHandler {
    Arc::new(move |event: SessionChangeEvent, session: Option<&Session>| {
        tracing::debug!(
            "[SessionGate] Auth event {:?} (session present: {})",
            event,
            session.is_some()
        );
        if !event.ends_session(session) {
            return;
        }

        let redirect = {
            let mut flags = lock(&flags);
            if !flags.live {
                return;
            }
            if flags.logouts_in_flight > 0 {
                flags.deferred_redirect = true;
                false
            } else {
                true
            }
        };

        if redirect {
            tracing::info!("[SessionGate] Session ended ({:?}), redirecting", event);
            router.navigate(&entry_route);
        }
    })
}

async fn verify_session(
    oracle: Arc<dyn SessionOracle>,
    router: Arc<dyn Router>,
    entry_route: String,
) -> GateOutcome {
    match oracle.get_session().await {
        Ok(Some(session)) => {
            tracing::debug!("[SessionGate] Session present for {}", session.user_id);
            GateOutcome::Authenticated
        }
        Ok(None) => {
            tracing::info!("[SessionGate] No session, redirecting to {}", entry_route);
            router.navigate(&entry_route);
            GateOutcome::Redirected
        }
        Err(e) => {
            // Unknown is handled as unauthenticated
            tracing::warn!("[SessionGate] Session query failed, redirecting: {}", e);
            router.navigate(&entry_route);
            GateOutcome::Redirected
        }
    }
}
