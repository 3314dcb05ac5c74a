//! Session oracle capability.
//!
//! Defines the interface the shell uses to observe and end the session held
//! by the identity provider.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::model::{Session, SessionChangeEvent};
use crate::error::Result;

/// Callback invoked for every auth transition.
///
/// Handlers may be called from any task, so they must be `Send + Sync`.
pub type SessionChangeHandler = Arc<dyn Fn(SessionChangeEvent, Option<&Session>) + Send + Sync>;

/// Access to the identity provider's session.
///
/// The provider owns the session; implementations only report on it.
/// Tests substitute a fake oracle through this trait.
#[async_trait]
pub trait SessionOracle: Send + Sync {
    /// Returns the current session, `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider could not be reached. Callers in the
    /// shell treat this the same as `Ok(None)`.
    async fn get_session(&self) -> Result<Option<Session>>;

    /// Registers `handler` for auth transitions.
    ///
    /// The returned [`Subscription`] removes the handler when it is
    /// unsubscribed or dropped.
    fn on_session_change(&self, handler: SessionChangeHandler) -> Subscription;

    /// Asks the provider to end the session.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::SignOutFailed` if the provider rejected the request.
    async fn sign_out(&self) -> Result<()>;
}

/// Handle to a registered session-change handler.
///
/// The cancel callback runs exactly once: either through [`unsubscribe`]
/// or when the handle is dropped, whichever comes first.
///
/// [`unsubscribe`]: Subscription::unsubscribe
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Wraps the provider's cancel callback.
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Removes the handler from the provider.
    pub fn unsubscribe(mut self) {
        self.cancel_once();
    }

    /// Whether the cancel callback has not run yet.
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    fn cancel_once(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_once();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
