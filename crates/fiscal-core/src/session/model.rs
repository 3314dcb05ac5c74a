//! Session domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque proof of authentication held by the identity provider.
///
/// The shell only ever checks for presence; the fields exist so that
/// collaborators (and logs) can identify whose session it is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Identifier of the authenticated user.
    pub user_id: String,
    /// When the provider will consider the session expired, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session for the given user with no known expiry.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            expires_at: None,
        }
    }

    /// Sets the expiry timestamp.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Auth transitions published by the identity provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionChangeEvent {
    /// Emitted once when a listener attaches and the provider reports its state.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

impl SessionChangeEvent {
    /// Whether this transition, observed together with `session`, ends the
    /// authenticated view.
    ///
    /// True for `SignedOut` and for any event that arrives without a session.
    pub fn ends_session(self, session: Option<&Session>) -> bool {
        self == SessionChangeEvent::SignedOut || session.is_none()
    }
}
