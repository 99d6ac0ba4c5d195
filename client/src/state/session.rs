//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the route guard and user-aware components. Mutated only through
//! `session::container::SessionContainer`, which keeps the
//! "authenticated iff token present" invariant.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::Profile;

/// In-memory authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<Profile>,
    token: Option<String>,
    refresh_token: Option<String>,
    authenticated: bool,
}

impl Session {
    /// Build a session from credentials. Blank tokens count as absent, and
    /// `authenticated` follows the access token.
    pub fn new(user: Option<Profile>, token: Option<String>, refresh_token: Option<String>) -> Self {
        let token = token.filter(|t| !t.is_empty());
        let refresh_token = refresh_token.filter(|t| !t.is_empty());
        let authenticated = token.is_some();
        Self { user, token, refresh_token, authenticated }
    }

    /// Signed-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&Profile> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// `true` only when the flag is set and a non-empty token is held.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated && self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub(crate) fn set_user(&mut self, user: Option<Profile>) {
        self.user = user;
    }

    /// Take `token` as the access credential, keeping the profile and refresh
    /// token already held.
    pub(crate) fn adopt_token(&mut self, token: String) {
        if token.is_empty() {
            return;
        }
        self.token = Some(token);
        self.authenticated = true;
    }
}

/// Progress of restoring persisted state into memory at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Hydration {
    /// Rehydration has not completed yet.
    #[default]
    Pending,
    /// The durable store has been read (successfully or not).
    Ready,
}

/// Reconciled answer to "is this caller signed in right now".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated,
    Unauthenticated,
}

impl AuthStatus {
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}
