//! Authoritative "is this caller signed in" resolution.
//!
//! ALGORITHM
//! =========
//! Stores are consulted fastest first:
//!
//! 1. memory: authenticated with a non-empty token, answer immediately
//! 2. `authToken` cookie: adopt the token into memory
//! 3. durable snapshot: restore the cookie, then memory
//!
//! Data only ever flows from a slower store toward a faster one, so stale
//! persisted data can never clobber a live in-memory session. Every storage
//! failure, including a malformed snapshot, counts as absence.

#[cfg(test)]
#[path = "reconciler_test.rs"]
mod reconciler_test;

use leptos::logging::warn;

use super::AuthContext;
use super::persist::{self, AuthFragment};
use crate::state::session::{AuthStatus, Session};
use crate::util::cookie::CookieOptions;

impl AuthContext {
    /// Decide whether the caller is authenticated, repairing faster stores
    /// from slower ones along the way. Idempotent: once it has answered
    /// `Authenticated`, later calls take the in-memory fast path.
    pub fn resolve(&self) -> AuthStatus {
        if self.container.is_authenticated() {
            return AuthStatus::Authenticated;
        }

        if let Some(token) = self.cookie(&self.config.access_cookie) {
            self.container.adopt_token(&token);
            return AuthStatus::Authenticated;
        }

        if let Some(fragment) = self.durable_fragment() {
            if fragment.token().is_some() {
                self.restore_cookies(&fragment);
                self.container.replace(fragment.into_session());
                return AuthStatus::Authenticated;
            }
        }

        AuthStatus::Unauthenticated
    }

    /// Access token for an outbound request, read in the same order as
    /// [`resolve`](Self::resolve) but without repairing anything.
    pub fn bearer_token(&self) -> Option<String> {
        if let Some(token) = self.container.snapshot().token() {
            return Some(token.to_owned());
        }
        if let Some(token) = self.cookie(&self.config.access_cookie) {
            return Some(token);
        }
        self.durable_fragment().and_then(|f| f.token().map(str::to_owned))
    }

    /// Refresh token from the fastest store that has one.
    pub fn refresh_credential(&self) -> Option<String> {
        if let Some(token) = self.container.snapshot().refresh_token() {
            return Some(token.to_owned());
        }
        if let Some(token) = self.cookie(&self.config.refresh_cookie) {
            return Some(token);
        }
        self.durable_fragment().and_then(|f| f.refresh_token.filter(|t| !t.is_empty()))
    }

    /// Restore the durable snapshot into memory, then end the rehydration
    /// phase. A session that is already authenticated in memory is kept; the
    /// snapshot only fills in a missing profile or refresh token, and only
    /// when it holds the same access token.
    pub fn rehydrate(&self) {
        if let Some(fragment) = self.durable_fragment() {
            if fragment.token().is_some() {
                let current = self.container.snapshot();
                if !current.is_authenticated() {
                    self.restore_cookies(&fragment);
                    self.container.replace(fragment.into_session());
                } else if current.token() == fragment.token() {
                    let user = current.user().cloned().or(fragment.user);
                    let refresh = current.refresh_token().map(str::to_owned).or(fragment.refresh_token);
                    self.container.replace(Session::new(user, current.token().map(str::to_owned), refresh));
                }
            }
        }
        self.container.mark_hydrated();
    }

    fn cookie(&self, name: &str) -> Option<String> {
        match self.cookies.get(name) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!("cookie {name} unreadable: {e}");
                None
            }
        }
    }

    fn durable_fragment(&self) -> Option<AuthFragment> {
        let raw = match self.durable.load(&self.config.persist_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("persisted session unreadable: {e}");
                return None;
            }
        };
        match persist::decode(&raw) {
            Ok(fragment) => Some(fragment),
            Err(e) => {
                warn!("ignoring malformed persisted session: {e}");
                None
            }
        }
    }

    /// Write missing credential cookies from a durable fragment. Cookies that
    /// already hold a value are left alone.
    fn restore_cookies(&self, fragment: &AuthFragment) {
        if let Some(token) = fragment.token() {
            self.restore_cookie(&self.config.access_cookie, token, self.config.access_ttl);
        }
        if let Some(refresh) = fragment.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            self.restore_cookie(&self.config.refresh_cookie, refresh, self.config.refresh_ttl);
        }
    }

    fn restore_cookie(&self, name: &str, value: &str, ttl: std::time::Duration) {
        if self.cookie(name).is_some() {
            return;
        }
        let options = CookieOptions::expiring_in(ttl, self.config.secure_cookies);
        if let Err(e) = self.cookies.set(name, value, &options) {
            warn!("cookie {name} not restored: {e}");
        }
    }
}
