//! Credential record lifecycle: create on sign-in, delete on eviction.
//!
//! `establish` writes the memory session and both cookies; the durable
//! snapshot follows through the container's persister. `evict` clears all
//! three and is safe to call repeatedly.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use leptos::logging::warn;

use super::AuthContext;
use crate::net::types::{AuthResponse, Profile};
use crate::state::session::Session;
use crate::util::cookie::CookieOptions;

impl AuthContext {
    /// Store the credentials carried by a successful auth response.
    ///
    /// Returns `false` (and changes nothing) when the response has no usable
    /// access token, as for a registration that still awaits verification.
    pub fn establish(&self, response: &AuthResponse) -> bool {
        let Some(token) = response.access_token() else {
            return false;
        };
        let refresh = response.refresh_token.as_deref().filter(|t| !t.is_empty());

        self.write_cookie(&self.config.access_cookie, token, self.config.access_ttl);
        match refresh {
            Some(refresh) => self.write_cookie(&self.config.refresh_cookie, refresh, self.config.refresh_ttl),
            None => self.drop_cookie(&self.config.refresh_cookie),
        }

        self.container.replace(Session::new(
            response.user.clone(),
            Some(token.to_owned()),
            refresh.map(str::to_owned),
        ));
        true
    }

    /// Replace the profile of the signed-in user. Ignored when signed out, so
    /// a late profile response cannot resurrect an evicted session.
    pub fn apply_profile(&self, user: Profile) -> bool {
        if !self.container.is_authenticated() {
            return false;
        }
        self.container.set_user(Some(user));
        true
    }

    /// Remove every credential from memory, cookies and the durable store.
    pub fn evict(&self) {
        self.container.clear();
        self.drop_cookie(&self.config.access_cookie);
        self.drop_cookie(&self.config.refresh_cookie);
        if let Err(e) = self.durable.remove(&self.config.persist_key) {
            warn!("persisted session not removed: {e}");
        }
    }

    fn write_cookie(&self, name: &str, value: &str, ttl: std::time::Duration) {
        let options = CookieOptions::expiring_in(ttl, self.config.secure_cookies);
        if let Err(e) = self.cookies.set(name, value, &options) {
            warn!("cookie {name} not written: {e}");
        }
    }

    fn drop_cookie(&self, name: &str) {
        if let Err(e) = self.cookies.remove(name) {
            warn!("cookie {name} not removed: {e}");
        }
    }
}
