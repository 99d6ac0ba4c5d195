//! Client configuration resolved at build time.
//!
//! DESIGN
//! ======
//! The WASM bundle has no process environment, so the API base URL is baked in
//! through `WANDERWISE_API_URL` when the client is compiled. Everything else
//! is a fixed contract with the remote API and the persisted browser state.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1";

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Settings shared by the session core and the API gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every API path is appended to.
    pub api_base_url: String,
    /// `localStorage` key holding the persisted auth snapshot.
    pub persist_key: String,
    /// Cookie carrying the access token.
    pub access_cookie: String,
    /// Cookie carrying the refresh token.
    pub refresh_cookie: String,
    /// Lifetime of the access-token cookie.
    pub access_ttl: Duration,
    /// Lifetime of the refresh-token cookie.
    pub refresh_ttl: Duration,
    /// Upper bound on a single outbound HTTP request.
    pub request_timeout: Duration,
    /// Route the guard and the gateway redirect to.
    pub login_path: String,
    /// Route shown after a successful sign-in or verification.
    pub home_path: String,
    /// Whether credential cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            persist_key: "persist:wanderwise-root".to_owned(),
            access_cookie: "authToken".to_owned(),
            refresh_cookie: "refreshToken".to_owned(),
            access_ttl: Duration::from_secs(7 * SECONDS_PER_DAY),
            refresh_ttl: Duration::from_secs(30 * SECONDS_PER_DAY),
            request_timeout: Duration::from_secs(30),
            login_path: "/auth/login".to_owned(),
            home_path: "/dashboard".to_owned(),
            secure_cookies: false,
        }
    }
}

impl ClientConfig {
    /// Build the configuration from compile-time environment.
    pub fn from_build_env() -> Self {
        Self::with_api_url(option_env!("WANDERWISE_API_URL"))
    }

    fn with_api_url(api_url: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map_or_else(|| DEFAULT_API_URL.to_owned(), |url| url.trim_end_matches('/').to_owned());
        Self { api_base_url, secure_cookies: !cfg!(debug_assertions), ..Self::default() }
    }

    /// Join an API path such as `/auth/login` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
