//! `document.cookie` string helpers.
//!
//! The browser exposes cookies as one `name=value; name2=value2` string and
//! accepts writes as a single `Set-Cookie`-style line. Both directions go
//! through the `cookie` crate with percent-encoding, and stay pure so the
//! session stores can be tested natively.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

use std::time::Duration;

use cookie::{Cookie, SameSite};

/// Attributes written alongside a cookie value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieOptions {
    pub max_age: Duration,
    pub same_site: SameSite,
    pub secure: bool,
    pub path: String,
}

impl CookieOptions {
    pub fn expiring_in(max_age: Duration, secure: bool) -> Self {
        Self { max_age, same_site: SameSite::Lax, secure, path: "/".to_owned() }
    }
}

fn max_age(duration: Duration) -> cookie::time::Duration {
    cookie::time::Duration::seconds(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
}

/// Decoded value of cookie `name` in a `document.cookie` string. Pairs that
/// do not parse are skipped.
pub fn find(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse_encoded(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_owned())
}

/// Encoded line assigning `name=value` with the given attributes.
pub fn assignment(name: &str, value: &str, options: &CookieOptions) -> String {
    Cookie::build((name, value))
        .path(options.path.as_str())
        .same_site(options.same_site)
        .secure(options.secure)
        .max_age(max_age(options.max_age))
        .build()
        .encoded()
        .to_string()
}

/// Line that expires cookie `name` immediately.
pub fn removal(name: &str) -> String {
    Cookie::build((name, ""))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::ZERO)
        .build()
        .encoded()
        .to_string()
}
