//! Persistent credential stores.
//!
//! DESIGN
//! ======
//! The cookie jar and the durable local store are trait objects so the
//! reconciler can run against in-memory doubles in native tests and against
//! `document.cookie` / `localStorage` in the browser. Both traits require
//! `Send + Sync` because the owning `AuthContext` lives in Leptos context.

use crate::error::StorageError;
use crate::util::cookie::{self, CookieOptions};
use crate::util::storage;

/// Short-lived credential storage keyed by cookie name.
pub trait CookieStore: Send + Sync {
    /// Read cookie `name`. Empty values count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie jar cannot be read.
    fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Write cookie `name` with the given expiry and attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie jar rejects the write.
    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), StorageError>;

    /// Expire cookie `name`. Removing an absent cookie succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie jar rejects the write.
    fn remove(&self, name: &str) -> Result<(), StorageError>;
}

/// Durable structured storage that survives reloads.
pub trait DurableStore: Send + Sync {
    /// Read the raw record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the record under `key`. Removing an absent record succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `document.cookie`-backed jar. Empty and read-only outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCookies;

impl CookieStore for BrowserCookies {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let header = storage::read_cookies()?;
        Ok(cookie::find(&header, name).filter(|v| !v.is_empty()))
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), StorageError> {
        storage::write_cookie(&cookie::assignment(name, value, options))
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        storage::write_cookie(&cookie::removal(name))
    }
}

/// `localStorage`-backed store. Empty and read-only outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocalStorage;

impl DurableStore for BrowserLocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        storage::load_item(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        storage::save_item(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        storage::remove_item(key)
    }
}
