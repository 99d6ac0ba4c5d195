//! Browser `localStorage` and `document.cookie` access.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes the hydrate-only web-sys glue so the session stores stay free
//! of browser bindings. On the server every read is empty and every write is
//! reported as `StorageError::Unavailable`.

use crate::error::StorageError;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "hydrate")]
fn html_document() -> Result<web_sys::HtmlDocument, StorageError> {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "hydrate")]
fn rejected(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Rejected(format!("{err:?}"))
}

/// Read the raw string stored under `key`.
///
/// # Errors
///
/// Returns an error if `localStorage` is missing or refuses the read.
pub fn load_item(key: &str) -> Result<Option<String>, StorageError> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.get_item(key).map_err(|e| rejected(&e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        Ok(None)
    }
}

/// Store `value` under `key`.
///
/// # Errors
///
/// Returns an error if `localStorage` is missing or the write is refused
/// (for example when the quota is exhausted).
pub fn save_item(key: &str, value: &str) -> Result<(), StorageError> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.set_item(key, value).map_err(|e| rejected(&e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
        Err(StorageError::Unavailable)
    }
}

/// Remove `key` from `localStorage`.
///
/// # Errors
///
/// Returns an error if `localStorage` is missing or refuses the removal.
pub fn remove_item(key: &str) -> Result<(), StorageError> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.remove_item(key).map_err(|e| rejected(&e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        Err(StorageError::Unavailable)
    }
}

/// Read the full `document.cookie` string.
///
/// # Errors
///
/// Returns an error outside a browser document.
pub fn read_cookies() -> Result<String, StorageError> {
    #[cfg(feature = "hydrate")]
    {
        html_document()?.cookie().map_err(|e| rejected(&e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Ok(String::new())
    }
}

/// Assign one `document.cookie` line.
///
/// # Errors
///
/// Returns an error outside a browser document.
pub fn write_cookie(line: &str) -> Result<(), StorageError> {
    #[cfg(feature = "hydrate")]
    {
        html_document()?.set_cookie(line).map_err(|e| rejected(&e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = line;
        Err(StorageError::Unavailable)
    }
}
