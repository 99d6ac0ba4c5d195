//! Durable snapshot codec for the auth portion of session state.
//!
//! The record uses the redux-persist root layout so snapshots written by
//! earlier builds of the web client keep working:
//!
//! ```json
//! { "auth": "{\"user\":null,\"token\":\"xyz\",...}", "_persist": "{\"version\":-1,\"rehydrated\":true}" }
//! ```
//!
//! On read, `auth` may also be an inline object.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::net::types::Profile;
use crate::state::session::Session;

const PERSIST_META: &str = r#"{"version":-1,"rehydrated":true}"#;

/// Why a stored record could not be turned back into a fragment.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("snapshot is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("snapshot has no auth entry")]
    MissingAuth,
    #[error("auth entry has unexpected type")]
    UnexpectedShape,
}

/// Persisted auth fields, camelCase as stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFragment {
    #[serde(default)]
    pub user: Option<Profile>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl AuthFragment {
    pub fn from_session(session: &Session) -> Self {
        Self {
            user: session.user().cloned(),
            token: session.token().map(str::to_owned),
            refresh_token: session.refresh_token().map(str::to_owned),
            is_authenticated: session.is_authenticated(),
        }
    }

    /// Non-empty access token, if any. The stored flag is not trusted.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn into_session(self) -> Session {
        Session::new(self.user, self.token, self.refresh_token)
    }
}

#[derive(Serialize)]
struct PersistRoot<'a> {
    auth: String,
    #[serde(rename = "_persist")]
    meta: &'a str,
}

/// Serialize `session` into the root record.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(session: &Session) -> Result<String, serde_json::Error> {
    let auth = serde_json::to_string(&AuthFragment::from_session(session))?;
    serde_json::to_string(&PersistRoot { auth, meta: PERSIST_META })
}

/// Parse a root record back into its auth fragment.
///
/// # Errors
///
/// Returns an error if the record is not JSON, has no `auth` entry, or the
/// entry is neither a JSON string nor an object.
pub fn decode(raw: &str) -> Result<AuthFragment, PersistError> {
    let root: Value = serde_json::from_str(raw)?;
    let auth = root.get("auth").ok_or(PersistError::MissingAuth)?;
    match auth {
        Value::String(inner) => Ok(serde_json::from_str(inner)?),
        Value::Object(_) => Ok(AuthFragment::deserialize(auth)?),
        _ => Err(PersistError::UnexpectedShape),
    }
}
