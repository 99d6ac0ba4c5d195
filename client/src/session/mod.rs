//! Session core: credential stores, reconciliation, route guarding.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three places can hold the access token: the in-memory
//! [`SessionContainer`], the `authToken` cookie, and the durable
//! `localStorage` snapshot. [`AuthContext`] owns handles to all three and is
//! the only code allowed to copy credentials between them:
//!
//! - `reconciler`: `resolve`, `bearer_token`, `rehydrate` (slower store to
//!   faster store only)
//! - `credentials`: `establish`, `apply_profile`, `evict`
//! - `guard`: pure decisions for the protected-route component
//! - `actions`: sign-in / sign-up / verification flows over the API gateway
//!
//! The container persists itself to the durable store after every change
//! once rehydration has completed.

pub mod actions;
pub mod container;
pub mod credentials;
pub mod guard;
pub mod persist;
pub mod reconciler;
pub mod store;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::StorageError;
use crate::state::session::{Hydration, Session};

use container::SessionContainer;
use store::{BrowserCookies, BrowserLocalStorage, CookieStore, DurableStore};

/// Handles to every credential store plus the settings that name them.
#[derive(Clone)]
pub struct AuthContext {
    container: SessionContainer,
    cookies: Arc<dyn CookieStore>,
    durable: Arc<dyn DurableStore>,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("container", &self.container)
            .field("persist_key", &self.config.persist_key)
            .finish_non_exhaustive()
    }
}

impl AuthContext {
    /// Wire a fresh container to the given stores and start persisting it.
    pub fn new(config: ClientConfig, cookies: Arc<dyn CookieStore>, durable: Arc<dyn DurableStore>) -> Self {
        let ctx = Self { container: SessionContainer::new(), cookies, durable, config: Arc::new(config) };
        ctx.install_persister();
        ctx
    }

    /// Context backed by `document.cookie` and `localStorage`.
    pub fn browser(config: ClientConfig) -> Self {
        Self::new(config, Arc::new(BrowserCookies), Arc::new(BrowserLocalStorage))
    }

    pub fn container(&self) -> &SessionContainer {
        &self.container
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn install_persister(&self) {
        let durable = Arc::clone(&self.durable);
        let key = self.config.persist_key.clone();
        self.container.subscribe(move |session, hydration| {
            // Writing before rehydration would overwrite the stored snapshot.
            if hydration == Hydration::Pending {
                return;
            }
            if let Err(e) = write_snapshot(durable.as_ref(), &key, session) {
                leptos::logging::warn!("session snapshot not persisted: {e}");
            }
        });
    }
}

fn write_snapshot(durable: &dyn DurableStore, key: &str, session: &Session) -> Result<(), StorageError> {
    let raw = persist::encode(session)?;
    durable.save(key, &raw)
}
