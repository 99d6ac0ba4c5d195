//! Observable in-memory session store.
//!
//! DESIGN
//! ======
//! `SessionContainer` is the single owner of the in-memory [`Session`]. It is
//! cheap to clone (shared `Arc`) and is handed to the reconciler, the gateway
//! and the UI through Leptos context. Listeners are invoked after the lock is
//! released, so a listener may read the container again.
//!
//! Rehydration is an explicit phase: [`SessionContainer::hydrated`] resolves
//! once [`SessionContainer::mark_hydrated`] has run.

#[cfg(test)]
#[path = "container_test.rs"]
mod container_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::channel::oneshot;

use crate::net::types::Profile;
use crate::state::session::{Hydration, Session};

type Listener = Arc<dyn Fn(&Session, Hydration) + Send + Sync>;

/// Handle returned by [`SessionContainer::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Inner {
    session: Session,
    hydration: Hydration,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    waiters: Vec<oneshot::Sender<()>>,
}

/// Shared, observable holder of the current [`Session`].
#[derive(Clone, Default)]
pub struct SessionContainer {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for SessionContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionContainer")
            .field("session", &inner.session)
            .field("hydration", &inner.hydration)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl SessionContainer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.lock().session.clone()
    }

    pub fn hydration(&self) -> Hydration {
        self.lock().hydration
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated()
    }

    /// Register `listener`; it runs after every change to the session or the
    /// hydration phase.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Session, Hydration) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().listeners.retain(|(existing, _)| *existing != id);
    }

    /// Replace the whole session.
    pub fn replace(&self, session: Session) {
        self.mutate(|current| {
            if *current == session {
                return false;
            }
            *current = session;
            true
        });
    }

    /// Mark the session authenticated with `token`, keeping profile and
    /// refresh token. Returns `false` if the session already held that token.
    pub fn adopt_token(&self, token: &str) -> bool {
        self.mutate(|current| {
            if token.is_empty() || (current.is_authenticated() && current.token() == Some(token)) {
                return false;
            }
            current.adopt_token(token.to_owned());
            true
        })
    }

    /// Replace the profile without touching credentials.
    pub fn set_user(&self, user: Option<Profile>) {
        self.mutate(|current| {
            if current.user() == user.as_ref() {
                return false;
            }
            current.set_user(user);
            true
        });
    }

    /// Drop everything back to a signed-out session.
    pub fn clear(&self) {
        self.replace(Session::anonymous());
    }

    /// End the rehydration phase and wake every [`hydrated`](Self::hydrated)
    /// waiter. Later calls are no-ops.
    pub fn mark_hydrated(&self) {
        let (listeners, session, waiters) = {
            let mut inner = self.lock();
            if inner.hydration == Hydration::Ready {
                return;
            }
            inner.hydration = Hydration::Ready;
            let waiters = std::mem::take(&mut inner.waiters);
            (Self::listeners(&inner), inner.session.clone(), waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(());
        }
        for listener in listeners {
            listener(&session, Hydration::Ready);
        }
    }

    /// Resolves once rehydration has completed.
    pub async fn hydrated(&self) {
        let pending = {
            let mut inner = self.lock();
            if inner.hydration == Hydration::Ready {
                None
            } else {
                let (tx, rx) = oneshot::channel();
                inner.waiters.push(tx);
                Some(rx)
            }
        };
        if let Some(rx) = pending {
            let _ = rx.await;
        }
    }

    fn listeners(inner: &Inner) -> Vec<Listener> {
        inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }

    fn mutate<F>(&self, change: F) -> bool
    where
        F: FnOnce(&mut Session) -> bool,
    {
        let (listeners, session, hydration) = {
            let mut inner = self.lock();
            if !change(&mut inner.session) {
                return false;
            }
            (Self::listeners(&inner), inner.session.clone(), inner.hydration)
        };
        for listener in listeners {
            listener(&session, hydration);
        }
        true
    }
}
