//! Route-guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `components::protected_route` renders from [`GuardState`] and redirects
//! when [`should_redirect`] says so. The gateway shares [`RedirectLatch`] to
//! keep concurrent authorization failures down to a single navigation.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::state::session::{AuthStatus, Hydration};

/// What a protected view should do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// Rehydration is still running and nothing proves a session yet.
    Pending,
    Authenticated,
    Unauthenticated,
}

/// Combine the hydration phase with a reconciler answer.
///
/// `resolve` runs even while rehydration is pending, because a cookie can
/// prove a session before the durable store has been read. A negative answer
/// during rehydration stays [`GuardState::Pending`].
pub fn evaluate<F>(hydration: Hydration, resolve: F) -> GuardState
where
    F: FnOnce() -> AuthStatus,
{
    match (resolve(), hydration) {
        (AuthStatus::Authenticated, _) => GuardState::Authenticated,
        (AuthStatus::Unauthenticated, Hydration::Pending) => GuardState::Pending,
        (AuthStatus::Unauthenticated, Hydration::Ready) => GuardState::Unauthenticated,
    }
}

/// One-shot switch shared by everything that may send the user to login.
#[derive(Clone, Debug, Default)]
pub struct RedirectLatch {
    fired: Arc<AtomicBool>,
}

impl RedirectLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` for the first caller after construction or [`rearm`](Self::rearm).
    pub fn try_fire(&self) -> bool {
        !self.fired.swap(true, Ordering::AcqRel)
    }

    pub fn rearm(&self) {
        self.fired.store(false, Ordering::Release);
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

/// Whether the guard should navigate to login for `state`.
///
/// A failed check redirects once; any non-failing state starts a new cycle.
pub fn should_redirect(latch: &RedirectLatch, state: GuardState) -> bool {
    match state {
        GuardState::Unauthenticated => latch.try_fire(),
        GuardState::Pending | GuardState::Authenticated => {
            latch.rearm();
            false
        }
    }
}
