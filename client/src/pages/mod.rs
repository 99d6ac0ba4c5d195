//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: form state, calls into
//! `session::actions`, and navigation. Field checks are pure functions so
//! they can be tested without a browser.

pub mod dashboard;
pub(crate) mod form;
pub mod login;
pub mod register;
pub mod verify;
