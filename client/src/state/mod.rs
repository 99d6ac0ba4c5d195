//! Client application state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain data models shared through Leptos context. Mutation rules live in
//! `session`; these types only describe the state.

pub mod session;
