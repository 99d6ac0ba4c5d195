//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session mirror and the `AuthContext` / `ApiGateway`
//! handles from Leptos context providers set up in `app`.

pub mod header;
pub mod protected_route;
