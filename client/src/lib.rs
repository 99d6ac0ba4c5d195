//! # wanderwise-client
//!
//! Leptos + WASM frontend for the WanderWise travel planner.
//!
//! This crate holds the authentication session core (credential stores,
//! reconciliation, route guarding), the API gateway every REST call goes
//! through, and the auth pages that drive them. The server crate renders
//! [`app::App`] with SSR; the `hydrate` entry point below takes over in the
//! browser.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

/// Browser entry point invoked by the generated hydration script.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
