//! Dashboard page for signed-in users.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `ProtectedRoute`. Once rehydration is done it asks the API
//! for the current profile so a stale persisted profile gets replaced; a
//! rejected token on that call is handled by the gateway.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::header::Header;
use crate::net::gateway::ApiGateway;
use crate::state::session::Session;

/// Greeting line for the current session.
pub(crate) fn greeting(session: &Session) -> String {
    match session.user() {
        Some(user) if !user.first_name.trim().is_empty() => format!("Welcome back, {}!", user.first_name.trim()),
        Some(user) => format!("Welcome back, {}!", user.display_name()),
        None => "Welcome back!".to_owned(),
    }
}

/// Verification badge text, or `None` while no profile is loaded.
pub(crate) fn verification_label(session: &Session) -> Option<&'static str> {
    session
        .user()
        .map(|user| if user.verified { "Email verified" } else { "Email not verified" })
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let gateway = expect_context::<ApiGateway>();
    let session = expect_context::<RwSignal<Session>>();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Err(e) = crate::session::actions::load_current_user(&gateway).await {
            leptos::logging::warn!("profile refresh failed: {e}");
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = gateway;

    view! {
        <div class="dashboard-page">
            <Header/>
            <main class="dashboard-main">
                <h1>{move || session.with(greeting)}</h1>
                <p class="dashboard-email">
                    {move || session.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default())}
                </p>
                <Show when=move || session.with(|s| verification_label(s).is_some())>
                    <span class="dashboard-badge">
                        {move || session.with(verification_label).unwrap_or_default()}
                    </span>
                </Show>
                <p class="dashboard-hint">"Your itineraries will appear here."</p>
            </main>
        </div>
    }
}
