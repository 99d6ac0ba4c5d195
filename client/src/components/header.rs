//! Top bar with the signed-in user's name and a logout button.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::gateway::ApiGateway;
use crate::net::types::Profile;
use crate::session::actions;
use crate::state::session::Session;

#[component]
pub fn Header() -> impl IntoView {
    let gateway = expect_context::<ApiGateway>();
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    let login = gateway.auth().config().login_path.clone();

    let display_name = move || {
        session.with(|s| s.user().map(Profile::display_name).unwrap_or_default())
    };

    let on_logout = move |_| {
        if actions::logout(&gateway) {
            navigate(&login, NavigateOptions::default());
        }
    };

    view! {
        <header class="app-header">
            <a class="app-header__brand" href="/dashboard">"WanderWise"</a>
            <Show when=move || session.with(Session::is_authenticated)>
                <span class="app-header__user">{display_name}</span>
                <button class="app-header__logout" type="button" on:click=on_logout.clone()>
                    "Log out"
                </button>
            </Show>
        </header>
    }
}
