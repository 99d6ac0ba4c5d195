//! Login page: email + password sign-in.
//!
//! A successful sign-in stores credentials through `session::actions` and
//! moves to the home route. Failures only set the on-page message.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::form::{check_email, check_password};
use crate::net::gateway::ApiGateway;
use crate::session::actions::{self, AuthOutcome};

const UNVERIFIED: &str = "Please verify your email before signing in.";

/// Validated `(email, password)` or the message to show.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = check_email(email)?;
    check_password(password)?;
    Ok((email, password.to_owned()))
}

/// Message for an accepted sign-in that produced no session.
pub(crate) fn pending_message(outcome: &AuthOutcome) -> String {
    match outcome.message().trim() {
        "" => UNVERIFIED.to_owned(),
        message => message.to_owned(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let gateway = expect_context::<ApiGateway>();
    let navigate = use_navigate();
    let home = gateway.auth().config().home_path.clone();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let gateway = gateway.clone();
            let navigate = navigate.clone();
            let home = home.clone();
            leptos::task::spawn_local(async move {
                match actions::login(&gateway, &email_value, &password_value).await {
                    Ok(AuthOutcome::SignedIn { .. }) => {
                        info.set("Welcome back!".to_owned());
                        navigate(&home, NavigateOptions::default());
                    }
                    Ok(outcome) => info.set(pending_message(&outcome)),
                    Err(message) => info.set(message),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&gateway, &navigate, &home, email_value, password_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Welcome Back"</h1>
                <p class="login-card__subtitle">"Sign in and continue your adventure"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "New here? " <a href="/auth/register">"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
