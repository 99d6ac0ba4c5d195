//! Registration page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API either signs the new user in straight away (token in the reply)
//! or asks them to confirm their email first. The first case goes to the
//! home route; the second leaves the page showing the server's instructions.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::form::{check_email, check_password};
use crate::net::gateway::ApiGateway;
use crate::net::types::RegisterRequest;
use crate::session::actions::{self, AuthOutcome};

const CHECK_INBOX: &str = "Registration successful. Check your email to verify your account.";

/// Raw form fields as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request body for a valid form, or the first message to show.
pub(crate) fn validate_register_input(form: &RegisterForm) -> Result<RegisterRequest, &'static str> {
    let first_name = form.first_name.trim();
    if first_name.is_empty() {
        return Err("First name is required");
    }
    let last_name = form.last_name.trim();
    if last_name.is_empty() {
        return Err("Last name is required");
    }
    let email = check_email(&form.email)?;
    check_password(&form.password)?;
    if form.password != form.confirm_password {
        return Err("Passwords do not match");
    }
    Ok(RegisterRequest {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email,
        password: form.password.clone(),
    })
}

pub(crate) fn outcome_message(outcome: &AuthOutcome) -> String {
    match outcome {
        AuthOutcome::SignedIn { .. } => "Account created! Welcome aboard.".to_owned(),
        AuthOutcome::Pending { message } if !message.trim().is_empty() => message.clone(),
        AuthOutcome::Pending { .. } => CHECK_INBOX.to_owned(),
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let gateway = expect_context::<ApiGateway>();
    let navigate = use_navigate();
    let home = gateway.auth().config().home_path.clone();

    let form = RwSignal::new(RegisterForm::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = match form.with(validate_register_input) {
            Ok(body) => body,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating your account...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let gateway = gateway.clone();
            let navigate = navigate.clone();
            let home = home.clone();
            leptos::task::spawn_local(async move {
                match actions::register(&gateway, body).await {
                    Ok(outcome) => {
                        info.set(outcome_message(&outcome));
                        if outcome.is_signed_in() {
                            navigate(&home, NavigateOptions::default());
                        }
                    }
                    Err(message) => info.set(message),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&gateway, &navigate, &home, body);
        }
    };

    let field = move |placeholder: &'static str,
                      kind: &'static str,
                      get: fn(&RegisterForm) -> &String,
                      set: fn(&mut RegisterForm, String)| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || form.with(|f| get(f).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create Account"</h1>
                <p class="login-card__subtitle">"Start planning your next trip"</p>
                <form class="login-form" on:submit=on_submit>
                    {field("First name", "text", |f| &f.first_name, |f, v| f.first_name = v)}
                    {field("Last name", "text", |f| &f.last_name, |f, v| f.last_name = v)}
                    {field("you@example.com", "email", |f| &f.email, |f, v| f.email = v)}
                    {field("Password", "password", |f| &f.password, |f, v| f.password = v)}
                    {field("Confirm password", "password", |f| &f.confirm_password, |f, v| f.confirm_password = v)}
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already have an account? " <a href="/auth/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
