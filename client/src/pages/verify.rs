//! Email verification landing page (`/verify?token=...`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened from the link in the verification email. The token is submitted
//! once on load; a reply that signs the user in schedules a move to the home
//! route after a short pause. Tearing the page down cancels that pause: the
//! timer is dropped, not merely ignored when it fires. Failed or expired
//! links can request a fresh email.

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;

use std::time::Duration;

#[cfg(any(feature = "hydrate", test))]
use futures::channel::oneshot;
#[cfg(any(feature = "hydrate", test))]
use futures::future::{Either, select};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::gateway::ApiGateway;
use crate::session::actions::{self, AuthOutcome};

pub(crate) const REDIRECT_DELAY: Duration = Duration::from_secs(2);
const MISSING_TOKEN: &str = "No verification token provided";
const VERIFIED: &str = "Email verified successfully!";
const RESENT: &str = "Verification email sent! Check your inbox.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum VerifyStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What the page shows once the verification call has returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct VerifyResult {
    pub status: VerifyStatus,
    pub message: String,
    pub redirect: bool,
}

/// Non-blank `token` query value.
pub(crate) fn verify_token(query: Option<String>) -> Result<String, &'static str> {
    query
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or(MISSING_TOKEN)
}

pub(crate) fn after_verify(result: Result<AuthOutcome, String>) -> VerifyResult {
    match result {
        Ok(outcome) => {
            let message = match outcome.message().trim() {
                "" => VERIFIED.to_owned(),
                message => message.to_owned(),
            };
            VerifyResult { status: VerifyStatus::Success, message, redirect: outcome.is_signed_in() }
        }
        Err(message) => VerifyResult { status: VerifyStatus::Error, message, redirect: false },
    }
}

/// Wait out `delay` unless `cancel` resolves first. A dropped sender counts
/// as a cancel. Returns `true` only when the delay completed; the losing
/// future is dropped before returning.
#[cfg(any(feature = "hydrate", test))]
pub(crate) async fn delay_or_cancel<F>(delay: F, cancel: oneshot::Receiver<()>) -> bool
where
    F: Future<Output = ()> + Unpin,
{
    matches!(select(delay, cancel).await, Either::Left(_))
}

pub(crate) fn validate_resend_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Please enter your email");
    }
    Ok(email.to_owned())
}

#[component]
pub fn VerifyPage() -> impl IntoView {
    let gateway = expect_context::<ApiGateway>();
    let navigate = use_navigate();
    let query = use_query_map();
    let home = gateway.auth().config().home_path.clone();

    let status = RwSignal::new(VerifyStatus::Idle);
    let message = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let resending = RwSignal::new(false);

    match verify_token(query.get_untracked().get("token")) {
        Err(missing) => {
            status.set(VerifyStatus::Error);
            message.set(missing.to_owned());
        }
        Ok(token) => {
            status.set(VerifyStatus::Loading);

            #[cfg(feature = "hydrate")]
            {
                use std::sync::Arc;
                use std::sync::atomic::{AtomicBool, Ordering};

                let alive = Arc::new(AtomicBool::new(true));
                let alive_task = alive.clone();
                let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
                let gateway = gateway.clone();
                let navigate = navigate.clone();
                let home = home.clone();
                leptos::task::spawn_local(async move {
                    gateway.auth().container().hydrated().await;
                    let result = after_verify(actions::verify_email(&gateway, &token).await);
                    if !alive_task.load(Ordering::Relaxed) {
                        return;
                    }
                    status.set(result.status);
                    message.set(result.message);
                    if !result.redirect {
                        return;
                    }
                    let timer = Box::pin(gloo_timers::future::sleep(REDIRECT_DELAY));
                    if delay_or_cancel(timer, cancel_rx).await {
                        navigate(&home, NavigateOptions::default());
                    }
                });
                on_cleanup(move || {
                    alive.store(false, Ordering::Relaxed);
                    let _ = cancel_tx.send(());
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&navigate, &home, token);
            }
        }
    }

    let on_resend = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if resending.get() {
            return;
        }
        let email_value = match validate_resend_email(&email.get()) {
            Ok(value) => value,
            Err(prompt) => {
                message.set(prompt.to_owned());
                return;
            }
        };
        resending.set(true);

        #[cfg(feature = "hydrate")]
        {
            let gateway = gateway.clone();
            leptos::task::spawn_local(async move {
                match actions::resend_verification(&gateway, &email_value).await {
                    Ok(_) => {
                        message.set(RESENT.to_owned());
                        status.set(VerifyStatus::Idle);
                    }
                    Err(failure) => message.set(failure),
                }
                resending.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&gateway, email_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card verify-card">
                <h1>"Email Verification"</h1>
                <Show when=move || status.get() == VerifyStatus::Loading>
                    <p class="login-card__subtitle">"Verifying your email..."</p>
                </Show>
                <Show when=move || status.get() == VerifyStatus::Success>
                    <p class="login-message login-message--success">{move || message.get()}</p>
                    <a class="login-button" href="/dashboard">"Go to Dashboard"</a>
                </Show>
                <Show when=move || matches!(status.get(), VerifyStatus::Error | VerifyStatus::Idle)>
                    <Show when=move || !message.get().is_empty()>
                        <p class="login-message">{move || message.get()}</p>
                    </Show>
                    <form class="login-form" on:submit=on_resend.clone()>
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || resending.get()>
                            {move || if resending.get() { "Sending..." } else { "Resend verification email" }}
                        </button>
                    </form>
                    <a class="login-card__footer" href="/auth/login">"Back to login"</a>
                </Show>
            </div>
        </div>
    }
}
