//! Sign-in, sign-up and verification flows.
//!
//! Each flow calls the API through the gateway and, only when the response
//! carries an access token, hands it to [`AuthContext::establish`]. Failures
//! come back as a user-facing message and leave every credential store as it
//! was.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use leptos::logging::log;

use crate::error::ApiError;
use crate::net::api;
use crate::net::gateway::{ApiGateway, Transport};
use crate::net::types::{
    AuthResponse, LoginRequest, Profile, RefreshRequest, RegisterRequest, ResendVerificationRequest,
    VerifyEmailRequest,
};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const VERIFICATION_FAILED: &str = "Verification failed";
pub const RESEND_FAILED: &str = "Failed to resend verification email";
pub const REFRESH_FAILED: &str = "Session refresh failed";

/// Result of a flow the server accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials were stored; the user is signed in.
    SignedIn { message: String },
    /// Accepted, but no access token yet (e.g. email not verified).
    Pending { message: String },
}

impl AuthOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::SignedIn { message } | Self::Pending { message } => message,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }
}

/// Sign in with email and password.
///
/// # Errors
///
/// Returns the message to show when the request fails or is refused.
pub async fn login<T: Transport>(gateway: &ApiGateway<T>, email: &str, password: &str) -> Result<AuthOutcome, String> {
    let body = LoginRequest { email: email.trim().to_owned(), password: password.to_owned() };
    let response = api::login(gateway, &body).await;
    settle(gateway, response, LOGIN_FAILED)
}

/// Create an account. The server may sign the user in immediately or ask
/// for email verification first.
///
/// # Errors
///
/// Returns the message to show when the request fails or is refused.
pub async fn register<T: Transport>(gateway: &ApiGateway<T>, body: RegisterRequest) -> Result<AuthOutcome, String> {
    let body = RegisterRequest { email: body.email.trim().to_owned(), ..body };
    let response = api::register(gateway, &body).await;
    settle(gateway, response, REGISTRATION_FAILED)
}

/// Confirm an email address with the token from the verification link.
///
/// # Errors
///
/// Returns the message to show when the token is missing or rejected.
pub async fn verify_email<T: Transport>(gateway: &ApiGateway<T>, token: &str) -> Result<AuthOutcome, String> {
    let token = token.trim();
    if token.is_empty() {
        return Err("No verification token provided".to_owned());
    }
    let response = api::verify_email(gateway, &VerifyEmailRequest { token: token.to_owned() }).await;
    settle(gateway, response, VERIFICATION_FAILED)
}

/// Send another verification email. Never touches credentials.
///
/// # Errors
///
/// Returns the message to show when the request fails or is refused.
pub async fn resend_verification<T: Transport>(gateway: &ApiGateway<T>, email: &str) -> Result<String, String> {
    let body = ResendVerificationRequest { email: email.trim().to_owned() };
    match api::resend_verification(gateway, &body).await {
        Ok(response) if response.success => Ok(non_blank(response.message, "Verification email sent")),
        Ok(response) => Err(non_blank(response.message, RESEND_FAILED)),
        Err(e) => Err(e.user_message(RESEND_FAILED)),
    }
}

/// Exchange the stored refresh token for a new access token.
///
/// A reply without a new refresh token keeps the one just used, and a reply
/// without a profile keeps the current one.
///
/// # Errors
///
/// Returns the message to show when no refresh token is stored or the
/// exchange is refused.
pub async fn refresh<T: Transport>(gateway: &ApiGateway<T>) -> Result<AuthOutcome, String> {
    let auth = gateway.auth();
    let Some(used) = auth.refresh_credential() else {
        return Err(REFRESH_FAILED.to_owned());
    };
    let response = api::refresh(gateway, &RefreshRequest { refresh_token: used.clone() }).await;
    let response = response.map(|mut r| {
        if r.refresh_token.as_deref().is_none_or(str::is_empty) {
            r.refresh_token = Some(used);
        }
        if r.user.is_none() {
            r.user = auth.container().snapshot().user().cloned();
        }
        r
    });
    settle(gateway, response, REFRESH_FAILED)
}

/// Fetch the signed-in user's profile once rehydration has finished.
///
/// Returns `Ok(None)` when nobody is signed in or the reply has no profile.
///
/// # Errors
///
/// Returns the gateway error; a 401/403 has already evicted the session.
pub async fn load_current_user<T: Transport>(gateway: &ApiGateway<T>) -> Result<Option<Profile>, ApiError> {
    let auth = gateway.auth();
    auth.container().hydrated().await;
    if !auth.resolve().is_authenticated() {
        return Ok(None);
    }
    let response = api::current_user(gateway).await?;
    Ok(response.user.filter(|user| auth.apply_profile(user.clone())))
}

/// Sign out locally: memory, both cookies and the durable snapshot.
///
/// Returns `true` when the caller owns the navigation to login. It is
/// `false` when the gateway or the route guard already redirected for this
/// session.
pub fn logout<T: Transport>(gateway: &ApiGateway<T>) -> bool {
    gateway.auth().evict();
    log!("signed out; credentials cleared");
    gateway.latch().try_fire()
}

fn settle<T: Transport>(
    gateway: &ApiGateway<T>,
    response: Result<AuthResponse, ApiError>,
    default: &str,
) -> Result<AuthOutcome, String> {
    let response = response.map_err(|e| e.user_message(default))?;
    if !response.success {
        return Err(non_blank(response.message, default));
    }
    if gateway.auth().establish(&response) {
        gateway.rearm();
        return Ok(AuthOutcome::SignedIn { message: response.message });
    }
    Ok(AuthOutcome::Pending { message: response.message })
}

fn non_blank(message: String, default: &str) -> String {
    if message.trim().is_empty() { default.to_owned() } else { message }
}
