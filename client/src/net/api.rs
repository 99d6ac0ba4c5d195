//! REST calls to the remote authentication API.
//!
//! Every call goes through [`ApiGateway`], so bearer attachment applies
//! uniformly. Credential submissions (register, login, verify, resend) use
//! the public path: a 401/403 there is a rejected form, not an expired
//! session, and must not evict. These functions only move DTOs; session
//! mutation lives in `session::actions`.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so network failures degrade
//! UI behavior without crashing hydration.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::gateway::{ApiGateway, Method, Transport};
use super::types::{
    AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, ResendVerificationRequest, VerifyEmailRequest,
};
use crate::error::ApiError;

pub(crate) const REGISTER_PATH: &str = "/auth/register";
pub(crate) const LOGIN_PATH: &str = "/auth/login";
pub(crate) const VERIFY_PATH: &str = "/auth/verify";
pub(crate) const RESEND_VERIFICATION_PATH: &str = "/auth/resend-verification";
pub(crate) const REFRESH_PATH: &str = "/auth/refresh-token";
pub(crate) const CURRENT_USER_PATH: &str = "/users/me";

/// Create an account via `POST /auth/register`.
///
/// # Errors
///
/// Returns an error if the request fails or the server rejects it.
pub async fn register<T: Transport>(gateway: &ApiGateway<T>, body: &RegisterRequest) -> Result<AuthResponse, ApiError> {
    gateway.send_public_json(Method::Post, REGISTER_PATH, Some(body)).await
}

/// Sign in via `POST /auth/login`.
///
/// # Errors
///
/// Returns an error if the request fails or the server rejects it.
pub async fn login<T: Transport>(gateway: &ApiGateway<T>, body: &LoginRequest) -> Result<AuthResponse, ApiError> {
    gateway.send_public_json(Method::Post, LOGIN_PATH, Some(body)).await
}

/// Confirm an email address via `POST /auth/verify`.
///
/// # Errors
///
/// Returns an error if the request fails or the token is rejected.
pub async fn verify_email<T: Transport>(
    gateway: &ApiGateway<T>,
    body: &VerifyEmailRequest,
) -> Result<AuthResponse, ApiError> {
    gateway.send_public_json(Method::Post, VERIFY_PATH, Some(body)).await
}

/// Ask for a new verification email via `POST /auth/resend-verification`.
///
/// # Errors
///
/// Returns an error if the request fails or the server rejects it.
pub async fn resend_verification<T: Transport>(
    gateway: &ApiGateway<T>,
    body: &ResendVerificationRequest,
) -> Result<AuthResponse, ApiError> {
    gateway.send_public_json(Method::Post, RESEND_VERIFICATION_PATH, Some(body)).await
}

/// Exchange a refresh token via `POST /auth/refresh-token`.
///
/// # Errors
///
/// Returns an error if the request fails or the refresh token is rejected.
pub async fn refresh<T: Transport>(gateway: &ApiGateway<T>, body: &RefreshRequest) -> Result<AuthResponse, ApiError> {
    gateway.send_json(Method::Post, REFRESH_PATH, Some(body)).await
}

/// Fetch the signed-in user via `GET /users/me`.
///
/// # Errors
///
/// Returns an error if the request fails; a 401/403 also evicts the session.
pub async fn current_user<T: Transport>(gateway: &ApiGateway<T>) -> Result<AuthResponse, ApiError> {
    gateway.send_json(Method::Get, CURRENT_USER_PATH, None::<&()>).await
}
