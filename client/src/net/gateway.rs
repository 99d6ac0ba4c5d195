//! API gateway: bearer attachment and authorization-failure eviction.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every REST call goes through [`ApiGateway`]. It reads the access token
//! from the fastest store holding one, and it is the only place that decides
//! a credential is invalid: a 401 or 403 on a session call evicts memory,
//! cookies and the durable snapshot, then sends the browser to the login
//! page once. The same [`RedirectLatch`] is shared with the route guard and
//! the logout button, so one dead session yields one navigation.
//!
//! Client-side (hydrate): HTTP via `gloo-net` with a `gloo-timers` timeout.
//! Server-side (SSR): the transport reports `ApiError::Unavailable`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::error_message;
use crate::error::ApiError;
use crate::session::AuthContext;
use crate::session::guard::RedirectLatch;

/// HTTP verb of an [`ApiRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Fully prepared outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes prepared requests.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Send `request` and collect the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent, did not complete in
    /// time, or the body could not be read. Non-2xx statuses are not errors
    /// at this layer.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Full-page navigation used for forced sign-out.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

/// Browser `fetch` transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};

            let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
            let timer = gloo_timers::future::TimeoutFuture::new(millis);
            match select(Box::pin(fetch(request)), timer).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(ApiError::Timeout(self.timeout)),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.timeout, request);
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "hydrate")]
async fn fetch(request: ApiRequest) -> Result<ApiResponse, ApiError> {
    use gloo_net::http::Request;

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Patch => Request::patch(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let prepared = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let resp = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(ApiResponse { status, body })
}

/// `window.location` navigator. No-op outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn redirect(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(path);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}

/// 401 and 403 both mean the credential is no longer accepted.
pub fn is_authorization_failure(status: u16) -> bool {
    matches!(status, 401 | 403)
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Whether a 401/403 means the stored session is dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Session,
    Public,
}

/// REST client bound to the session's credential stores.
#[derive(Clone)]
pub struct ApiGateway<T = HttpTransport> {
    auth: AuthContext,
    transport: T,
    navigator: Arc<dyn Navigator>,
    latch: RedirectLatch,
}

impl ApiGateway<HttpTransport> {
    /// Gateway over browser `fetch` and `window.location`.
    pub fn browser(auth: AuthContext) -> Self {
        let transport = HttpTransport::new(auth.config().request_timeout);
        Self::new(auth, transport, Arc::new(BrowserNavigator))
    }
}

impl<T: Transport> ApiGateway<T> {
    pub fn new(auth: AuthContext, transport: T, navigator: Arc<dyn Navigator>) -> Self {
        Self { auth, transport, navigator, latch: RedirectLatch::new() }
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Build a request for `path`, attaching JSON headers and the bearer token.
    pub fn prepare(&self, method: Method, path: &str, body: Option<String>) -> ApiRequest {
        let mut headers = vec![
            ("Accept".to_owned(), "application/json".to_owned()),
            ("Content-Type".to_owned(), "application/json".to_owned()),
        ];
        if let Some(token) = self.auth.bearer_token() {
            headers.push(("Authorization".to_owned(), bearer(&token)));
        }
        ApiRequest { method, url: self.auth.config().endpoint(path), headers, body }
    }

    /// Send a request and map the status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` on 401/403 (after evicting the
    /// session), `ApiError::Status` on any other non-2xx status, or the
    /// transport's error.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.dispatch(request, Access::Session).await
    }

    /// Send a request whose 401/403 is a rejected submission, not a dead
    /// session. Used by login, register, verify and resend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` on any non-2xx status, 401/403 included,
    /// or the transport's error. Credentials are never touched.
    pub async fn execute_public(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.dispatch(request, Access::Public).await
    }

    /// Send `body` as JSON and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails, the request fails (see
    /// [`execute`](Self::execute)), or the reply does not decode as `R`.
    pub async fn send_json<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(method, path, body, Access::Session).await
    }

    /// [`send_json`](Self::send_json) over [`execute_public`](Self::execute_public).
    ///
    /// # Errors
    ///
    /// Same as `send_json`, except 401/403 come back as `ApiError::Status`.
    pub async fn send_public_json<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(method, path, body, Access::Public).await
    }

    /// Latch shared by every redirect to login, gateway and route guard alike.
    pub fn latch(&self) -> &RedirectLatch {
        &self.latch
    }

    /// Allow the next authorization failure to redirect again. Called after
    /// a new credential has been established.
    pub fn rearm(&self) {
        self.latch.rearm();
    }

    async fn send<B, R>(&self, method: Method, path: &str, body: Option<&B>, access: Access) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = self.dispatch(self.prepare(method, path, body), access).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn dispatch(&self, request: ApiRequest, access: Access) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request).await?;
        if access == Access::Session && is_authorization_failure(response.status) {
            self.reject_credentials(response.status);
            return Err(ApiError::Unauthorized { status: response.status, message: error_message(&response.body) });
        }
        if !response.is_success() {
            return Err(ApiError::Status { status: response.status, message: error_message(&response.body) });
        }
        Ok(response)
    }

    fn reject_credentials(&self, status: u16) {
        leptos::logging::warn!("authorization rejected ({status}); clearing session");
        self.auth.evict();

        let login = &self.auth.config().login_path;
        if self.navigator.current_path().starts_with(login.as_str()) {
            return;
        }
        if self.latch.try_fire() {
            self.navigator.redirect(login);
        }
    }
}
