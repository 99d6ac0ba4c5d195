use super::*;
use crate::net::types::AuthResponse;
use crate::session::guard::{self, GuardState};
use crate::session::persist;
use crate::state::session::Session;
use crate::testing::{Harness, gateway_at};

fn signed_in_harness() -> Harness {
    let h = Harness::new();
    h.auth.rehydrate();
    h.auth.establish(&AuthResponse {
        success: true,
        message: String::new(),
        user: None,
        token: Some("t1".to_owned()),
        refresh_token: Some("r1".to_owned()),
    });
    h
}

// =============================================================
// Request preparation
// =============================================================

#[test]
fn prepare_attaches_memory_token() {
    let h = signed_in_harness();
    let (gateway, _, _) = gateway_at(&h, "/dashboard");
    let request = gateway.prepare(Method::Get, "/itineraries", None);
    assert_eq!(request.url, "http://localhost:5000/api/v1/itineraries");
    assert_eq!(request.header("authorization"), Some("Bearer t1"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
}

#[test]
fn prepare_falls_back_to_cookie_then_snapshot() {
    let h = Harness::new();
    let (gateway, _, _) = gateway_at(&h, "/dashboard");

    h.persist_raw(&persist::encode(&Session::new(None, Some("disk".to_owned()), None)).unwrap());
    assert_eq!(gateway.prepare(Method::Get, "/x", None).header("Authorization"), Some("Bearer disk"));

    h.cookies.put("authToken", "cookie");
    assert_eq!(gateway.prepare(Method::Get, "/x", None).header("Authorization"), Some("Bearer cookie"));
}

#[test]
fn prepare_without_token_sends_no_authorization() {
    let h = Harness::new();
    let (gateway, _, _) = gateway_at(&h, "/");
    assert_eq!(gateway.prepare(Method::Post, "/auth/login", None).header("Authorization"), None);
}

#[test]
fn authorization_failure_statuses() {
    assert!(is_authorization_failure(401));
    assert!(is_authorization_failure(403));
    assert!(!is_authorization_failure(400));
    assert!(!is_authorization_failure(500));
}

// =============================================================
// Response handling
// =============================================================

#[tokio::test]
async fn success_decodes_json_body() {
    let h = signed_in_harness();
    let (gateway, transport, _) = gateway_at(&h, "/dashboard");
    transport.reply(200, serde_json::json!({ "success": true, "message": "ok" }));

    let resp: AuthResponse = gateway.send_json(Method::Get, "/users/me", None::<&()>).await.unwrap();
    assert!(resp.success);
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].body, None);
}

#[tokio::test]
async fn json_body_is_serialized() {
    let h = Harness::new();
    let (gateway, transport, _) = gateway_at(&h, "/auth/login");
    transport.reply(200, serde_json::json!({}));

    let body = serde_json::json!({ "email": "a@b.com" });
    let _: serde_json::Value = gateway.send_json(Method::Post, "/auth/resend-verification", Some(&body)).await.unwrap();
    assert_eq!(transport.sent()[0].body.as_deref(), Some(r#"{"email":"a@b.com"}"#));
}

#[tokio::test]
async fn unauthorized_evicts_everything_and_redirects_once() {
    let h = signed_in_harness();
    let (gateway, transport, navigator) = gateway_at(&h, "/dashboard");
    transport
        .reply(401, serde_json::json!({ "message": "jwt expired" }))
        .reply(401, serde_json::json!({}));

    let first = gateway.execute(gateway.prepare(Method::Get, "/itineraries", None)).await;
    assert_eq!(first, Err(ApiError::Unauthorized { status: 401, message: Some("jwt expired".to_owned()) }));
    assert!(!h.auth.container().is_authenticated());
    assert_eq!(h.access_cookie(), None);
    assert_eq!(h.refresh_cookie(), None);
    assert_eq!(h.persisted(), None);

    let second = gateway.execute(gateway.prepare(Method::Get, "/itineraries", None)).await;
    assert!(matches!(second, Err(ApiError::Unauthorized { status: 401, .. })));
    assert_eq!(navigator.redirects(), vec!["/auth/login".to_owned()]);
}

#[tokio::test]
async fn unauthorized_request_is_not_retried() {
    let h = signed_in_harness();
    let (gateway, transport, _) = gateway_at(&h, "/dashboard");
    transport.reply(401, serde_json::json!({})).reply(200, serde_json::json!({}));

    let _ = gateway.execute(gateway.prepare(Method::Get, "/itineraries", None)).await;
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test]
async fn forbidden_is_treated_like_unauthorized() {
    let h = signed_in_harness();
    let (gateway, transport, navigator) = gateway_at(&h, "/itineraries/42");
    transport.reply(403, serde_json::json!({}));

    let result = gateway.execute(gateway.prepare(Method::Delete, "/itineraries/42", None)).await;
    assert!(matches!(result, Err(ApiError::Unauthorized { status: 403, .. })));
    assert_eq!(h.auth.bearer_token(), None);
    assert_eq!(navigator.redirects(), vec!["/auth/login".to_owned()]);
}

#[tokio::test]
async fn no_redirect_when_already_on_login() {
    let h = signed_in_harness();
    let (gateway, transport, navigator) = gateway_at(&h, "/auth/login");
    transport.reply(401, serde_json::json!({ "message": "Invalid credentials" }));

    let result = gateway.execute(gateway.prepare(Method::Post, "/auth/login", None)).await;
    assert!(result.is_err());
    assert!(navigator.redirects().is_empty());
    assert!(!h.auth.container().is_authenticated());
}

#[tokio::test]
async fn rearm_allows_redirect_for_next_session() {
    let h = signed_in_harness();
    let (gateway, transport, navigator) = gateway_at(&h, "/dashboard");
    transport.reply(401, serde_json::json!({})).reply(401, serde_json::json!({}));

    let _ = gateway.execute(gateway.prepare(Method::Get, "/a", None)).await;
    gateway.rearm();
    let _ = gateway.execute(gateway.prepare(Method::Get, "/b", None)).await;
    assert_eq!(navigator.redirects().len(), 2);
}

#[tokio::test]
async fn guard_does_not_redirect_after_gateway_did() {
    let h = signed_in_harness();
    let (gateway, transport, navigator) = gateway_at(&h, "/dashboard");
    transport.reply(401, serde_json::json!({}));

    let _ = gateway.execute(gateway.prepare(Method::Get, "/users/me", None)).await;
    assert_eq!(navigator.redirects().len(), 1);

    // The eviction flips the guard to unauthenticated on the same cycle.
    assert!(!guard::should_redirect(gateway.latch(), GuardState::Unauthenticated));

    // A new protected-route entry rearms the shared latch.
    gateway.latch().rearm();
    assert!(guard::should_redirect(gateway.latch(), GuardState::Unauthenticated));
}

#[tokio::test]
async fn public_rejection_is_a_status_and_keeps_credentials() {
    let h = signed_in_harness();
    let (gateway, transport, navigator) = gateway_at(&h, "/auth/login");
    transport.reply(401, serde_json::json!({ "message": "Invalid email or password" }));

    let result = gateway.execute_public(gateway.prepare(Method::Post, "/auth/login", None)).await;
    assert_eq!(result, Err(ApiError::Status { status: 401, message: Some("Invalid email or password".to_owned()) }));
    assert!(h.auth.container().is_authenticated());
    assert_eq!(h.access_cookie().as_deref(), Some("t1"));
    assert_eq!(h.refresh_cookie().as_deref(), Some("r1"));
    assert!(h.persisted().is_some());
    assert!(navigator.redirects().is_empty());
    assert!(!gateway.latch().has_fired());
}

#[tokio::test]
async fn public_json_decodes_success() {
    let h = Harness::new();
    let (gateway, transport, _) = gateway_at(&h, "/auth/register");
    transport.reply(201, serde_json::json!({ "success": true, "message": "created" }));

    let body = serde_json::json!({ "email": "a@b.com" });
    let resp: AuthResponse = gateway.send_public_json(Method::Post, "/auth/register", Some(&body)).await.unwrap();
    assert_eq!(resp.message, "created");
}

#[tokio::test]
async fn other_errors_keep_credentials() {
    let h = signed_in_harness();
    let (gateway, transport, navigator) = gateway_at(&h, "/dashboard");
    transport
        .reply(422, serde_json::json!({ "message": "Destination required" }))
        .fail(ApiError::Network("offline".to_owned()));

    let invalid = gateway.execute(gateway.prepare(Method::Post, "/itineraries", None)).await;
    assert_eq!(invalid, Err(ApiError::Status { status: 422, message: Some("Destination required".to_owned()) }));
    let offline = gateway.execute(gateway.prepare(Method::Get, "/itineraries", None)).await;
    assert_eq!(offline, Err(ApiError::Network("offline".to_owned())));

    assert!(h.auth.container().is_authenticated());
    assert_eq!(h.access_cookie().as_deref(), Some("t1"));
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn undecodable_body_is_decode_error() {
    let h = Harness::new();
    let (gateway, transport, _) = gateway_at(&h, "/");
    transport.reply(200, serde_json::json!("just a string"));

    let result: Result<AuthResponse, ApiError> = gateway.send_json(Method::Get, "/users/me", None::<&()>).await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn http_transport_is_unavailable_off_browser() {
    let transport = HttpTransport::new(Duration::from_secs(1));
    let request = ApiRequest { method: Method::Get, url: "http://x".to_owned(), headers: Vec::new(), body: None };
    assert_eq!(transport.execute(request).await, Err(ApiError::Unavailable));
}
