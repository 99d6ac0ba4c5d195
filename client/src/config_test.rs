use super::*;

#[test]
fn default_matches_remote_contract() {
    let config = ClientConfig::default();
    assert_eq!(config.api_base_url, "http://localhost:5000/api/v1");
    assert_eq!(config.persist_key, "persist:wanderwise-root");
    assert_eq!(config.access_cookie, "authToken");
    assert_eq!(config.refresh_cookie, "refreshToken");
    assert_eq!(config.access_ttl, Duration::from_secs(7 * 86_400));
    assert_eq!(config.refresh_ttl, Duration::from_secs(30 * 86_400));
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.login_path, "/auth/login");
}

#[test]
fn with_api_url_strips_trailing_slash() {
    let config = ClientConfig::with_api_url(Some("https://api.example.com/v2/"));
    assert_eq!(config.api_base_url, "https://api.example.com/v2");
}

#[test]
fn with_api_url_falls_back_on_blank() {
    let config = ClientConfig::with_api_url(Some("   "));
    assert_eq!(config.api_base_url, DEFAULT_API_URL);
    let config = ClientConfig::with_api_url(None);
    assert_eq!(config.api_base_url, DEFAULT_API_URL);
}

#[test]
fn endpoint_joins_with_single_slash() {
    let config = ClientConfig::default();
    assert_eq!(config.endpoint("/auth/login"), "http://localhost:5000/api/v1/auth/login");
    assert_eq!(config.endpoint("users/me"), "http://localhost:5000/api/v1/users/me");
}
