//! In-memory doubles for the browser stores, navigation and HTTP.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::config::ClientConfig;
use crate::error::{ApiError, StorageError};
use crate::net::gateway::{ApiGateway, ApiRequest, ApiResponse, Navigator, Transport};
use crate::net::types::Profile;
use crate::session::AuthContext;
use crate::session::store::{CookieStore, DurableStore};
use crate::util::cookie::CookieOptions;

#[derive(Default)]
pub struct MemoryCookies {
    jar: Mutex<HashMap<String, (String, CookieOptions)>>,
}

impl MemoryCookies {
    pub fn value(&self, name: &str) -> Option<String> {
        self.jar.lock().unwrap().get(name).map(|(v, _)| v.clone())
    }

    pub fn options(&self, name: &str) -> Option<CookieOptions> {
        self.jar.lock().unwrap().get(name).map(|(_, o)| o.clone())
    }

    pub fn put(&self, name: &str, value: &str) {
        let options = CookieOptions::expiring_in(std::time::Duration::from_secs(60), false);
        self.jar.lock().unwrap().insert(name.to_owned(), (value.to_owned(), options));
    }
}

impl CookieStore for MemoryCookies {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(name).filter(|v| !v.is_empty()))
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> Result<(), StorageError> {
        self.jar.lock().unwrap().insert(name.to_owned(), (value.to_owned(), options.clone()));
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.jar.lock().unwrap().remove(name);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDurable {
    items: Mutex<HashMap<String, String>>,
    broken: bool,
}

impl MemoryDurable {
    /// Store whose every operation fails, as when storage is disabled.
    pub fn broken() -> Self {
        Self { broken: true, ..Self::default() }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.items.lock().unwrap().insert(key.to_owned(), value.to_owned());
    }
}

impl DurableStore for MemoryDurable {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.broken {
            return Err(StorageError::Unavailable);
        }
        Ok(self.raw(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.broken {
            return Err(StorageError::Rejected("quota".to_owned()));
        }
        self.put(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.broken {
            return Err(StorageError::Unavailable);
        }
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

/// `AuthContext` plus direct handles on its stores.
pub struct Harness {
    pub auth: AuthContext,
    pub cookies: Arc<MemoryCookies>,
    pub durable: Arc<MemoryDurable>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_durable(MemoryDurable::default())
    }

    pub fn with_durable(durable: MemoryDurable) -> Self {
        let cookies = Arc::new(MemoryCookies::default());
        let durable = Arc::new(durable);
        let auth = AuthContext::new(ClientConfig::default(), cookies.clone(), durable.clone());
        Self { auth, cookies, durable }
    }

    pub fn persisted(&self) -> Option<String> {
        self.durable.raw(&self.auth.config().persist_key)
    }

    pub fn persist_raw(&self, raw: &str) {
        self.durable.put(&self.auth.config().persist_key, raw);
    }

    pub fn access_cookie(&self) -> Option<String> {
        self.cookies.value("authToken")
    }

    pub fn refresh_cookie(&self) -> Option<String> {
        self.cookies.value("refreshToken")
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub path: Mutex<String>,
    pub redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self { path: Mutex::new(path.to_owned()), redirects: Mutex::new(Vec::new()) }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.lock().unwrap().push(path.to_owned());
    }
}

/// Transport answering from a queue of canned responses.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Result<ApiResponse, ApiError>>>>,
    pub requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(ApiResponse { status, body: body.to_string() }));
        self
    }

    pub fn fail(&self, error: ApiError) -> &Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.replies.lock().unwrap().pop_front().unwrap_or(Err(ApiError::Network("no scripted reply".to_owned())))
    }
}

/// Gateway over a scripted transport with a navigator parked at `path`.
pub fn gateway_at(harness: &Harness, path: &str) -> (ApiGateway<ScriptedTransport>, ScriptedTransport, Arc<RecordingNavigator>) {
    let transport = ScriptedTransport::default();
    let navigator = Arc::new(RecordingNavigator::at(path));
    let gateway = ApiGateway::new(harness.auth.clone(), transport.clone(), navigator.clone());
    (gateway, transport, navigator)
}

pub fn profile(first: &str) -> Profile {
    Profile {
        id: Some(format!("id-{first}")),
        first_name: first.to_owned(),
        last_name: "Traveler".to_owned(),
        email: format!("{}@example.com", first.to_ascii_lowercase()),
        avatar: None,
        verified: true,
        created_at: None,
        updated_at: None,
    }
}
