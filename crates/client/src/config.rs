//! Where the auth backend lives and how to authenticate against it.
//!
//! Resolved once by the host at startup and handed to the transport; nothing
//! in this crate reads ambient globals on its own.

use std::collections::HashMap;
use std::sync::RwLock;

/// Relative proxy path used when no explicit base URL is configured.
pub const DEFAULT_AUTH_BASE_URL: &str = "/api/auth";

/// Storage key under which the client keeps the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Static host configuration document, relative to the host origin.
pub const HOST_CONFIG_PATH: &str = "/auth-admin.config.json";

/// Which side of the rendering pipeline is building the client.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderSide {
    /// Running standalone; a host-provided global base URL may apply.
    Client,
    /// Running inside server-side rendering; always the proxy path.
    Server,
}

/// Read access to the client's persistent key/value storage.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// In-process [`TokenStore`].
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), value.into());
        }
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClientConfig {
    /// Base URL of the auth API; may be relative to `origin`.
    pub base_url: String,
    /// Scheme and host that relative base URLs hang off, e.g.
    /// `http://localhost:3000`.
    pub origin: Option<String>,
    /// Bearer token, when the user has one.
    pub token: Option<String>,
}

impl AuthClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            origin: None,
            token: None,
        }
    }

    /// Pick the base URL for the given side.
    ///
    /// The client side honours a host-provided global value; the server side
    /// always uses the proxy path.
    pub fn resolve(side: RenderSide, global_base_url: Option<&str>) -> Self {
        let base_url = match (side, global_base_url) {
            (RenderSide::Client, Some(url)) if !url.trim().is_empty() => url.trim().to_string(),
            _ => DEFAULT_AUTH_BASE_URL.to_string(),
        };
        Self::new(base_url)
    }

    /// Resolve from `AUTH_ADMIN_BASE_URL`, `AUTH_ADMIN_ORIGIN` and
    /// `AUTH_ADMIN_TOKEN`.
    pub fn from_env() -> Self {
        let global = std::env::var("AUTH_ADMIN_BASE_URL").ok();
        let mut config = Self::resolve(RenderSide::Client, global.as_deref());
        config.origin = std::env::var("AUTH_ADMIN_ORIGIN").ok();
        config.token = std::env::var("AUTH_ADMIN_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        if config.token.is_none() {
            tracing::debug!("AUTH_ADMIN_TOKEN not set; requests rely on cookies");
        }
        config
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Take the token stored under [`AUTH_TOKEN_KEY`], if any.
    pub fn with_token_from(mut self, store: &dyn TokenStore) -> Self {
        self.token = store.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty());
        self
    }

    /// Absolute URL for `path` under the base URL.
    pub fn endpoint_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let joined = format!("{base}{path}");
        match &self.origin {
            Some(origin) if !is_absolute(&joined) => {
                format!("{}{}", origin.trim_end_matches('/'), joined)
            }
            _ => joined,
        }
    }
}

impl Default for AuthClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_BASE_URL)
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
