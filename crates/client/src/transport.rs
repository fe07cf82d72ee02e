//! The single seam through which every backend call goes.

use std::borrow::Cow;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use authadmin_core::{ClientError, ClientResult, HttpMethod};

use crate::config::AuthClientConfig;

/// One call against the auth backend, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Percent-encode one path segment so `#`, `?` and `/` inside an identifier
/// cannot change which resource a request addresses.
pub fn path_segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}

/// Sends [`ApiRequest`]s and returns the decoded JSON body.
///
/// Non-2xx answers become [`ClientError::Http`]; an empty 2xx body is
/// `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value>;
}

/// [`Transport`] over `reqwest`.
///
/// Attaches `Authorization: Bearer` when a token is configured and keeps a
/// cookie store so cookie sessions work as a fallback.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: AuthClientConfig,
}

impl HttpTransport {
    pub fn new(config: AuthClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::invalid_request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AuthClientConfig {
        &self.config
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let url = self.config.endpoint_url(&request.path);
        tracing::debug!(method = %request.method, %url, "dispatching auth request");

        let mut req = self
            .client
            .request(to_reqwest(request.method), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(token) = &self.config.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "auth request failed to send");
            ClientError::network(e.to_string())
        })?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), status.canonical_reason(), &bytes));
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ClientError::decode(e.to_string()))
    }
}

/// Build the error for a non-2xx answer.
///
/// Uses the JSON body's `message` (and `code`, if any); otherwise the status
/// text; otherwise `HTTP <status>`.
pub fn error_from_body(status: u16, status_text: Option<&str>, body: &[u8]) -> ClientError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let message = field("message")
        .or_else(|| status_text.map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {status}"));

    ClientError::Http {
        status,
        message,
        code: field("code"),
    }
}
