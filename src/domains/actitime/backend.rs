//! HTTP backend abstraction for the actiTIME API.
//!
//! The client builds an [`ApiRequest`] per call and hands it to an
//! [`HttpBackend`]. The production backend uses reqwest; tests swap in
//! [`testing::RecordingBackend`] to observe outbound requests.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use crate::core::config::ActitimeConfig;

/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// A single outbound API request, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, starting with `/`.
    pub path: String,
    /// Already URL-encoded query string, without the leading `?`.
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    pub fn with_query(mut self, query: String) -> Self {
        if !query.is_empty() {
            self.query = Some(query);
        }
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path and query as they appear on the wire.
    pub fn target(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

/// Trait for backends that execute API requests and return the JSON body.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Execute the request once and return the response body.
    async fn execute(&self, request: ApiRequest) -> ApiResult<Value>;
}

/// Compute the `Authorization` header value for HTTP Basic auth.
pub fn basic_auth_value(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production backend using reqwest.
///
/// Credentials are installed as a default header; the JSON content type is
/// set on each request. No timeout and no retry are configured.
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestBackend {
    /// Create a backend for the configured base URL and credentials.
    pub fn new(config: &ActitimeConfig) -> ApiResult<Self> {
        let mut auth = HeaderValue::from_str(&basic_auth_value(&config.username, &config.password))
            .map_err(|e| ApiError::config(format!("credentials are not a valid header: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.target())
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: ApiRequest) -> ApiResult<Value> {
        let url = self.url_for(&request);
        debug!("{} {}", request.method, url);

        // The charset must be present on requests with a body as well.
        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(parse_body(&text));
        }

        warn!("{} {} failed with status {}", request.method, url, status);
        if text.trim().is_empty() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Err(ApiError::Remote {
            status: status.as_u16(),
            body: error_body(&text),
        })
    }
}

/// Interpret a success body: JSON when it parses, a JSON string otherwise.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Render an error body as the message surfaced to callers.
fn error_body(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => value.to_string(),
        Err(_) => text.to_string(),
    }
}

// ============================================================================
// Recording Backend for Testing
// ============================================================================
