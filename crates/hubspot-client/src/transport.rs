//! Outbound request transport.
//!
//! [`Transport`] is the seam between resource operations and the network:
//! one [`RequestSpec`] in, one JSON value (or typed error) out.
//! [`HttpTransport`] is the reqwest-backed implementation used in
//! production; tests substitute their own.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde_json::{json, Value};

use crate::auth::{resolve_auth, AuthParts, Credential};
use crate::error::{Error, Result};

/// Fixed per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Message returned in place of an empty `204 No Content` body.
pub const NO_CONTENT_MESSAGE: &str = "Operation completed successfully";

// ============================================================================
// RequestSpec
// ============================================================================

/// A single outbound call, built per invocation and consumed by the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL, e.g. `/crm/v3/objects/contacts`.
    pub path: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl RequestSpec {
    /// Create a request with no query parameters or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// `GET path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PATCH path`
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

// ============================================================================
// Transport trait
// ============================================================================

/// Capability to issue one request against the remote resource API.
///
/// Implementations must be safe to share between concurrent invocations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request and return the decoded JSON response.
    async fn send(&self, request: RequestSpec) -> Result<Value>;

    /// Release the underlying channel. Calling this more than once is a no-op.
    async fn close(&self) -> Result<()>;
}

// ============================================================================
// HttpTransport
// ============================================================================

/// reqwest-backed [`Transport`] bound to a single base URL.
///
/// Authentication is resolved once, here, from the credential handed to
/// [`HttpTransport::builder`]. After [`Transport::close`], new requests fail
/// with [`Error::Closed`]; requests already in flight keep their own handle
/// to the connection pool and complete normally.
pub struct HttpTransport {
    base_url: Url,
    auth_query: Vec<(String, String)>,
    client: RwLock<Option<reqwest::Client>>,
}

impl HttpTransport {
    /// Create a transport with the default timeout.
    pub fn new(base_url: &str, credential: Option<Credential>) -> Result<Self> {
        Self::builder(base_url).credential(credential).build()
    }

    /// Start building a transport for `base_url`.
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder {
            base_url: base_url.into(),
            credential: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The base URL every request path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether [`Transport::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn resolve_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::config(format!("cannot join '{path}' onto base URL: {e}")))
    }

    fn handle(&self) -> Result<reqwest::Client> {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::Closed)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RequestSpec) -> Result<Value> {
        let client = self.handle()?;
        let url = self.resolve_url(&request.path)?;

        tracing::debug!(method = %request.method, path = %request.path, "HubSpot request");

        let mut builder = client.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if !self.auth_query.is_empty() {
            builder = builder.query(&self.auth_query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(path = %request.path, "Error making request: {e}");
            Error::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("HTTP error occurred: {} - {}", status.as_u16(), body);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(json!({ "success": true, "message": NO_CONTENT_MESSAGE }));
        }

        let bytes = response.bytes().await.map_err(Error::Network)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn close(&self) -> Result<()> {
        let previous = self
            .client
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::debug!(base_url = %self.base_url, "HTTP transport closed");
        }
        Ok(())
    }
}

/// Builder for [`HttpTransport`].
pub struct HttpTransportBuilder {
    base_url: String,
    credential: Option<Credential>,
    timeout: Duration,
}

impl HttpTransportBuilder {
    /// Set (or clear) the credential.
    pub fn credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the transport, resolving authentication once.
    pub fn build(self) -> Result<HttpTransport> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid base URL '{}': {e}", self.base_url)))?;

        let AuthParts { headers, query } = resolve_auth(self.credential.as_ref());
        let default_headers = header_map(headers)?;

        match &self.credential {
            Some(credential) => {
                tracing::debug!(kind = credential.kind(), "HubSpot credential configured")
            }
            None => tracing::warn!("No HubSpot credential configured; requests are unauthenticated"),
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpTransport {
            base_url,
            auth_query: query,
            client: RwLock::new(Some(client)),
        })
    }
}

fn header_map(auth_headers: Vec<(String, String)>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in auth_headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::config(format!("invalid header name: {e}")))?;
        let mut value = HeaderValue::from_str(&value)
            .map_err(|_| Error::config("credential contains characters not valid in a header"))?;
        value.set_sensitive(true);
        headers.insert(name, value);
    }

    Ok(headers)
}

// ============================================================================
// Tests
// ============================================================================
