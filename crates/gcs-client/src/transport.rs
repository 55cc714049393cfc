//! Transport seam between the client and the network
//!
//! The client hands a finished [`WireRequest`] to a [`Transport`] and gets
//! the raw response back. Authorization lives entirely on this side of the
//! seam: the production transport attaches the bearer token, and the
//! request-building layer never sees credentials.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client, Method};
use thiserror::Error;
use tracing::debug;

/// Transport faults
#[derive(Error, Debug)]
pub enum TransportError {
    /// The target host could not be resolved
    #[error("could not resolve host for {0}")]
    HostNotFound(String),

    /// Any other HTTP-level fault, surfaced as-is
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A finished request, as given to a transport
#[derive(Clone, Debug)]
pub struct WireRequest {
    /// Absolute URL
    pub url: String,
    /// HTTP method
    pub method: Method,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: Option<Bytes>,
}

/// What came back from the service
#[derive(Clone, Debug)]
pub struct WireResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase paired with the status
    pub reason: String,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body
    pub body: Bytes,
}

/// Sends one request and returns the raw response.
///
/// Implementations report every status as a response; deciding which
/// statuses are failures is the caller's business. Name-resolution
/// failures are the one fault class reported distinctly.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

/// Production transport over reqwest, with optional bearer auth
pub struct ReqwestTransport {
    http: Client,
    access_token: Option<String>,
}

impl ReqwestTransport {
    /// Build a transport; requests go out unauthenticated when the token
    /// is absent
    pub fn new(access_token: Option<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, access_token })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let mut outgoing = self
            .http
            .request(request.method.clone(), request.url.as_str());

        if let Some(token) = &self.access_token {
            outgoing = outgoing.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        for (name, value) in &request.headers {
            outgoing = outgoing.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            outgoing = outgoing.body(body);
        }

        debug!("Sending {} request to {}", request.method, request.url);
        let response = match outgoing.send().await {
            Ok(response) => response,
            Err(err) if is_dns_failure(&err) => {
                return Err(TransportError::HostNotFound(request.url));
            }
            Err(err) => return Err(err.into()),
        };

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_string(), value.to_string());
            }
        }
        let body = response.bytes().await?;

        Ok(WireResponse {
            status: status.as_u16(),
            reason,
            headers,
            body,
        })
    }
}

/// Whether a reqwest error is a failed host lookup. The resolver fault
/// sits somewhere down the source chain of a connect error.
fn is_dns_failure(err: &reqwest::Error) -> bool {
    if !err.is_connect() {
        return false;
    }
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return true;
        }
        source = cause.source();
    }
    false
}
