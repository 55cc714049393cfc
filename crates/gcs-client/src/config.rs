//! Client configuration

use std::time::Duration;

/// DNS root of the service; bucket hosts hang off it
pub const DEFAULT_SERVICE_ROOT: &str = "storage.googleapis.com";

/// XML API version sent with every request
pub const DEFAULT_API_VERSION: &str = "2";

/// Client configuration.
///
/// Immutable once the client is built; operations read from it but never
/// write back.
#[derive(Clone, Debug)]
pub struct Config {
    /// Project identifier sent with every request
    pub project_id: String,
    /// API version header value
    pub api_version: String,
    /// Service DNS root; bucket-scoped hosts are `{bucket}.{service_root}`
    pub service_root: String,
    /// Bearer token attached by the transport; requests go out
    /// unauthenticated when absent
    pub access_token: Option<String>,
    /// Request timeout enforced by the transport
    pub timeout: Duration,
    /// Fallback values for CORS configuration fields
    pub cors_defaults: CorsDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            service_root: DEFAULT_SERVICE_ROOT.to_string(),
            access_token: None,
            timeout: Duration::from_secs(30),
            cors_defaults: CorsDefaults::default(),
        }
    }
}

impl Config {
    /// Create a new config for the given project
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    /// Set the access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Point at a different service root (e.g. a local fake)
    pub fn with_service_root(mut self, service_root: impl Into<String>) -> Self {
        self.service_root = service_root.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fallback values for CORS configuration fields, applied element by
/// element when a rule has blanks
#[derive(Clone, Debug)]
pub struct CorsDefaults {
    /// Origin used when none is given
    pub origin: String,
    /// HTTP method used when none is given
    pub method: String,
    /// Response header name used when none is given
    pub response_header: String,
    /// Preflight cache lifetime used when none is given, whole seconds
    pub max_age_sec: i64,
}

impl Default for CorsDefaults {
    fn default() -> Self {
        Self {
            origin: "*".to_string(),
            method: "GET".to_string(),
            response_header: "gcs-demo".to_string(),
            max_age_sec: 1800,
        }
    }
}
