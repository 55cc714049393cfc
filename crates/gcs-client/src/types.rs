//! Common types for the client

use std::collections::HashMap;
use std::fmt;

/// A CORS rule for a bucket.
///
/// List order is preserved in the emitted XML. Empty lists and an unset
/// max-age fall back to the configured [`CorsDefaults`] when the rule is
/// serialized; a blank element inside a non-empty list is replaced by the
/// single corresponding default, leaving its siblings untouched.
///
/// [`CorsDefaults`]: crate::CorsDefaults
#[derive(Clone, Debug, Default)]
pub struct CorsRule {
    /// Allowed origins
    pub origins: Vec<String>,
    /// Allowed HTTP methods
    pub methods: Vec<String>,
    /// Response headers exposed to the browser
    pub response_headers: Vec<String>,
    /// Preflight cache lifetime
    pub max_age_sec: Option<MaxAge>,
}

/// Preflight cache lifetime, kept in the form the caller supplied so the
/// emitted text matches their intent.
#[derive(Clone, Debug, PartialEq)]
pub enum MaxAge {
    /// Whole seconds, rendered as an integer
    Seconds(i64),
    /// Fractional seconds, rendered in fixed-point decimal
    Fractional(f64),
    /// Pre-rendered text, emitted verbatim
    Text(String),
}

impl fmt::Display for MaxAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(value) => write!(f, "{}", value),
            Self::Fractional(value) => write!(f, "{:.6}", value),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Bucket placement constraint. Anything other than the two known regions
/// is treated as "no constraint" and no configuration body is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationConstraint {
    Us,
    Eu,
}

impl LocationConstraint {
    /// Wire value for the `LocationConstraint` element
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Eu => "EU",
        }
    }

    /// Parse a user-supplied token; unknown tokens mean "unset"
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "US" => Some(Self::Us),
            "EU" => Some(Self::Eu),
            _ => None,
        }
    }
}

/// Options for uploading an object
#[derive(Clone, Debug, Default)]
pub struct InsertObjectOptions {
    /// Explicit Content-Type; inferred from the object name when unset
    pub content_type: Option<String>,
    /// Explicit Content-Encoding; inferred from the object name when unset
    pub content_encoding: Option<String>,
    /// Canned ACL applied to the new object
    pub acl: Option<String>,
}

impl InsertObjectOptions {
    /// Create empty options (everything inferred, service-default ACL)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the content encoding
    pub fn with_content_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.content_encoding = Some(encoding.into());
        self
    }

    /// Set the canned ACL
    pub fn with_acl(mut self, acl: impl Into<String>) -> Self {
        self.acl = Some(acl.into());
        self
    }
}

/// Status line and headers of a response.
///
/// Returned by the metadata operation, which surfaces the whole envelope
/// instead of a body.
#[derive(Clone, Debug)]
pub struct ResponseEnvelope {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase paired with the status
    pub reason: String,
    /// Response headers
    pub headers: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_age_rendering() {
        assert_eq!(MaxAge::Seconds(1800).to_string(), "1800");
        assert_eq!(MaxAge::Seconds(0).to_string(), "0");
        assert_eq!(MaxAge::Fractional(1.5).to_string(), "1.500000");
        assert_eq!(MaxAge::Text("soon".to_string()).to_string(), "soon");
    }

    #[test]
    fn test_location_constraint_parsing() {
        assert_eq!(LocationConstraint::parse("US"), Some(LocationConstraint::Us));
        assert_eq!(LocationConstraint::parse("EU"), Some(LocationConstraint::Eu));
        assert_eq!(LocationConstraint::parse("eu"), None);
        assert_eq!(LocationConstraint::parse("ASIA"), None);
        assert_eq!(LocationConstraint::parse(""), None);
    }
}
