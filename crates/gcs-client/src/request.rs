//! Request descriptors for the XML API
//!
//! Everything here is pure construction: descriptors are computed from
//! arguments and configuration, never from the network. The client layer
//! owns header injection for the fields shared by every call.

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::Method;

use crate::config::CorsDefaults;
use crate::error::BucketNameError;
use crate::types::{CorsRule, InsertObjectOptions, LocationConstraint};
use crate::xml;

/// Project identifier header, sent with every request
pub const PROJECT_ID_HEADER: &str = "x-goog-project-id";
/// API version header, sent with every request
pub const API_VERSION_HEADER: &str = "x-goog-api-version";
/// Canned-ACL header, set only when an ACL argument is supplied
pub const ACL_HEADER: &str = "x-goog-acl";
/// Copy-source header, `/{bucket}/{object}`
pub const COPY_SOURCE_HEADER: &str = "x-goog-copy-source";

/// Compression suffixes recognized during upload, with the
/// Content-Encoding each one implies
const ENCODING_SUFFIXES: [(&str, &str); 4] = [
    (".gz", "gzip"),
    (".Z", "compress"),
    (".bz2", "bzip2"),
    (".xz", "xz"),
];

/// A fully specified request, ready for a transport
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    /// Bare service root, or `{bucket}.{service_root}`
    pub host: String,
    /// Path and query, e.g. `/photo.png?acl`; empty for host-only requests
    pub path_and_query: String,
    /// HTTP method
    pub method: Method,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: Option<Bytes>,
}

impl RequestDescriptor {
    fn new(host: String, path_and_query: String, method: Method) -> Self {
        Self {
            host,
            path_and_query,
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Full request URL; the service speaks plain HTTP
    pub fn url(&self) -> String {
        format!("http://{}{}", self.host, self.path_and_query)
    }
}

/// Query subresources understood by the service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subresource {
    /// Bucket CORS configuration
    Cors,
    /// Bucket location
    Location,
    /// Object access control list
    Acl,
}

impl Subresource {
    /// Query-string form of the subresource
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cors => "cors",
            Self::Location => "location",
            Self::Acl => "acl",
        }
    }
}

/// Builds wire-level request descriptors. Performs no I/O.
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    service_root: String,
}

impl RequestBuilder {
    /// Builder for the given service root
    pub fn new(service_root: impl Into<String>) -> Self {
        Self {
            service_root: service_root.into(),
        }
    }

    fn bucket_host(&self, bucket: &str) -> String {
        format!("{}.{}", bucket, self.service_root)
    }

    /// GET against the bare service root, listing the project's buckets
    pub fn list_buckets(&self) -> RequestDescriptor {
        RequestDescriptor::new(self.service_root.clone(), String::new(), Method::GET)
    }

    /// Bucket-scoped request, optionally against a subresource
    pub fn bucket(
        &self,
        bucket: &str,
        subresource: Option<Subresource>,
        method: Method,
    ) -> RequestDescriptor {
        let path = match subresource {
            Some(sub) => format!("/?{}", sub.as_str()),
            None => String::new(),
        };
        RequestDescriptor::new(self.bucket_host(bucket), path, method)
    }

    /// PUT creating a bucket.
    ///
    /// The name is validated before anything is built, so a bad name is
    /// rejected without a round trip. A location constraint adds the
    /// configuration body; an ACL adds the canned-ACL header.
    pub fn create_bucket(
        &self,
        bucket: &str,
        acl: Option<&str>,
        location: Option<LocationConstraint>,
    ) -> Result<RequestDescriptor, BucketNameError> {
        validate_bucket_name(bucket)?;

        let mut request = self.bucket(bucket, None, Method::PUT);
        if let Some(acl) = acl {
            request.headers.insert(ACL_HEADER.to_string(), acl.to_string());
        }
        if let Some(location) = location {
            request.body = Some(Bytes::from(xml::location_constraint_body(location)));
        }
        Ok(request)
    }

    /// PUT replacing a bucket's CORS configuration
    pub fn set_bucket_cors(
        &self,
        bucket: &str,
        rule: &CorsRule,
        defaults: &CorsDefaults,
    ) -> RequestDescriptor {
        let mut request = self.bucket(bucket, Some(Subresource::Cors), Method::PUT);
        request.body = Some(Bytes::from(xml::cors_body(rule, defaults)));
        request
    }

    /// Object-scoped request, optionally against a subresource
    pub fn object(
        &self,
        bucket: &str,
        object: &str,
        subresource: Option<Subresource>,
        method: Method,
    ) -> RequestDescriptor {
        let mut path = format!("/{}", object);
        if let Some(sub) = subresource {
            path.push('?');
            path.push_str(sub.as_str());
        }
        RequestDescriptor::new(self.bucket_host(bucket), path, method)
    }

    /// PUT uploading an object.
    ///
    /// Content-Type and Content-Encoding the caller left unset are filled
    /// by inference from the object name; fields the caller set are kept
    /// as given.
    pub fn insert_object(
        &self,
        bucket: &str,
        object: &str,
        data: Bytes,
        options: &InsertObjectOptions,
    ) -> RequestDescriptor {
        let mut request = self.object(bucket, object, None, Method::PUT);

        let (content_type, content_encoding) = resolve_media(object, options);
        if let Some(content_type) = content_type {
            request
                .headers
                .insert("Content-Type".to_string(), content_type);
        }
        if let Some(encoding) = content_encoding {
            request
                .headers
                .insert("Content-Encoding".to_string(), encoding);
        }
        if let Some(acl) = &options.acl {
            request.headers.insert(ACL_HEADER.to_string(), acl.clone());
        }

        request.body = Some(data);
        request
    }

    /// PUT copying an object server side.
    ///
    /// The destination name defaults to the source name; the source is
    /// named only by the copy-source header, never by the body.
    pub fn copy_object(
        &self,
        src_bucket: &str,
        src_object: &str,
        dst_bucket: &str,
        dst_object: Option<&str>,
        acl: Option<&str>,
    ) -> RequestDescriptor {
        let target = dst_object.unwrap_or(src_object);
        let mut request = self.object(dst_bucket, target, None, Method::PUT);
        request.headers.insert(
            COPY_SOURCE_HEADER.to_string(),
            format!("/{}/{}", src_bucket, src_object),
        );
        if let Some(acl) = acl {
            request.headers.insert(ACL_HEADER.to_string(), acl.to_string());
        }
        request
    }
}

/// Check a bucket name against the service naming rules.
///
/// Rules are checked in a fixed order and the first violation wins: the
/// character set, then the first character, then the last, then length.
pub fn validate_bucket_name(name: &str) -> Result<(), BucketNameError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if name.is_empty() || !name.chars().all(allowed) {
        return Err(BucketNameError::InvalidCharacter);
    }
    if !name.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return Err(BucketNameError::InvalidStart);
    }
    if !name.ends_with(|c: char| c.is_ascii_alphanumeric()) {
        return Err(BucketNameError::InvalidEnd);
    }
    if name.len() < 3 || name.len() > 63 {
        return Err(BucketNameError::InvalidLength);
    }
    Ok(())
}

/// Fill the media fields the caller left unset.
///
/// Mirrors the upload rule: if either field is missing, both are guessed
/// from the object name, and only the missing ones are filled. Never
/// fails; unknown names simply leave the fields unset.
fn resolve_media(
    object: &str,
    options: &InsertObjectOptions,
) -> (Option<String>, Option<String>) {
    if options.content_type.is_some() && options.content_encoding.is_some() {
        return (
            options.content_type.clone(),
            options.content_encoding.clone(),
        );
    }
    let (guessed_type, guessed_encoding) = guess_media(object);
    (
        options.content_type.clone().or(guessed_type),
        options.content_encoding.clone().or(guessed_encoding),
    )
}

fn guess_media(object: &str) -> (Option<String>, Option<String>) {
    let mut name = object;
    let mut encoding = None;
    for (suffix, coding) in ENCODING_SUFFIXES {
        if let Some(stem) = name.strip_suffix(suffix) {
            name = stem;
            encoding = Some(coding.to_string());
            break;
        }
    }
    let content_type = mime_guess::from_path(name).first().map(|m| m.to_string());
    (content_type, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> RequestBuilder {
        RequestBuilder::new("storage.googleapis.com")
    }

    #[test]
    fn test_accepts_valid_names() {
        let longest = "x".repeat(63);
        for name in ["abc", "demo-bucket", "a_b.c-3", "0ab", "ab9", longest.as_str()] {
            assert!(validate_bucket_name(name).is_ok(), "rejected {:?}", name);
        }
    }

    #[test]
    fn test_rejects_each_rule_independently() {
        assert_eq!(
            validate_bucket_name("demo bucket"),
            Err(BucketNameError::InvalidCharacter)
        );
        assert_eq!(
            validate_bucket_name("-demo-bucket"),
            Err(BucketNameError::InvalidStart)
        );
        assert_eq!(
            validate_bucket_name("demo-bucket-"),
            Err(BucketNameError::InvalidEnd)
        );
        assert_eq!(validate_bucket_name("ab"), Err(BucketNameError::InvalidLength));
        assert_eq!(
            validate_bucket_name(&"x".repeat(64)),
            Err(BucketNameError::InvalidLength)
        );
        assert_eq!(
            validate_bucket_name(""),
            Err(BucketNameError::InvalidCharacter)
        );
    }

    #[test]
    fn test_list_buckets_descriptor() {
        let request = builder().list_buckets();
        assert_eq!(request.host, "storage.googleapis.com");
        assert_eq!(request.path_and_query, "");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url(), "http://storage.googleapis.com");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_bucket_urls() {
        let b = builder();
        assert_eq!(
            b.bucket("demo", None, Method::GET).url(),
            "http://demo.storage.googleapis.com"
        );
        assert_eq!(
            b.bucket("demo", Some(Subresource::Cors), Method::GET).url(),
            "http://demo.storage.googleapis.com/?cors"
        );
        assert_eq!(
            b.bucket("demo", Some(Subresource::Location), Method::GET).url(),
            "http://demo.storage.googleapis.com/?location"
        );
    }

    #[test]
    fn test_object_urls() {
        let b = builder();
        assert_eq!(
            b.object("demo", "a/b.png", None, Method::GET).url(),
            "http://demo.storage.googleapis.com/a/b.png"
        );
        assert_eq!(
            b.object("demo", "b.png", Some(Subresource::Acl), Method::GET).url(),
            "http://demo.storage.googleapis.com/b.png?acl"
        );
    }

    #[test]
    fn test_create_bucket_plain() {
        let request = builder().create_bucket("demo", None, None).unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.url(), "http://demo.storage.googleapis.com");
        assert!(request.body.is_none());
        assert!(!request.headers.contains_key(ACL_HEADER));
    }

    #[test]
    fn test_create_bucket_with_acl_and_location() {
        let request = builder()
            .create_bucket("demo", Some("public-read"), Some(LocationConstraint::Eu))
            .unwrap();
        assert_eq!(request.headers[ACL_HEADER], "public-read");
        let body = request.body.expect("constraint body");
        assert_eq!(
            body,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <CreateBucketConfiguration>\
             <LocationConstraint>EU</LocationConstraint>\
             </CreateBucketConfiguration>"
                .as_bytes()
        );
    }

    #[test]
    fn test_create_bucket_rejects_bad_name() {
        let err = builder().create_bucket("a!", None, None).unwrap_err();
        assert_eq!(err, BucketNameError::InvalidCharacter);
    }

    #[test]
    fn test_cors_descriptor() {
        let request = builder().set_bucket_cors(
            "demo",
            &CorsRule::default(),
            &CorsDefaults::default(),
        );
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.url(), "http://demo.storage.googleapis.com/?cors");
        let body = request.body.expect("cors body");
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("<Origins><Origin>*</Origin></Origins>"));
    }

    #[test]
    fn test_insert_object_infers_text_type() {
        let request = builder().insert_object(
            "demo",
            "notes.txt",
            Bytes::from_static(b"hello"),
            &InsertObjectOptions::default(),
        );
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.url(), "http://demo.storage.googleapis.com/notes.txt");
        assert_eq!(request.headers["Content-Type"], "text/plain");
        assert!(!request.headers.contains_key("Content-Encoding"));
        assert_eq!(request.body, Some(Bytes::from_static(b"hello")));
    }

    #[test]
    fn test_insert_object_infers_encoding_and_inner_type() {
        let request = builder().insert_object(
            "demo",
            "backup.tar.gz",
            Bytes::new(),
            &InsertObjectOptions::default(),
        );
        assert_eq!(request.headers["Content-Encoding"], "gzip");
        assert_eq!(request.headers["Content-Type"], "application/x-tar");
    }

    #[test]
    fn test_insert_object_keeps_explicit_fields() {
        let options = InsertObjectOptions::new().with_content_type("application/custom");
        let request = builder().insert_object("demo", "data.gz", Bytes::new(), &options);
        assert_eq!(request.headers["Content-Type"], "application/custom");
        assert_eq!(request.headers["Content-Encoding"], "gzip");
    }

    #[test]
    fn test_insert_object_unknown_name_sets_nothing() {
        let request = builder().insert_object(
            "demo",
            "no-extension",
            Bytes::new(),
            &InsertObjectOptions::default(),
        );
        assert!(!request.headers.contains_key("Content-Type"));
        assert!(!request.headers.contains_key("Content-Encoding"));
    }

    #[test]
    fn test_insert_object_sets_acl() {
        let options = InsertObjectOptions::new().with_acl("private");
        let request = builder().insert_object("demo", "notes.txt", Bytes::new(), &options);
        assert_eq!(request.headers[ACL_HEADER], "private");
    }

    #[test]
    fn test_copy_object_header_and_default_destination() {
        let request = builder().copy_object("src-bucket", "photo.png", "dst-bucket", None, None);
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.url(), "http://dst-bucket.storage.googleapis.com/photo.png");
        assert_eq!(request.headers[COPY_SOURCE_HEADER], "/src-bucket/photo.png");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_copy_object_explicit_destination_and_acl() {
        let request = builder().copy_object(
            "src-bucket",
            "photo.png",
            "dst-bucket",
            Some("copy.png"),
            Some("public-read"),
        );
        assert_eq!(request.url(), "http://dst-bucket.storage.googleapis.com/copy.png");
        assert_eq!(request.headers[COPY_SOURCE_HEADER], "/src-bucket/photo.png");
        assert_eq!(request.headers[ACL_HEADER], "public-read");
    }
}
