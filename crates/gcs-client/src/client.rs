//! Storage operations over the XML API

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use tracing::instrument;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::request::{
    RequestBuilder, RequestDescriptor, Subresource, API_VERSION_HEADER, PROJECT_ID_HEADER,
};
use crate::transport::{ReqwestTransport, Transport, TransportError, WireRequest, WireResponse};
use crate::types::{CorsRule, InsertObjectOptions, LocationConstraint, ResponseEnvelope};

/// Reason paired with the sentinel 404 when the host does not resolve
const SERVER_NOT_FOUND_REASON: &str = "Server not found.";

/// The storage operation surface.
///
/// [`XmlClient`] speaks the XML API; an implementor for another API
/// surface could slot in behind the same trait without touching callers.
/// Every operation is one request/response exchange, with no retries.
#[async_trait]
pub trait Storage: Send + Sync {
    /// List the project's buckets
    async fn get_buckets(&self) -> Result<Bytes>;

    /// List a bucket's contents
    async fn get_bucket(&self, bucket: &str) -> Result<Bytes>;

    /// Fetch a bucket's CORS configuration
    async fn get_bucket_cors(&self, bucket: &str) -> Result<Bytes>;

    /// Fetch a bucket's location
    async fn get_bucket_location(&self, bucket: &str) -> Result<Bytes>;

    /// Create a bucket, optionally with a canned ACL and a location
    /// constraint. The name is validated locally first.
    async fn insert_bucket(
        &self,
        bucket: &str,
        acl: Option<&str>,
        location: Option<LocationConstraint>,
    ) -> Result<Bytes>;

    /// Replace a bucket's CORS configuration
    async fn set_bucket_cors(&self, bucket: &str, rule: &CorsRule) -> Result<Bytes>;

    /// Delete a bucket
    async fn delete_bucket(&self, bucket: &str) -> Result<Bytes>;

    /// Download an object
    async fn get_object(&self, bucket: &str, object: &str) -> Result<Bytes>;

    /// Fetch an object's access control list
    async fn get_object_acls(&self, bucket: &str, object: &str) -> Result<Bytes>;

    /// Fetch an object's metadata. Returns the response envelope rather
    /// than a body; a HEAD response has none.
    async fn get_object_metadata(&self, bucket: &str, object: &str)
        -> Result<ResponseEnvelope>;

    /// Upload an object
    async fn insert_object(
        &self,
        bucket: &str,
        object: &str,
        data: Bytes,
        options: &InsertObjectOptions,
    ) -> Result<Bytes>;

    /// Copy an object server side; the destination name defaults to the
    /// source name
    async fn copy_object(
        &self,
        src_bucket: &str,
        src_object: &str,
        dst_bucket: &str,
        dst_object: Option<&str>,
        acl: Option<&str>,
    ) -> Result<Bytes>;

    /// Delete an object
    async fn delete_object(&self, bucket: &str, object: &str) -> Result<Bytes>;
}

/// XML API storage client
pub struct XmlClient<T: Transport> {
    config: Config,
    builder: RequestBuilder,
    transport: T,
}

impl XmlClient<ReqwestTransport> {
    /// Client over the production HTTP transport
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(config.access_token.clone(), config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> XmlClient<T> {
    /// Client over a caller-supplied transport
    pub fn with_transport(config: Config, transport: T) -> Self {
        let builder = RequestBuilder::new(config.service_root.clone());
        Self {
            config,
            builder,
            transport,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared send path: inject the always-on headers, fix up
    /// Content-Length, send, and interpret the status.
    async fn api_request(&self, mut request: RequestDescriptor) -> Result<WireResponse> {
        request
            .headers
            .insert(PROJECT_ID_HEADER.to_string(), self.config.project_id.clone());
        request
            .headers
            .insert(API_VERSION_HEADER.to_string(), self.config.api_version.clone());

        if request.method == Method::POST
            || request.method == Method::PUT
            || request.body.is_some()
        {
            let length = request.body.as_ref().map_or(0, |body| body.len());
            request
                .headers
                .insert("Content-Length".to_string(), length.to_string());
        }

        let wire = WireRequest {
            url: request.url(),
            method: request.method,
            headers: request.headers,
            body: request.body,
        };

        let response = match self.transport.send(wire).await {
            Ok(response) => response,
            Err(TransportError::HostNotFound(_)) => {
                return Err(ClientError::Service {
                    status: 404,
                    reason: SERVER_NOT_FOUND_REASON.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        if response.status >= 300 {
            return Err(ClientError::Service {
                status: response.status,
                reason: response.reason,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl<T: Transport> Storage for XmlClient<T> {
    // ==================== Bucket Operations ====================

    #[instrument(skip(self))]
    async fn get_buckets(&self) -> Result<Bytes> {
        let request = self.builder.list_buckets();
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn get_bucket(&self, bucket: &str) -> Result<Bytes> {
        let request = self.builder.bucket(bucket, None, Method::GET);
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn get_bucket_cors(&self, bucket: &str) -> Result<Bytes> {
        let request = self.builder.bucket(bucket, Some(Subresource::Cors), Method::GET);
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn get_bucket_location(&self, bucket: &str) -> Result<Bytes> {
        let request = self
            .builder
            .bucket(bucket, Some(Subresource::Location), Method::GET);
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn insert_bucket(
        &self,
        bucket: &str,
        acl: Option<&str>,
        location: Option<LocationConstraint>,
    ) -> Result<Bytes> {
        let request = self.builder.create_bucket(bucket, acl, location)?;
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn set_bucket_cors(&self, bucket: &str, rule: &CorsRule) -> Result<Bytes> {
        let request = self
            .builder
            .set_bucket_cors(bucket, rule, &self.config.cors_defaults);
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn delete_bucket(&self, bucket: &str) -> Result<Bytes> {
        let request = self.builder.bucket(bucket, None, Method::DELETE);
        Ok(self.api_request(request).await?.body)
    }

    // ==================== Object Operations ====================

    #[instrument(skip(self))]
    async fn get_object(&self, bucket: &str, object: &str) -> Result<Bytes> {
        let request = self.builder.object(bucket, object, None, Method::GET);
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn get_object_acls(&self, bucket: &str, object: &str) -> Result<Bytes> {
        let request = self
            .builder
            .object(bucket, object, Some(Subresource::Acl), Method::GET);
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn get_object_metadata(
        &self,
        bucket: &str,
        object: &str,
    ) -> Result<ResponseEnvelope> {
        let request = self.builder.object(bucket, object, None, Method::HEAD);
        let response = self.api_request(request).await?;
        Ok(ResponseEnvelope {
            status: response.status,
            reason: response.reason,
            headers: response.headers,
        })
    }

    #[instrument(skip(self, data))]
    async fn insert_object(
        &self,
        bucket: &str,
        object: &str,
        data: Bytes,
        options: &InsertObjectOptions,
    ) -> Result<Bytes> {
        let request = self.builder.insert_object(bucket, object, data, options);
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn copy_object(
        &self,
        src_bucket: &str,
        src_object: &str,
        dst_bucket: &str,
        dst_object: Option<&str>,
        acl: Option<&str>,
    ) -> Result<Bytes> {
        let request = self
            .builder
            .copy_object(src_bucket, src_object, dst_bucket, dst_object, acl);
        Ok(self.api_request(request).await?.body)
    }

    #[instrument(skip(self))]
    async fn delete_object(&self, bucket: &str, object: &str) -> Result<Bytes> {
        let request = self.builder.object(bucket, object, None, Method::DELETE);
        Ok(self.api_request(request).await?.body)
    }
}
