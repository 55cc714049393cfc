//! # GCS XML API Client
//!
//! A demonstration client for the Google Cloud Storage XML API.
//!
//! ## Features
//!
//! - **Virtual-hosted buckets**: bucket requests go to
//!   `{bucket}.storage.googleapis.com`
//! - **Bucket lifecycle**: list, inspect, create (with canned ACL and
//!   location constraint), delete, CORS get/set, location
//! - **Object lifecycle**: download, upload with media-type inference,
//!   server-side copy, ACL and metadata reads, delete
//! - **Typed failures**: local naming validation is separated from
//!   service rejections, with transport faults passed through
//!
//! ## Example
//!
//! ```rust,ignore
//! use gcs_client::{Config, Storage, XmlClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = XmlClient::new(
//!         Config::new("my-project").with_token("ya29.Es..."),
//!     )?;
//!
//!     client.insert_bucket("demo-bucket", None, None).await?;
//!     client
//!         .insert_object("demo-bucket", "hello.txt", "Hello!".into(), &Default::default())
//!         .await?;
//!     let listing = client.get_bucket("demo-bucket").await?;
//!     println!("{}", String::from_utf8_lossy(&listing));
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod transport;
mod types;
mod xml;

pub use client::{Storage, XmlClient};
pub use config::{Config, CorsDefaults, DEFAULT_API_VERSION, DEFAULT_SERVICE_ROOT};
pub use error::{BucketNameError, ClientError, Result};
pub use request::{
    validate_bucket_name, RequestBuilder, RequestDescriptor, Subresource, ACL_HEADER,
    API_VERSION_HEADER, COPY_SOURCE_HEADER, PROJECT_ID_HEADER,
};
pub use transport::{ReqwestTransport, Transport, TransportError, WireRequest, WireResponse};
pub use types::{CorsRule, InsertObjectOptions, LocationConstraint, MaxAge, ResponseEnvelope};
