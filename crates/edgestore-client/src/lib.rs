//! # EdgeStore Client SDK
//!
//! Typed client for the EdgeStore file storage API.
//!
//! ## Features
//!
//! - **Token issuance**: scoped tokens built from the application's bucket router
//! - **Uploads**: signed upload URLs and multipart part signing
//! - **Files**: metadata lookup, listing with filters and pagination, deletion
//!
//! Every operation is a single JSON POST authenticated with HTTP Basic auth.
//!
//! ## Example
//!
//! ```rust,ignore
//! use edgestore_client::{CredentialsInput, EdgeStoreClient, FileUploadRequest, RequestUploadParams};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Keys fall back to EDGE_STORE_ACCESS_KEY / EDGE_STORE_SECRET_KEY
//!     let client = EdgeStoreClient::create(CredentialsInput::default())?;
//!
//!     let upload = client
//!         .request_upload(&RequestUploadParams::new(
//!             "publicFiles",
//!             FileUploadRequest::new(1024, "png").public().with_path("type", "avatar"),
//!         ))
//!         .await?;
//!     println!("Upload to {:?}, served at {}", upload.signed_url, upload.access_url);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod credentials;
mod error;
mod filter;
mod multipart;
mod operations;
mod request;
mod router;
mod types;

pub use client::EdgeStoreClient;
pub use config::{Config, DEFAULT_ENDPOINT, ENDPOINT_ENV};
pub use credentials::{Credentials, CredentialsInput, ACCESS_KEY_ENV, SECRET_KEY_ENV};
pub use error::{ClientError, Result};
pub use filter::{Comparison, Filter};
pub use multipart::{CompletedPart, RequestUploadPartsParams, UploadParts};
pub use operations::routes;
pub use request::RequestClient;
pub use router::{AccessControl, BucketDefinition, EdgeStoreRouter, PathParam, PathProducer};
pub use types::*;
