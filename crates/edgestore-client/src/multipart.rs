//! Multipart upload bookkeeping routes.
//!
//! Splitting data and PUTting parts to their signed URLs is left to the
//! caller; these calls only fetch more part URLs and close the session.

use crate::{
    operations::routes,
    types::{SignedPart, SuccessResponse},
    Credentials, RequestClient, Result,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Parameters for requesting more part URLs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestUploadPartsParams {
    pub upload_id: String,
    /// Object key of the multipart session
    pub key: String,
    /// Part numbers to sign, 1-based
    pub parts: Vec<u32>,
}

impl RequestUploadPartsParams {
    pub fn new(upload_id: impl Into<String>, key: impl Into<String>, parts: Vec<u32>) -> Self {
        Self {
            upload_id: upload_id.into(),
            key: key.into(),
            parts,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PartsSelection<'a> {
    upload_id: &'a str,
    parts: &'a [u32],
}

#[derive(Serialize)]
struct UploadPartsBody<'a> {
    multipart: PartsSelection<'a>,
    path: &'a str,
}

#[derive(Deserialize)]
struct UploadPartsResponse {
    multipart: UploadParts,
}

/// Freshly signed part URLs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadParts {
    pub upload_id: String,
    pub parts: Vec<SignedPart>,
}

/// A part the caller finished uploading
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPart {
    pub part_number: u32,
    #[serde(rename = "eTag")]
    pub etag: String,
}

impl CompletedPart {
    /// Storage backends return ETags quoted; quotes are stripped.
    pub fn new(part_number: u32, etag: impl AsRef<str>) -> Self {
        Self {
            part_number,
            etag: etag.as_ref().trim_matches('"').to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteBody<'a> {
    upload_id: &'a str,
    key: &'a str,
    parts: &'a [CompletedPart],
}

impl RequestClient {
    /// Sign additional part URLs for an in-progress multipart upload
    #[instrument(skip(self, credentials, params), fields(upload_id = %params.upload_id))]
    pub async fn request_upload_parts(
        &self,
        credentials: &Credentials,
        params: &RequestUploadPartsParams,
    ) -> Result<UploadParts> {
        let body = UploadPartsBody {
            multipart: PartsSelection {
                upload_id: &params.upload_id,
                parts: &params.parts,
            },
            path: &params.key,
        };
        let res: UploadPartsResponse = self
            .send(routes::REQUEST_UPLOAD_PARTS, &body, credentials)
            .await?;
        Ok(res.multipart)
    }

    /// Close a multipart session once every part is uploaded
    #[instrument(skip(self, credentials, parts), fields(part_count = parts.len()))]
    pub async fn complete_multipart_upload(
        &self,
        credentials: &Credentials,
        upload_id: &str,
        key: &str,
        parts: &[CompletedPart],
    ) -> Result<bool> {
        let body = CompleteBody {
            upload_id,
            key,
            parts,
        };
        let res: SuccessResponse = self
            .send(routes::COMPLETE_MULTIPART_UPLOAD, &body, credentials)
            .await?;
        Ok(res.success)
    }
}
