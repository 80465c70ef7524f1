//! Common types for the client SDK

use crate::filter::Filter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Flat string map used for file metadata
pub type Metadata = BTreeMap<String, String>;

/// One `{key, value}` step of a file's location in a bucket's path schema
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub key: String,
    pub value: String,
}

impl PathSegment {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Kind of bucket, sent along with upload requests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BucketType {
    Image,
    #[default]
    File,
}

/// Description of a file about to be uploaded
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadRequest {
    /// Size in bytes
    pub size: u64,
    /// Extension without the leading dot
    pub extension: String,
    pub is_public: bool,
    pub path: Vec<PathSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// URL of an existing file to overwrite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_target_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Uploaded files stay temporary until confirmed
    #[serde(default)]
    pub temporary: bool,
}

impl FileUploadRequest {
    pub fn new(size: u64, extension: impl Into<String>) -> Self {
        Self {
            size,
            extension: extension.into(),
            ..Default::default()
        }
    }

    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    pub fn with_path(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.push(PathSegment::new(key, value));
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn replacing(mut self, url: impl Into<String>) -> Self {
        self.replace_target_url = Some(url.into());
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }
}

/// Parameters for [`RequestClient::request_upload`](crate::RequestClient::request_upload)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestUploadParams {
    pub bucket_name: String,
    pub bucket_type: BucketType,
    pub file_info: FileUploadRequest,
}

impl RequestUploadParams {
    pub fn new(bucket_name: impl Into<String>, file_info: FileUploadRequest) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            bucket_type: BucketType::default(),
            file_info,
        }
    }

    pub fn with_bucket_type(mut self, bucket_type: BucketType) -> Self {
        self.bucket_type = bucket_type;
        self
    }
}

/// Raw `/request-upload` response
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestUploadResponse {
    #[serde(default)]
    pub multipart: Option<MultipartUpload>,
    #[serde(default)]
    pub signed_url: Option<String>,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Where and how to upload a file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDescriptor {
    /// Present when the backend wants the file sent in parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multipart: Option<MultipartUpload>,
    /// Single-shot upload target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_url: Option<String>,
    /// URL the file is served from once uploaded
    pub access_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl RequestUploadResponse {
    /// The backend calls the public URL `url`; callers see it as `access_url`
    pub(crate) fn into_descriptor(self) -> UploadDescriptor {
        UploadDescriptor {
            multipart: self.multipart,
            signed_url: self.signed_url,
            access_url: self.url,
            thumbnail_url: self.thumbnail_url,
        }
    }
}

/// Multipart upload session handed out by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipartUpload {
    pub upload_id: String,
    /// Object key the parts belong to
    pub key: String,
    pub part_size: u64,
    pub total_parts: u32,
    pub parts: Vec<SignedPart>,
}

/// Signed upload URL for one numbered part
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedPart {
    pub part_number: u32,
    pub signed_url: String,
}

/// Stored file as reported by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Size in bytes
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Requested page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
}

impl Pagination {
    pub fn new(current_page: u32, page_size: u32) -> Self {
        Self {
            current_page,
            page_size,
        }
    }
}

/// Page position returned with a listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

/// Parameters for listing files
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesParams {
    pub bucket_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl ListFilesParams {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            filter: None,
            pagination: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Result of listing files
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesResult {
    pub data: Vec<FileInfo>,
    pub pagination: PageInfo,
}

/// `{url}` body shared by the per-file routes
#[derive(Clone, Debug, Serialize)]
pub(crate) struct UrlBody<'a> {
    pub url: &'a str,
}

/// `{success}` response shared by the mutating routes
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct SuccessResponse {
    pub success: bool,
}
