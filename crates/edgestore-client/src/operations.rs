//! Route wrappers taking credentials per call

use crate::{
    router::EdgeStoreRouter,
    types::*,
    Credentials, RequestClient, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

/// Backend routes
pub mod routes {
    pub const GET_TOKEN: &str = "/get-token";
    pub const GET_FILE: &str = "/get-file";
    pub const REQUEST_UPLOAD: &str = "/request-upload";
    pub const REQUEST_UPLOAD_PARTS: &str = "/request-upload-parts";
    pub const COMPLETE_MULTIPART_UPLOAD: &str = "/complete-multipart-upload";
    pub const CONFIRM_UPLOAD: &str = "/confirm-upload";
    pub const DELETE_FILE: &str = "/delete-file";
    pub const LIST_FILES: &str = "/list-files";
}

#[derive(Serialize)]
struct TokenRequest<'a, C: ?Sized> {
    ctx: &'a C,
    buckets: BTreeMap<&'a str, crate::router::TokenBucket<'a>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

impl RequestClient {
    /// Issue an access token scoped to the router's buckets.
    ///
    /// Fails with [`ClientError::EmptyPathParam`](crate::ClientError::EmptyPathParam)
    /// before anything is sent if a bucket declares an empty path entry.
    #[instrument(skip(self, credentials, router, ctx))]
    pub async fn get_token<C>(
        &self,
        credentials: &Credentials,
        router: &EdgeStoreRouter,
        ctx: &C,
    ) -> Result<String>
    where
        C: Serialize + ?Sized,
    {
        let body = TokenRequest {
            ctx,
            buckets: router.token_buckets()?,
        };
        let res: TokenResponse = self.send(routes::GET_TOKEN, &body, credentials).await?;
        Ok(res.token)
    }

    /// Look up file metadata by URL
    #[instrument(skip(self, credentials))]
    pub async fn get_file(&self, credentials: &Credentials, url: &str) -> Result<FileInfo> {
        self.send(routes::GET_FILE, &UrlBody { url }, credentials)
            .await
    }

    /// Ask for a signed upload URL (or a multipart session) for a new file
    #[instrument(skip(self, credentials, params), fields(bucket = %params.bucket_name))]
    pub async fn request_upload(
        &self,
        credentials: &Credentials,
        params: &RequestUploadParams,
    ) -> Result<UploadDescriptor> {
        let res: RequestUploadResponse = self
            .send(routes::REQUEST_UPLOAD, params, credentials)
            .await?;
        Ok(res.into_descriptor())
    }

    /// Mark a temporary upload as permanent
    #[instrument(skip(self, credentials))]
    pub async fn confirm_upload(&self, credentials: &Credentials, url: &str) -> Result<bool> {
        let res: SuccessResponse = self
            .send(routes::CONFIRM_UPLOAD, &UrlBody { url }, credentials)
            .await?;
        Ok(res.success)
    }

    /// Delete a file by URL
    #[instrument(skip(self, credentials))]
    pub async fn delete_file(&self, credentials: &Credentials, url: &str) -> Result<bool> {
        let res: SuccessResponse = self
            .send(routes::DELETE_FILE, &UrlBody { url }, credentials)
            .await?;
        Ok(res.success)
    }

    /// List files in a bucket; filter and pagination are forwarded as given
    #[instrument(skip(self, credentials, params), fields(bucket = %params.bucket_name))]
    pub async fn list_files(
        &self,
        credentials: &Credentials,
        params: &ListFilesParams,
    ) -> Result<ListFilesResult> {
        self.send(routes::LIST_FILES, params, credentials).await
    }
}
