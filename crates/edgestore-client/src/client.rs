//! Credential-bound client handle

use crate::{
    multipart::{CompletedPart, RequestUploadPartsParams, UploadParts},
    router::EdgeStoreRouter,
    types::*,
    Config, Credentials, CredentialsInput, RequestClient, Result,
};
use serde::Serialize;
use tracing::debug;

/// EdgeStore client with credentials resolved once and reused for every call
#[derive(Clone, Debug)]
pub struct EdgeStoreClient {
    inner: RequestClient,
    credentials: Credentials,
}

impl EdgeStoreClient {
    /// Create a client, filling missing keys from `EDGE_STORE_ACCESS_KEY` /
    /// `EDGE_STORE_SECRET_KEY` and the endpoint from `EDGE_STORE_API_ENDPOINT`.
    pub fn create(credentials: CredentialsInput) -> Result<Self> {
        let credentials = credentials.resolve()?;
        Self::with_credentials(Config::from_env(), credentials)
    }

    /// Create with explicit configuration and a custom environment lookup
    pub fn create_with_config(
        config: Config,
        credentials: CredentialsInput,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let credentials = credentials.resolve_with(lookup)?;
        Self::with_credentials(config, credentials)
    }

    /// Create from already resolved credentials
    pub fn with_credentials(config: Config, credentials: Credentials) -> Result<Self> {
        debug!(endpoint = %config.endpoint, "Creating EdgeStore client");
        Ok(Self {
            inner: RequestClient::new(config)?,
            credentials,
        })
    }

    /// Create entirely from the environment
    pub fn from_env() -> Result<Self> {
        Self::create(CredentialsInput::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        self.inner.config()
    }

    /// Underlying request client
    pub fn request_client(&self) -> &RequestClient {
        &self.inner
    }

    pub async fn get_token<C>(&self, router: &EdgeStoreRouter, ctx: &C) -> Result<String>
    where
        C: Serialize + ?Sized,
    {
        self.inner.get_token(&self.credentials, router, ctx).await
    }

    pub async fn get_file(&self, url: &str) -> Result<FileInfo> {
        self.inner.get_file(&self.credentials, url).await
    }

    pub async fn request_upload(&self, params: &RequestUploadParams) -> Result<UploadDescriptor> {
        self.inner.request_upload(&self.credentials, params).await
    }

    pub async fn request_upload_parts(
        &self,
        params: &RequestUploadPartsParams,
    ) -> Result<UploadParts> {
        self.inner
            .request_upload_parts(&self.credentials, params)
            .await
    }

    pub async fn complete_multipart_upload(
        &self,
        upload_id: &str,
        key: &str,
        parts: &[CompletedPart],
    ) -> Result<bool> {
        self.inner
            .complete_multipart_upload(&self.credentials, upload_id, key, parts)
            .await
    }

    pub async fn confirm_upload(&self, url: &str) -> Result<bool> {
        self.inner.confirm_upload(&self.credentials, url).await
    }

    pub async fn delete_file(&self, url: &str) -> Result<bool> {
        self.inner.delete_file(&self.credentials, url).await
    }

    pub async fn list_files(&self, params: &ListFilesParams) -> Result<ListFilesResult> {
        self.inner.list_files(&self.credentials, params).await
    }
}
