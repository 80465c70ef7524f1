//! The single request primitive every operation goes through

use crate::{ClientError, Config, Credentials, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

/// Signed JSON-over-POST client for the storage API.
///
/// Holds no credentials; they are passed per call. Cheap to clone.
#[derive(Clone, Debug)]
pub struct RequestClient {
    config: Config,
    http: Client,
}

impl RequestClient {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let user_agent: header::HeaderValue = config
            .user_agent
            .parse()
            .map_err(|_| ClientError::Config(format!("invalid user agent: {}", config.user_agent)))?;
        headers.insert(header::USER_AGENT, user_agent);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { config, http })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// POST `body` as JSON to `path` and parse the JSON answer.
    ///
    /// Any non-2xx status becomes [`ClientError::Request`] carrying the path
    /// and the raw response text.
    pub async fn send<T, B>(&self, path: &str, body: &B, credentials: &Credentials) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.url_for(path);
        let payload = serde_json::to_vec(body)?;

        debug!("Sending POST request to {}", url);
        let response = self
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, credentials.authorization_header())
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), "Received response for {}", path);

        if !status.is_success() {
            warn!(status = status.as_u16(), "Request to {} failed", path);
            return Err(ClientError::from_response(path, status.as_u16(), text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}
