//! Client error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// No usable access/secret key pair
    #[error("Missing credentials: {0}")]
    Credentials(String),

    /// Backend answered with a non-success status
    #[error("Request to {path} failed ({status}): {body}")]
    Request {
        path: String,
        status: u16,
        body: String,
        code: Option<String>,
        message: Option<String>,
    },

    /// A bucket declares a path entry with no parameter
    #[error("Empty path param at position {index} in bucket {bucket}")]
    EmptyPathParam { bucket: String, index: usize },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build a request error from a failed response body.
    ///
    /// The body is kept verbatim; `code` and `message` are filled in when the
    /// backend sent a JSON error object.
    pub fn from_response(path: &str, status: u16, body: String) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(&body).ok();
        let field = |name: &str| {
            parsed
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let code = field("code");
        let message = field("message");

        Self::Request {
            path: path.to_string(),
            status,
            body,
            code,
            message,
        }
    }

    /// HTTP status of a request error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
            || matches!(self, Self::Request { code: Some(code), .. } if code == "NOT_FOUND")
    }

    /// Check if credentials could not be resolved
    pub fn is_credentials_error(&self) -> bool {
        matches!(self, Self::Credentials(_))
    }
}
