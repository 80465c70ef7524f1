//! Access key / secret key handling

use crate::{ClientError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use core::fmt;

/// Environment variable holding the default access key
pub const ACCESS_KEY_ENV: &str = "EDGE_STORE_ACCESS_KEY";

/// Environment variable holding the default secret key
pub const SECRET_KEY_ENV: &str = "EDGE_STORE_SECRET_KEY";

/// A resolved access key / secret key pair.
///
/// Both values are opaque; the backend is the only party that validates them.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        let raw = format!("{}:{}", self.access_key, self.secret_key);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Partially specified credentials, completed from the environment
#[derive(Clone, Default)]
pub struct CredentialsInput {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl CredentialsInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Resolve against the process environment
    pub fn resolve(self) -> Result<Credentials> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve with a custom variable lookup. Explicit values win; empty
    /// strings count as absent.
    pub fn resolve_with(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Credentials> {
        let pick = |explicit: Option<String>, env: &str| {
            explicit
                .filter(|v| !v.is_empty())
                .or_else(|| lookup(env).filter(|v| !v.is_empty()))
        };

        let access_key = pick(self.access_key, ACCESS_KEY_ENV);
        let secret_key = pick(self.secret_key, SECRET_KEY_ENV);

        match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => Ok(Credentials {
                access_key,
                secret_key,
            }),
            (None, _) => Err(ClientError::Credentials(format!(
                "no access key given and {ACCESS_KEY_ENV} is not set"
            ))),
            (_, None) => Err(ClientError::Credentials(format!(
                "no secret key given and {SECRET_KEY_ENV} is not set"
            ))),
        }
    }
}

impl From<Credentials> for CredentialsInput {
    fn from(c: Credentials) -> Self {
        Self {
            access_key: Some(c.access_key),
            secret_key: Some(c.secret_key),
        }
    }
}

impl fmt::Debug for CredentialsInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsInput")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
