//! Client configuration

/// Production API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.edgestore.dev";

/// Environment variable overriding the API endpoint
pub const ENDPOINT_ENV: &str = "EDGE_STORE_API_ENDPOINT";

/// Client configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// API endpoint URL, without trailing slash
    pub endpoint: String,
    /// User agent string
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: format!("edgestore-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Create a new config with the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::default().with_endpoint(endpoint)
    }

    /// Default config with `EDGE_STORE_API_ENDPOINT` applied when set
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            Some(endpoint) => Self::new(endpoint),
            None => Self::default(),
        }
    }

    /// Set the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        self.endpoint = endpoint.trim().trim_end_matches('/').to_string();
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full URL for an API route
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}
