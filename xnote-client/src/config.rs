//! Client configuration

use shared::DEFAULT_HOUSEHOLD;

/// Default API prefix of the XNote server
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Client configuration for connecting to the XNote server
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | XNOTE_BASE_URL | http://localhost:8080 | Server origin |
/// | XNOTE_TIMEOUT_SECS | 30 | Request timeout |
/// | XNOTE_DEFAULT_RANGE_DAYS | 30 | Length of the default date range |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Path prefix of every resource
    pub api_prefix: String,

    /// Bearer token, if the server sits behind an authenticating proxy
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Attendees substituted when a meal/event/drink has none selected
    pub default_people: Vec<String>,

    /// Days covered by the default daily-summary range (ending today)
    pub default_range_days: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            token: None,
            timeout: 30,
            default_people: DEFAULT_HOUSEHOLD.iter().map(|s| s.to_string()).collect(),
            default_range_days: 30,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("XNOTE_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into());
        let mut config = Self::new(base_url);
        if let Some(timeout) = std::env::var("XNOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Some(days) = std::env::var("XNOTE_DEFAULT_RANGE_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.default_range_days = days;
        }
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the API prefix
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Set the default attendees
    pub fn with_default_people<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.default_people = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the length of the default date range
    pub fn with_default_range_days(mut self, days: u64) -> Self {
        self.default_range_days = days;
        self
    }

    /// `base_url` joined with `api_prefix`, without a trailing slash
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_matches('/')
        )
        .trim_end_matches('/')
        .to_string()
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
