//! # API Client Configuration
//!
//! Connection settings for the trading backend, built from explicit
//! values or environment variables.

/// Default request timeout. The original screens let requests run to
/// completion; a bounded timeout is a deliberate hardening so a dead
/// backend cannot hang a screen forever.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the REST client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL (e.g. "https://api.tradelink.example").
    pub base_url: String,
    /// Bearer token issued by the external auth collaborator.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Creates a config for the given base URL with defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Create a config from environment variables or provided values.
    ///
    /// ## Environment
    /// - `TRADELINK_API_URL` - backend base URL
    /// - `TRADELINK_API_TOKEN` - bearer token
    /// - `TRADELINK_API_TIMEOUT_SECS` - request timeout
    pub fn from_env_or(base_url: Option<String>, token: Option<String>) -> Self {
        ApiConfig {
            base_url: base_url
                .or_else(|| std::env::var("TRADELINK_API_URL").ok())
                .unwrap_or_else(|| "http://localhost:5000".to_string()),
            token: token.or_else(|| std::env::var("TRADELINK_API_TOKEN").ok()),
            timeout_secs: std::env::var("TRADELINK_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}
