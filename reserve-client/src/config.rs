//! Client configuration

use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Default backend address when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the reservation backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Base64 `user:password` sent as `Authorization: Basic …` on every call
    pub basic_credentials: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Where the authenticated session is persisted (None = memory only)
    pub session_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            basic_credentials: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            session_path: None,
        }
    }

    /// Load configuration from the environment (and `.env` if present)
    ///
    /// - `RESERVE_API_URL`
    /// - `BASE64_CREDENTIALS`
    /// - `RESERVE_API_TIMEOUT`
    /// - `RESERVE_SESSION_PATH`
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env loaded: {}", e);
        }

        let base_url = std::env::var("RESERVE_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            basic_credentials: std::env::var("BASE64_CREDENTIALS")
                .ok()
                .filter(|s| !s.is_empty()),
            timeout: std::env::var("RESERVE_API_TIMEOUT")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            session_path: std::env::var("RESERVE_SESSION_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Set the pre-encoded Basic credential
    pub fn with_basic_credentials(mut self, encoded: impl Into<String>) -> Self {
        self.basic_credentials = Some(encoded.into());
        self
    }

    /// Encode and set a Basic credential from user and password
    pub fn with_basic_auth(mut self, user: &str, password: &str) -> Self {
        self.basic_credentials = Some(STANDARD.encode(format!("{user}:{password}")));
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the authenticated session at this path
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
