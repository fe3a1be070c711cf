//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CARRITO_API_BASE_URL` - Cart backend base URL (default: `http://127.0.0.1:8000`)
//! - `CARRITO_FETCH_FALLBACK` - What to show when the cart fetch fails:
//!   `empty` or `mirror` (default: `empty`)
//! - `CARRITO_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// What the dropdown shows when the cart fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchFailurePolicy {
    /// Show an empty cart.
    #[default]
    Empty,
    /// Show the last mirrored cart, if any.
    Mirror,
}

impl FromStr for FetchFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "mirror" => Ok(Self::Mirror),
            other => Err(format!("expected 'empty' or 'mirror', got '{other}'")),
        }
    }
}

/// Cart widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the cart backend; `/carrito` is appended to it
    pub api_base_url: Url,
    /// Display policy when the cart fetch fails
    pub fetch_fallback: FetchFailurePolicy,
    /// Per-request timeout for backend calls
    pub http_timeout: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            fetch_fallback: FetchFailurePolicy::default(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = match lookup("CARRITO_API_BASE_URL") {
            Some(raw) => parse_base_url(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("CARRITO_API_BASE_URL".to_string(), e))?,
            None => default_base_url(),
        };

        let fetch_fallback = lookup("CARRITO_FETCH_FALLBACK")
            .map(|raw| raw.parse::<FetchFailurePolicy>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("CARRITO_FETCH_FALLBACK".to_string(), e))?
            .unwrap_or_default();

        let timeout_secs = lookup("CARRITO_HTTP_TIMEOUT_SECS")
            .map(|raw| raw.trim().parse::<u64>())
            .transpose()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CARRITO_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Ok(Self {
            api_base_url,
            fetch_fallback,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Use a different backend base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not an absolute http(s) URL.
    pub fn with_api_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_base_url = parse_base_url(url)
            .map_err(|e| ConfigError::InvalidEnvVar("api_base_url".to_string(), e))?;
        Ok(self)
    }

    /// Use a different fetch-failure policy.
    #[must_use]
    pub const fn with_fetch_fallback(mut self, policy: FetchFailurePolicy) -> Self {
        self.fetch_fallback = policy;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_base_url() -> Url {
    // Constant input; parse cannot fail.
    Url::parse(DEFAULT_API_BASE_URL).unwrap_or_else(|_| unreachable!())
}

/// Parse a backend base URL, requiring an http(s) scheme.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}
