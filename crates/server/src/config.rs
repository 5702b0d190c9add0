//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WIX_APP_ID` - App id issued by the Wix developer console
//! - `WIX_APP_SECRET` - App secret used for OAuth token exchange
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `BASE_URL` - Public URL of this server (default: http://localhost:PORT)
//! - `OAUTH_SCOPES` - Scope string for the install URL (default: stores:read)
//! - `APP_ENV` - Environment name echoed in health/descriptor responses
//!   (default: development)
//! - `WIX_API_BASE_URL` - Override for the Wix Stores API origin
//! - `WIX_OAUTH_BASE_URL` - Override for the Wix installer/token origin
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used to build the OAuth redirect URI
    pub base_url: String,
    /// Environment name echoed by health/descriptor endpoints
    pub environment: String,
    /// Wix platform configuration
    pub wix: WixConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Wix platform credentials and endpoints.
///
/// Implements `Debug` manually to redact the app secret.
#[derive(Clone)]
pub struct WixConfig {
    /// App id issued by the Wix developer console
    pub app_id: String,
    /// App secret used for the OAuth token exchange
    pub app_secret: SecretString,
    /// Scope string sent on the install URL
    pub oauth_scopes: String,
    /// Origin of the Wix Stores API (overridable for tests)
    pub api_base_url: String,
    /// Origin of the Wix installer and token endpoints (overridable for tests)
    pub oauth_base_url: String,
}

impl std::fmt::Debug for WixConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WixConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .field("oauth_scopes", &self.oauth_scopes)
            .field("api_base_url", &self.api_base_url)
            .field("oauth_base_url", &self.oauth_base_url)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the app secret looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let base_url =
            get_optional_env("BASE_URL").unwrap_or_else(|| format!("http://localhost:{port}"));
        url::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("BASE_URL".to_string(), e.to_string()))?;

        let environment = get_env_or_default("APP_ENV", "development");
        let wix = WixConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            environment,
            wix,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The OAuth redirect URI registered with the platform.
    #[must_use]
    pub fn oauth_redirect_uri(&self) -> String {
        format!("{}/oauth/callback", self.base_url)
    }
}

impl WixConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app_id: get_required_env("WIX_APP_ID")?,
            app_secret: get_validated_secret("WIX_APP_SECRET")?,
            oauth_scopes: get_env_or_default("OAUTH_SCOPES", "stores:read"),
            api_base_url: get_env_or_default("WIX_API_BASE_URL", "https://www.wixapis.com"),
            oauth_base_url: get_env_or_default("WIX_OAUTH_BASE_URL", "https://www.wix.com"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a secret is not an obvious placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
