//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults reproduce the shop as it has
//! always run.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `STORE_NAME` - Name shown in the header, footer and support message
//! - `WHATSAPP_BASE_URL` - Click-to-chat base URL (default: <https://wa.me>)
//! - `WHATSAPP_CHECKOUT_NUMBER` - Number that receives orders
//! - `WHATSAPP_SUPPORT_NUMBER` - Number that receives support requests
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Default store name.
pub const DEFAULT_STORE_NAME: &str = "ELIMINATOR VIT SERVICE";

/// Checkout number shipped with the storefront. Operators must replace it.
pub const PLACEHOLDER_CHECKOUT_NUMBER: &str = "YOUR_PHONE_NUMBER";

/// Default support contact.
pub const DEFAULT_SUPPORT_NUMBER: &str = "2349033181048";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your_",
    "your-",
    "phone_number",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Store name rendered in the shell
    pub store_name: String,
    /// WhatsApp hand-off configuration
    pub messaging: MessagingConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Click-to-chat link configuration for checkout and support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingConfig {
    /// Base URL of the messaging service, without trailing slash
    pub base_url: String,
    /// Destination that receives checkout messages
    pub checkout_number: String,
    /// Destination that receives support messages
    pub support_number: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wa.me".to_string(),
            checkout_number: PLACEHOLDER_CHECKOUT_NUMBER.to_string(),
            support_number: DEFAULT_SUPPORT_NUMBER.to_string(),
        }
    }
}

impl MessagingConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: get_env_or_default("WHATSAPP_BASE_URL", &defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            checkout_number: get_env_or_default(
                "WHATSAPP_CHECKOUT_NUMBER",
                &defaults.checkout_number,
            ),
            support_number: get_env_or_default("WHATSAPP_SUPPORT_NUMBER", &defaults.support_number),
        }
    }

    /// Whether the checkout destination looks like a real phone number.
    ///
    /// Checkout still works with a placeholder; the link just goes nowhere.
    #[must_use]
    pub fn checkout_configured(&self) -> bool {
        looks_like_phone_number(&self.checkout_number)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            store_name: DEFAULT_STORE_NAME.to_string(),
            messaging: MessagingConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", &defaults.base_url);
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let store_name = get_env_or_default("STORE_NAME", DEFAULT_STORE_NAME);
        let messaging = MessagingConfig::from_env();
        url::Url::parse(&messaging.base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("WHATSAPP_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            host,
            port,
            base_url,
            store_name,
            messaging,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: get_rate(
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse a sample rate in `0.0..=1.0`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

/// Whether a destination looks like an international phone number.
fn looks_like_phone_number(value: &str) -> bool {
    let lower = value.to_lowercase();
    if PLACEHOLDER_PATTERNS.iter().any(|p| lower.contains(p)) {
        return false;
    }
    let digits = value.strip_prefix('+').unwrap_or(value);
    (7..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
