//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GALLERY_DATA_DIR` - Directory holding the persisted cart (default: .gallery)
//! - `GALLERY_CHECKOUT_DELAY_MS` - Simulated payment latency (default: 1500)
//! - `GALLERY_CHECKOUT_TIMEOUT_MS` - Submission timeout, must exceed the delay (default: 10000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".gallery";
const DEFAULT_CHECKOUT_DELAY_MS: &str = "1500";
const DEFAULT_CHECKOUT_TIMEOUT_MS: &str = "10000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory the cart snapshot is written to
    pub data_dir: PathBuf,
    /// Checkout submission settings
    pub checkout: CheckoutConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Checkout submission timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// How long the simulated payment takes
    pub submit_delay: Duration,
    /// Upper bound on a submission
    pub submit_timeout: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(1500),
            submit_timeout: Duration::from_millis(10_000),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            checkout: CheckoutConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
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
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable or inconsistent values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_or_default(&lookup, "GALLERY_DATA_DIR", DEFAULT_DATA_DIR));
        let checkout = CheckoutConfig::from_lookup(&lookup)?;

        Ok(Self {
            data_dir,
            checkout,
            sentry_dsn: get_optional(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }
}

impl CheckoutConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let submit_delay = get_millis(lookup, "GALLERY_CHECKOUT_DELAY_MS", DEFAULT_CHECKOUT_DELAY_MS)?;
        let submit_timeout =
            get_millis(lookup, "GALLERY_CHECKOUT_TIMEOUT_MS", DEFAULT_CHECKOUT_TIMEOUT_MS)?;

        if submit_timeout <= submit_delay {
            return Err(ConfigError::InvalidEnvVar(
                "GALLERY_CHECKOUT_TIMEOUT_MS".to_string(),
                format!(
                    "must exceed GALLERY_CHECKOUT_DELAY_MS ({} ms)",
                    submit_delay.as_millis()
                ),
            ));
        }

        Ok(Self {
            submit_delay,
            submit_timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Get a millisecond duration.
fn get_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<Duration, ConfigError> {
    get_or_default(lookup, key, default)
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
