//! Order engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ORDER_DISPATCH_TIMEOUT_MS` - How long a dispatcher may take before the
//!   submission is failed (default: 10000, must be > 0)
//! - `ORDER_CATALOG_PATH` - JSON catalog file to use instead of the built-in
//!   fish catalog

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DISPATCH_TIMEOUT_MS: u64 = 10_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Order engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfig {
    /// Upper bound on a single dispatch call
    pub dispatch_timeout: Duration,
    /// Catalog file override
    pub catalog_path: Option<PathBuf>,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            dispatch_timeout: Duration::from_millis(DEFAULT_DISPATCH_TIMEOUT_MS),
            catalog_path: None,
        }
    }
}

impl OrderConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_ms = match get("ORDER_DISPATCH_TIMEOUT_MS") {
            Some(raw) => parse_timeout_ms("ORDER_DISPATCH_TIMEOUT_MS", &raw)?,
            None => DEFAULT_DISPATCH_TIMEOUT_MS,
        };
        let catalog_path = get("ORDER_CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            dispatch_timeout: Duration::from_millis(timeout_ms),
            catalog_path,
        })
    }

    /// Override the dispatch timeout.
    #[must_use]
    pub const fn with_dispatch_timeout(mut self, timeout: Duration) -> Self {
        self.dispatch_timeout = timeout;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a strictly positive millisecond count.
fn parse_timeout_ms(key: &str, raw: &str) -> Result<u64, ConfigError> {
    let ms = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if ms == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(ms)
}
