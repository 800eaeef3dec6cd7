//! Store configuration loaded from the process environment.
//!
//! ```text
//! TASKBOARD_DATABASE_URL       required, PostgreSQL connection string
//! TASKBOARD_POOL_MAX_SIZE      optional, defaults to 10
//! TASKBOARD_POOL_TIMEOUT_SECS  optional, defaults to 30
//! ```

use std::time::Duration;
use thiserror::Error;

/// Environment key holding the database URL.
pub const DATABASE_URL_ENV: &str = "TASKBOARD_DATABASE_URL";
/// Environment key holding the maximum pool size.
pub const POOL_MAX_SIZE_ENV: &str = "TASKBOARD_POOL_MAX_SIZE";
/// Environment key holding the pool checkout timeout in seconds.
pub const POOL_TIMEOUT_SECS_ENV: &str = "TASKBOARD_POOL_TIMEOUT_SECS";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is absent or blank.
    #[error("missing required configuration value {0}")]
    Missing(&'static str),

    /// A key holds a value that cannot be used.
    #[error("invalid value '{value}' for {key}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// Raw value as read.
        value: String,
    },
}

/// Connection settings for the `PostgreSQL` store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_max_size: u32,
    /// Maximum time to wait for a pooled connection.
    pub pool_timeout: Duration,
}

impl StoreConfig {
    /// Default maximum pool size.
    pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;
    /// Default pool checkout timeout.
    pub const DEFAULT_POOL_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_max_size: Self::DEFAULT_POOL_MAX_SIZE,
            pool_timeout: Self::DEFAULT_POOL_TIMEOUT,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a pool
    /// setting does not parse as a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or a pool
    /// setting does not parse as a positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_ENV)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_ENV))?;

        let pool_max_size = parse_positive(&lookup, POOL_MAX_SIZE_ENV)?
            .unwrap_or(Self::DEFAULT_POOL_MAX_SIZE);
        let pool_timeout = parse_positive(&lookup, POOL_TIMEOUT_SECS_ENV)?
            .map_or(Self::DEFAULT_POOL_TIMEOUT, |secs| {
                Duration::from_secs(u64::from(secs))
            });

        Ok(Self {
            database_url,
            pool_max_size,
            pool_timeout,
        })
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u32>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}
