//! Queue configuration
//!
//! [`QueueConfig`] carries the knobs both queue kinds read at construction.
//! It can be built in code, parsed from TOML, or loaded from environment
//! variables.
//!
//! ## Environment Variables
//! - `RINGLINK_QUEUE_CAPACITY`: array capacity / linked slack hint
//! - `RINGLINK_QUEUE_MAX_LEN`: optional bound for linked queues
//! - `RINGLINK_POOL_PREALLOCATE`: nodes seeded into the shared pool
//!
//! Unset variables keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// Environment variable holding [`QueueConfig::capacity`].
pub const ENV_CAPACITY: &str = "RINGLINK_QUEUE_CAPACITY";
/// Environment variable holding [`QueueConfig::max_len`].
pub const ENV_MAX_LEN: &str = "RINGLINK_QUEUE_MAX_LEN";
/// Environment variable holding [`QueueConfig::pool_preallocate`].
pub const ENV_POOL_PREALLOCATE: &str = "RINGLINK_POOL_PREALLOCATE";

const DEFAULT_CAPACITY: usize = 64;

/// Construction settings for [`ArrayQueue`](crate::collections::ArrayQueue)
/// and [`LinkedQueue`](crate::collections::LinkedQueue).
///
/// # Examples
///
/// ```rust
/// use ringlink_queues::config::QueueConfig;
///
/// let config = QueueConfig::from_toml_str("capacity = 16\nmax_len = 32").unwrap();
/// assert_eq!(config.capacity, 16);
/// assert_eq!(config.max_len, Some(32));
/// assert_eq!(config.pool_preallocate, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// Hard bound for array queues; slack hint for linked queues.
    pub capacity: usize,
    /// Optional hard bound for linked queues.
    pub max_len: Option<usize>,
    /// Nodes seeded into the shared pool before a linked queue is built.
    pub pool_preallocate: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY, max_len: None, pool_preallocate: 0 }
    }
}

impl QueueConfig {
    /// Starts a fluent builder seeded with the defaults.
    #[must_use]
    pub fn builder() -> QueueConfigBuilder {
        QueueConfigBuilder::default()
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CommonError::Serialization`] for malformed TOML or unknown
    /// keys.
    pub fn from_toml_str(contents: &str) -> CommonResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`CommonError::Serialization`] when encoding fails.
    pub fn to_toml_string(&self) -> CommonResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Loads the configuration from `RINGLINK_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`CommonError::Config`] naming the variable whose value is
    /// not a non-negative integer.
    pub fn from_env() -> CommonResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            capacity: env_usize(ENV_CAPACITY)?.unwrap_or(defaults.capacity),
            max_len: env_usize(ENV_MAX_LEN)?.or(defaults.max_len),
            pool_preallocate: env_usize(ENV_POOL_PREALLOCATE)?
                .unwrap_or(defaults.pool_preallocate),
        })
    }

    /// Checks the settings can build a usable queue.
    ///
    /// # Errors
    ///
    /// Returns [`CommonError::Validation`] when `capacity` is zero or
    /// `max_len` is `Some(0)`.
    pub fn validate(&self) -> CommonResult<()> {
        let rejection = if self.capacity == 0 {
            CommonError::validation_with_value(
                "capacity",
                "must be greater than zero",
                self.capacity.to_string(),
            )
        } else if self.max_len == Some(0) {
            CommonError::validation_with_value("max_len", "must be greater than zero when set", "0")
        } else {
            return Ok(());
        };

        #[cfg(feature = "observability")]
        tracing::debug!(fields = ?rejection.as_tracing_fields(), "queue config rejected");

        Err(rejection)
    }
}

fn env_usize(name: &str) -> CommonResult<Option<usize>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| CommonError::config_field(name, format!("invalid value {raw:?}: {e}"))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(CommonError::config_field(name, e.to_string())),
    }
}

/// Fluent builder for [`QueueConfig`].
#[derive(Debug, Clone, Default)]
pub struct QueueConfigBuilder {
    config: QueueConfig,
}

impl QueueConfigBuilder {
    /// Sets the array capacity / linked slack hint.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Bounds linked queues at `max_len` items.
    #[must_use]
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.config.max_len = Some(max_len);
        self
    }

    /// Seeds `count` nodes into the shared pool.
    #[must_use]
    pub fn pool_preallocate(mut self, count: usize) -> Self {
        self.config.pool_preallocate = count;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// See [`QueueConfig::validate`].
    pub fn build(self) -> CommonResult<QueueConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
