//! Listener configuration
//!
//! Options can be built in code or loaded from TOML:
//!
//! ```toml
//! category = "orders"
//!
//! [wait]
//! poll_interval_ms = 50
//! timeout_ms = 2000
//! ```
//!
//! Every field is optional; omitted fields take the defaults below.

use commitwatch_core::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Delay between two scans of the recorded documents
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Deadline applied to a wait when the caller supplies no cancellation token
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Category used when none is configured
pub const DEFAULT_CATEGORY: &str = "default";

/// Polling parameters for projection waits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaitOptions {
    /// Delay between unsuccessful scans
    #[serde(rename = "poll_interval_ms", deserialize_with = "millis")]
    pub poll_interval: Duration,

    /// Deadline used only when the caller supplies no cancellation token
    #[serde(rename = "timeout_ms", deserialize_with = "millis")]
    pub timeout: Duration,
}

impl WaitOptions {
    /// Create options with the default interval and timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the default timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject zero durations
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "wait timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

/// Configuration for a [`CommitListener`](crate::CommitListener)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenerConfig {
    /// Label attached to every log line the listener emits
    pub category: String,
    /// Projection wait parameters
    pub wait: WaitOptions,
}

impl ListenerConfig {
    /// Create a config for a category with default wait options
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            wait: WaitOptions::default(),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ListenerConfig =
            toml::from_str(source).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every field
    ///
    /// The category is only a log label, so any string is accepted.
    pub fn validate(&self) -> Result<()> {
        self.wait.validate()
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY)
    }
}

fn millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}
