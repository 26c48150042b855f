//! Error types for commitwatch.
//!
//! Recording a commit never fails; errors only surface from waiting on a
//! projection (when the caller asks for a `Result`) and from configuration.

use std::time::Duration;
use thiserror::Error;

/// All commitwatch errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The wait deadline elapsed before a matching document appeared
    #[error("timed out after {elapsed:?} waiting for {projection} ({attempts} attempts)")]
    WaitTimedOut {
        /// Type name the wait was looking for
        projection: &'static str,
        /// Number of polling passes made
        attempts: u32,
        /// Time spent waiting
        elapsed: Duration,
    },

    /// The caller cancelled the wait before a matching document appeared
    #[error("wait for {projection} cancelled after {attempts} attempts")]
    WaitCancelled {
        /// Type name the wait was looking for
        projection: &'static str,
        /// Number of polling passes made
        attempts: u32,
    },

    /// Configuration value out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("config parse error: {0}")]
    Config(String),
}

/// Result type for commitwatch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error ended a wait without a match.
    pub fn is_wait_failure(&self) -> bool {
        matches!(self, Error::WaitTimedOut { .. } | Error::WaitCancelled { .. })
    }

    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::WaitTimedOut { .. })
    }

    /// Check if this is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::WaitCancelled { .. })
    }

    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::InvalidConfig(_) | Error::Config(_))
    }
}
