//! Recording commit listener for document-store tests
//!
//! This crate provides:
//! - [`CommitListener`]: a [`SessionListener`](commitwatch_core::SessionListener)
//!   that records the events and documents of every commit
//! - [`CommitLog`]: the append-only record shared by listener clones
//! - [`ProjectionWaiter`]: polls the record until a projection appears
//! - [`ListenerConfig`] / [`WaitOptions`]: configuration, loadable from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod listener;
pub mod log;
pub mod waiter;

pub use config::{ListenerConfig, WaitOptions, DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT};
pub use listener::{CommitListener, CommitListenerBuilder};
pub use log::CommitLog;
pub use waiter::{ProjectionWaiter, WaitOutcome};

// Re-export the token type used by the wait API
pub use tokio_util::sync::CancellationToken;
