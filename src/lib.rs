//! # commitwatch
//!
//! Commit listener for document-store integration tests.
//!
//! Attach a [`CommitListener`] to the sessions of the store under test. It
//! records the events and updated documents of every commit, and lets the
//! test wait until an asynchronously built projection shows up.
//!
//! ## Quick Start
//!
//! ```ignore
//! use commitwatch::prelude::*;
//!
//! let listener = CommitListener::new("orders");
//! store.attach(listener.clone());
//!
//! session.append(order_placed).save_changes()?;
//!
//! // Events and documents of every commit so far
//! assert_eq!(listener.event_count(), 1);
//!
//! // Block until the projection daemon has written the summary
//! let summary = listener
//!     .wait_for_projection(|s: &OrderSummary| s.id == order_id, None)
//!     .await
//!     .into_result()?;
//! ```
//!
//! ## Waiting
//!
//! A wait scans only documents it has not seen before, checks the exact
//! runtime type, and ends in one of three ways (see [`WaitOutcome`]):
//!
//! - **Found** - a matching document was recorded
//! - **Cancelled** - the caller's [`CancellationToken`] fired
//! - **TimedOut** - no token was given and the default deadline (10s) passed

#![warn(missing_docs)]

pub mod prelude;

// Callback contract and commit payload
pub use commitwatch_core::{
    ChangeSet, Document, Event, Identified, ListenerChain, SessionId, SessionInfo,
    SessionListener, StreamId,
};

// Error handling
pub use commitwatch_core::{Error, Result};

// Listener, waiter and configuration
pub use commitwatch_listener::{
    CancellationToken, CommitListener, CommitListenerBuilder, CommitLog, ListenerConfig,
    ProjectionWaiter, WaitOptions, WaitOutcome, DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT,
};
