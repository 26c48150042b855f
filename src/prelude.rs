//! Convenient imports for commitwatch.
//!
//! ```ignore
//! use commitwatch::prelude::*;
//!
//! let listener = CommitListener::new("orders");
//! ```

// Listener entry points
pub use crate::{CommitListener, CommitListenerBuilder, ListenerConfig, WaitOptions, WaitOutcome};

// Callback contract
pub use crate::{ChangeSet, Document, Event, Identified, SessionInfo, SessionListener};

// Error handling
pub use crate::{Error, Result};

// Cancellation
pub use crate::CancellationToken;
