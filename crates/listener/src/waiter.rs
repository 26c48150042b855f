//! Waiting for a projected document to show up
//!
//! A [`ProjectionWaiter`] polls a [`CommitLog`] until a document of an exact
//! type satisfies a predicate.
//!
//! ## Scan Sequence
//!
//! ```text
//! from = 0
//! loop:
//!   1. cancelled or past deadline?  -> Cancelled / TimedOut
//!   2. snapshot documents[from..len]
//!   3. first entry of type T with predicate(entry) -> Found
//!   4. from = len
//!   5. sleep(poll_interval), woken early by cancellation
//! ```
//!
//! The cursor only moves forward, so the predicate sees every index at most
//! once per wait. Cancellation is checked at the top of each pass: a match
//! found in the same pass as a late cancellation still wins.

use crate::config::WaitOptions;
use crate::log::CommitLog;
use commitwatch_core::{Error, Result};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// How a projection wait ended
pub enum WaitOutcome<T> {
    /// A matching document was found
    Found {
        /// Position of the document in the recorded sequence
        index: usize,
        /// The matching document
        document: Arc<T>,
    },
    /// The caller's cancellation token fired first
    Cancelled {
        /// Number of scans made
        attempts: u32,
    },
    /// The default deadline elapsed first
    TimedOut {
        /// Number of scans made
        attempts: u32,
        /// Time spent waiting
        elapsed: Duration,
    },
}

impl<T> WaitOutcome<T> {
    /// True when a matching document was found
    pub fn is_found(&self) -> bool {
        matches!(self, WaitOutcome::Found { .. })
    }

    /// The matching document, if any
    pub fn document(&self) -> Option<&Arc<T>> {
        match self {
            WaitOutcome::Found { document, .. } => Some(document),
            _ => None,
        }
    }

    /// Number of scans made; `None` when the wait succeeded
    pub fn attempts(&self) -> Option<u32> {
        match self {
            WaitOutcome::Found { .. } => None,
            WaitOutcome::Cancelled { attempts } | WaitOutcome::TimedOut { attempts, .. } => {
                Some(*attempts)
            }
        }
    }

    /// Convert into a `Result`, mapping non-matches to wait errors
    pub fn into_result(self) -> Result<Arc<T>> {
        match self {
            WaitOutcome::Found { document, .. } => Ok(document),
            WaitOutcome::Cancelled { attempts } => Err(Error::WaitCancelled {
                projection: type_name::<T>(),
                attempts,
            }),
            WaitOutcome::TimedOut { attempts, elapsed } => Err(Error::WaitTimedOut {
                projection: type_name::<T>(),
                attempts,
                elapsed,
            }),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for WaitOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitOutcome::Found { index, document } => f
                .debug_struct("Found")
                .field("index", index)
                .field("document", document)
                .finish(),
            WaitOutcome::Cancelled { attempts } => f
                .debug_struct("Cancelled")
                .field("attempts", attempts)
                .finish(),
            WaitOutcome::TimedOut { attempts, elapsed } => f
                .debug_struct("TimedOut")
                .field("attempts", attempts)
                .field("elapsed", elapsed)
                .finish(),
        }
    }
}

/// Polls a [`CommitLog`] for a matching projection
///
/// Cheap to clone; clones read the same log.
#[derive(Debug, Clone)]
pub struct ProjectionWaiter {
    log: CommitLog,
    options: WaitOptions,
    category: Arc<str>,
}

impl ProjectionWaiter {
    /// Create a waiter over a log
    pub fn new(log: CommitLog, options: WaitOptions, category: impl Into<Arc<str>>) -> Self {
        Self {
            log,
            options,
            category: category.into(),
        }
    }

    /// Polling parameters in use
    pub fn options(&self) -> WaitOptions {
        self.options
    }

    /// Wait until a document of exactly type `T` satisfies `predicate`
    ///
    /// With `cancel == None` the wait ends with [`WaitOutcome::TimedOut`]
    /// once the configured timeout elapses. With a token, only the token
    /// ends an unsuccessful wait.
    ///
    /// A timeout too large to represent as an instant means no deadline.
    pub async fn wait<T, F>(
        &self,
        mut predicate: F,
        cancel: Option<CancellationToken>,
    ) -> WaitOutcome<T>
    where
        T: Any + Send + Sync,
        F: FnMut(&T) -> bool,
    {
        let projection = type_name::<T>();
        info!(category = %self.category, projection, "waiting for projection");

        let started = Instant::now();
        let (token, deadline) = match cancel {
            Some(token) => (token, None),
            None => (
                CancellationToken::new(),
                started.checked_add(self.options.timeout),
            ),
        };

        let mut from = 0usize;
        let mut attempts = 0u32;

        loop {
            if token.is_cancelled() {
                debug!(
                    category = %self.category,
                    projection,
                    attempts,
                    "projection wait cancelled"
                );
                return WaitOutcome::Cancelled { attempts };
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    debug!(
                        category = %self.category,
                        projection,
                        attempts,
                        "projection wait timed out"
                    );
                    return WaitOutcome::TimedOut {
                        attempts,
                        elapsed: started.elapsed(),
                    };
                }
            }

            attempts = attempts.saturating_add(1);
            info!(
                category = %self.category,
                attempt = attempts,
                "looking for expected projection"
            );

            let pending = self.log.documents_from(from);
            let up_to = from + pending.len();
            for (offset, doc) in pending.iter().enumerate() {
                let Some(value) = doc.downcast::<T>() else {
                    continue;
                };
                if predicate(&*value) {
                    let index = from + offset;
                    match doc.identity() {
                        Some(id) => info!(
                            category = %self.category,
                            projection,
                            id,
                            index,
                            "found projection"
                        ),
                        None => info!(
                            category = %self.category,
                            projection,
                            index,
                            "found projection"
                        ),
                    }
                    return WaitOutcome::Found {
                        index,
                        document: value,
                    };
                }
            }
            drop(pending);
            from = up_to;

            let mut pause = self.options.poll_interval;
            if let Some(deadline) = deadline {
                pause = pause.min(deadline.saturating_duration_since(Instant::now()));
            }
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(pause) => {}
            }
        }
    }

    /// Run [`wait`](Self::wait) as an independent task
    pub fn spawn<T, F>(
        &self,
        predicate: F,
        cancel: Option<CancellationToken>,
    ) -> JoinHandle<WaitOutcome<T>>
    where
        T: Any + Send + Sync,
        F: FnMut(&T) -> bool + Send + 'static,
    {
        let waiter = self.clone();
        tokio::spawn(async move { waiter.wait(predicate, cancel).await })
    }
}
