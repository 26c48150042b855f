//! Recording session listener
//!
//! [`CommitListener`] is attached to document-store sessions. Every completed
//! commit is appended to its [`CommitLog`]; test code then inspects the
//! recorded events and documents or waits for a projection to appear.
//!
//! # Example
//!
//! ```ignore
//! use commitwatch_listener::CommitListener;
//!
//! let listener = CommitListener::new("orders");
//! store.attach(listener.clone());
//!
//! session.append(order_placed).save_changes()?;
//!
//! let summary = listener
//!     .wait_for_projection(|s: &OrderSummary| s.id == order_id, None)
//!     .await
//!     .into_result()?;
//! ```

use crate::config::{ListenerConfig, WaitOptions};
use crate::log::CommitLog;
use crate::waiter::{ProjectionWaiter, WaitOutcome};
use commitwatch_core::{ChangeSet, Document, Event, Result, SessionInfo, SessionListener};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Session listener that records every commit it observes
///
/// Cloning yields another handle to the same record, so one clone can be
/// attached to the store while the test keeps another.
#[derive(Debug, Clone)]
pub struct CommitListener {
    category: Arc<str>,
    log: CommitLog,
    wait: WaitOptions,
}

impl CommitListener {
    /// Create a listener with default wait options
    pub fn new(category: impl Into<String>) -> Self {
        Self::from_parts(category.into(), WaitOptions::default())
    }

    /// Create a builder for listener configuration
    pub fn builder() -> CommitListenerBuilder {
        CommitListenerBuilder::new()
    }

    /// Create a listener from a validated configuration
    pub fn from_config(config: ListenerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config.category, config.wait))
    }

    fn from_parts(category: String, wait: WaitOptions) -> Self {
        Self {
            category: category.into(),
            log: CommitLog::new(),
            wait,
        }
    }

    /// Label used in log output
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Wait options applied by [`wait_for_projection`](Self::wait_for_projection)
    pub fn wait_options(&self) -> WaitOptions {
        self.wait
    }

    /// Shared handle to the underlying record
    pub fn log(&self) -> &CommitLog {
        &self.log
    }

    /// Snapshot of every recorded event, in commit order
    pub fn events(&self) -> Vec<Event> {
        self.log.events()
    }

    /// Snapshot of every recorded document, in commit order
    pub fn documents(&self) -> Vec<Document> {
        self.log.documents()
    }

    /// Number of recorded events
    pub fn event_count(&self) -> usize {
        self.log.event_count()
    }

    /// Number of recorded documents
    pub fn document_count(&self) -> usize {
        self.log.document_count()
    }

    /// Recorded documents of exactly type `T`, in commit order
    pub fn documents_of<T: Any + Send + Sync>(&self) -> Vec<Arc<T>> {
        self.log
            .documents()
            .iter()
            .filter_map(Document::downcast::<T>)
            .collect()
    }

    /// Payloads of recorded events of exactly type `T`, in commit order
    pub fn events_of<T: Any + Send + Sync>(&self) -> Vec<Arc<T>> {
        self.log
            .events()
            .iter()
            .filter_map(Event::data_arc::<T>)
            .collect()
    }

    /// A waiter over this listener's record using its wait options
    pub fn waiter(&self) -> ProjectionWaiter {
        self.waiter_with(self.wait)
    }

    fn waiter_with(&self, options: WaitOptions) -> ProjectionWaiter {
        ProjectionWaiter::new(self.log.clone(), options, Arc::clone(&self.category))
    }

    /// Wait until a recorded document of exactly type `T` satisfies `predicate`
    ///
    /// Without a token the wait gives up after the configured timeout
    /// (10 seconds by default).
    pub async fn wait_for_projection<T, F>(
        &self,
        predicate: F,
        cancel: Option<CancellationToken>,
    ) -> WaitOutcome<T>
    where
        T: Any + Send + Sync,
        F: FnMut(&T) -> bool,
    {
        self.waiter().wait(predicate, cancel).await
    }

    /// Like [`wait_for_projection`](Self::wait_for_projection) with explicit options
    pub async fn wait_for_projection_with<T, F>(
        &self,
        predicate: F,
        cancel: Option<CancellationToken>,
        options: WaitOptions,
    ) -> WaitOutcome<T>
    where
        T: Any + Send + Sync,
        F: FnMut(&T) -> bool,
    {
        self.waiter_with(options).wait(predicate, cancel).await
    }

    /// Run [`wait_for_projection`](Self::wait_for_projection) as its own task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_wait_for_projection<T, F>(
        &self,
        predicate: F,
        cancel: Option<CancellationToken>,
    ) -> JoinHandle<WaitOutcome<T>>
    where
        T: Any + Send + Sync,
        F: FnMut(&T) -> bool + Send + 'static,
    {
        self.waiter().spawn(predicate, cancel)
    }
}

impl SessionListener for CommitListener {
    fn after_commit(&self, session: &SessionInfo, commit: &ChangeSet) {
        let (events, documents) = self.log.record(commit);
        debug!(
            category = %self.category,
            session = %session,
            events,
            "listener fetched events"
        );
        debug!(
            category = %self.category,
            session = %session,
            documents,
            "listener fetched projections"
        );
    }
}

/// Builder for [`CommitListener`]
///
/// # Example
///
/// ```ignore
/// let listener = CommitListener::builder()
///     .category("orders")
///     .poll_interval(Duration::from_millis(20))
///     .timeout(Duration::from_secs(2))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommitListenerBuilder {
    config: ListenerConfig,
}

impl CommitListenerBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: ListenerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the category label
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.config.category = category.into();
        self
    }

    /// Set the delay between unsuccessful scans
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.wait.poll_interval = interval;
        self
    }

    /// Set the deadline for waits without a cancellation token
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.wait.timeout = timeout;
        self
    }

    /// Validate the configuration and create the listener
    pub fn build(self) -> Result<CommitListener> {
        CommitListener::from_config(self.config)
    }
}
