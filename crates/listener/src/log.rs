//! Append-only record of observed commits
//!
//! [`CommitLog`] holds the events and documents a listener has seen, in
//! delivery order. Nothing is ever removed or rewritten.
//!
//! # Thread Safety
//!
//! Several sessions may share one listener, so commits can arrive from
//! different threads while a waiter is scanning. Both sequences live under a
//! single `RwLock`: a commit's events and documents become visible together,
//! and readers copy out what they need before releasing the lock.

use commitwatch_core::{ChangeSet, Document, Event};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Recorded {
    events: Vec<Event>,
    documents: Vec<Document>,
}

/// Shared handle to the recorded sequences
///
/// Clones share the same underlying record.
#[derive(Debug, Clone, Default)]
pub struct CommitLog {
    inner: Arc<RwLock<Recorded>>,
}

impl CommitLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit's events and updated documents
    ///
    /// Returns the number of events and documents appended.
    pub fn record(&self, commit: &ChangeSet) -> (usize, usize) {
        let events = commit.events();
        let documents = commit.updated();
        if events.is_empty() && documents.is_empty() {
            return (0, 0);
        }

        let mut recorded = self.inner.write();
        recorded.events.extend_from_slice(events);
        recorded.documents.extend_from_slice(documents);
        (events.len(), documents.len())
    }

    /// Number of recorded events
    pub fn event_count(&self) -> usize {
        self.inner.read().events.len()
    }

    /// Number of recorded documents
    pub fn document_count(&self) -> usize {
        self.inner.read().documents.len()
    }

    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<Event> {
        self.inner.read().events.clone()
    }

    /// Snapshot of all recorded documents
    pub fn documents(&self) -> Vec<Document> {
        self.inner.read().documents.clone()
    }

    /// Snapshot of the documents recorded at or after `from`
    ///
    /// The returned vector covers `[from, len)` as of a single read, so
    /// `from + result.len()` is the length the caller observed.
    pub fn documents_from(&self, from: usize) -> Vec<Document> {
        let recorded = self.inner.read();
        recorded
            .documents
            .get(from..)
            .map(<[Document]>::to_vec)
            .unwrap_or_default()
    }
}
