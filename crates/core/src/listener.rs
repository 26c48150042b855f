//! Session listener contract
//!
//! The host drives these callbacks from its own commit pipeline. A listener
//! must never fail the pipeline, so none of the callbacks return a result.
//!
//! ```text
//! session.save_changes():
//!   before_save_changes()
//!   ... host writes, document_added_for_storage() per stored document ...
//!   commit
//!   after_commit(ChangeSet)
//! ```

use crate::change_set::ChangeSet;
use crate::document::Document;
use crate::types::SessionInfo;
use std::fmt;
use std::sync::Arc;

/// Callbacks a document-store session invokes on attached listeners
///
/// Only [`after_commit`](SessionListener::after_commit) is required; the
/// remaining lifecycle hooks default to accept-and-ignore.
pub trait SessionListener: Send + Sync {
    /// Called once a commit is complete
    ///
    /// Implementations must return promptly and must not panic.
    fn after_commit(&self, session: &SessionInfo, commit: &ChangeSet);

    /// Called before the session flushes its pending changes
    fn before_save_changes(&self, _session: &SessionInfo) {}

    /// Called when the session loads a document
    fn document_loaded(&self, _id: &str, _document: &Document) {}

    /// Called when a document is queued for storage
    fn document_added_for_storage(&self, _id: &str, _document: &Document) {}
}

impl<L: SessionListener + ?Sized> SessionListener for Arc<L> {
    fn after_commit(&self, session: &SessionInfo, commit: &ChangeSet) {
        (**self).after_commit(session, commit)
    }

    fn before_save_changes(&self, session: &SessionInfo) {
        (**self).before_save_changes(session)
    }

    fn document_loaded(&self, id: &str, document: &Document) {
        (**self).document_loaded(id, document)
    }

    fn document_added_for_storage(&self, id: &str, document: &Document) {
        (**self).document_added_for_storage(id, document)
    }
}

/// Fans each callback out to several listeners in registration order
///
/// Hosts usually accept a single listener per session; a chain lets tests
/// attach more than one (e.g. one per store category).
#[derive(Default, Clone)]
pub struct ListenerChain {
    listeners: Vec<Arc<dyn SessionListener>>,
}

impl ListenerChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener to the end of the chain
    pub fn push(&mut self, listener: Arc<dyn SessionListener>) {
        self.listeners.push(listener);
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.push(listener);
        self
    }

    /// Number of attached listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True when no listener is attached
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ListenerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerChain")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SessionListener for ListenerChain {
    fn after_commit(&self, session: &SessionInfo, commit: &ChangeSet) {
        for listener in &self.listeners {
            listener.after_commit(session, commit);
        }
    }

    fn before_save_changes(&self, session: &SessionInfo) {
        for listener in &self.listeners {
            listener.before_save_changes(session);
        }
    }

    fn document_loaded(&self, id: &str, document: &Document) {
        for listener in &self.listeners {
            listener.document_loaded(id, document);
        }
    }

    fn document_added_for_storage(&self, id: &str, document: &Document) {
        for listener in &self.listeners {
            listener.document_added_for_storage(id, document);
        }
    }
}
