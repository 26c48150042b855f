//! Commit Listener Test Suite
//!
//! Drives [`CommitListener`] through a minimal fake host session, the same
//! way a document store invokes its listeners after `save_changes`.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test listener
//!
//! # Run projection wait tests only
//! cargo test --test listener waiting::
//! ```

use commitwatch::prelude::*;
use commitwatch::ListenerChain;
use std::sync::Arc;

pub mod properties;
pub mod waiting;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Install a test-writer subscriber once per binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Projection document used throughout the suite
#[derive(Debug, Clone, PartialEq)]
pub struct Foo {
    pub id: u32,
    pub name: String,
}

impl Foo {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: format!("foo-{}", id),
        }
    }
}

impl Identified for Foo {
    fn identity(&self) -> String {
        self.id.to_string()
    }
}

/// A projection type that is never written
#[derive(Debug)]
pub struct NeverWritten;

/// Domain event used throughout the suite
#[derive(Debug)]
pub struct FooCreated {
    pub id: u32,
}

/// Fake host session
///
/// Collects pending events and documents, then on `save_changes` runs the
/// listener lifecycle: before_save_changes, document_added_for_storage,
/// after_commit.
pub struct FakeSession {
    info: SessionInfo,
    listeners: ListenerChain,
    events: Vec<Event>,
    documents: Vec<Document>,
    next_version: u64,
}

impl FakeSession {
    pub fn new(listener: Arc<dyn SessionListener>) -> Self {
        Self::with_chain(ListenerChain::new().with(listener))
    }

    pub fn with_chain(listeners: ListenerChain) -> Self {
        Self {
            info: SessionInfo::new("tests"),
            listeners,
            events: Vec::new(),
            documents: Vec::new(),
            next_version: 1,
        }
    }

    pub fn append<T>(&mut self, stream: &str, event: T) -> &mut Self
    where
        T: std::any::Any + Send + Sync,
    {
        let version = self.next_version;
        self.next_version += 1;
        self.events.push(Event::new(stream, event).with_version(version));
        self
    }

    pub fn store(&mut self, document: Document) -> &mut Self {
        self.documents.push(document);
        self
    }

    pub fn save_changes(&mut self) {
        self.listeners.before_save_changes(&self.info);
        for (i, doc) in self.documents.iter().enumerate() {
            self.listeners.document_added_for_storage(&i.to_string(), doc);
        }
        let commit = ChangeSet::from_parts(
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.documents),
        );
        self.listeners.after_commit(&self.info, &commit);
    }
}
