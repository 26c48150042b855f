//! The payload of a completed commit
//!
//! A [`ChangeSet`] is what the host reports after a unit of work commits:
//! the events appended and the documents inserted, updated or deleted.
//! Missing collections are represented as empty vectors.

use crate::document::Document;
use crate::event::Event;
use std::any::Any;

/// Everything a single commit changed, in the order the host applied it
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    events: Vec<Event>,
    updated: Vec<Document>,
    inserted: Vec<Document>,
    deleted: Vec<Document>,
}

impl ChangeSet {
    /// Create an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a change set from the two collections listeners care about
    pub fn from_parts(events: Vec<Event>, updated: Vec<Document>) -> Self {
        ChangeSet {
            events,
            updated,
            ..Self::default()
        }
    }

    /// Append an event
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Append an updated document
    pub fn with_updated<T: Any + Send + Sync>(mut self, document: T) -> Self {
        self.updated.push(Document::new(document));
        self
    }

    /// Append an already wrapped updated document
    pub fn with_updated_document(mut self, document: Document) -> Self {
        self.updated.push(document);
        self
    }

    /// Append an inserted document
    pub fn with_inserted(mut self, document: Document) -> Self {
        self.inserted.push(document);
        self
    }

    /// Append a deleted document
    pub fn with_deleted(mut self, document: Document) -> Self {
        self.deleted.push(document);
        self
    }

    /// Events appended by the commit
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Documents updated by the commit, including projections
    pub fn updated(&self) -> &[Document] {
        &self.updated
    }

    /// Documents inserted by the commit
    pub fn inserted(&self) -> &[Document] {
        &self.inserted
    }

    /// Documents deleted by the commit
    pub fn deleted(&self) -> &[Document] {
        &self.deleted
    }

    /// True when the commit changed nothing
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
            && self.updated.is_empty()
            && self.inserted.is_empty()
            && self.deleted.is_empty()
    }
}
