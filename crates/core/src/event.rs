//! Event envelopes delivered with a commit
//!
//! The host appends domain events to streams and reports them to listeners
//! once the commit is durable. An [`Event`] wraps the opaque payload with the
//! envelope metadata the host assigned.

use crate::document::Document;
use crate::types::StreamId;
use chrono::{DateTime, Utc};
use std::any::Any;
use std::sync::Arc;
use uuid::Uuid;

/// A domain event as reported by the host
///
/// Events are immutable once committed. Each event includes:
/// - A unique event id
/// - The stream it was appended to and its version within that stream
/// - A global sequence number assigned by the host
/// - A type name for categorization
/// - The opaque payload
#[derive(Debug, Clone)]
pub struct Event {
    /// Unique event id
    pub id: Uuid,
    /// Stream the event belongs to
    pub stream: StreamId,
    /// Version of the stream after this event (1-based)
    pub version: u64,
    /// Global sequence number across all streams
    pub sequence: u64,
    /// Event type name (defaults to the payload's type name)
    pub event_type: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    data: Document,
}

impl Event {
    /// Create an event for a stream with the current time and zeroed
    /// positions; hosts fill in positions with the `with_*` methods.
    ///
    /// # Examples
    ///
    /// ```
    /// use commitwatch_core::Event;
    ///
    /// struct Shipped { order: u32 }
    ///
    /// let event = Event::new("order-1", Shipped { order: 1 }).with_version(3);
    /// assert_eq!(event.event_type, "Shipped");
    /// assert_eq!(event.version, 3);
    /// ```
    pub fn new<T: Any + Send + Sync>(stream: impl Into<StreamId>, data: T) -> Self {
        Self::from_document(stream, Document::new(data))
    }

    /// Create an event around an already wrapped payload
    pub fn from_document(stream: impl Into<StreamId>, data: Document) -> Self {
        Event {
            id: Uuid::new_v4(),
            stream: stream.into(),
            version: 0,
            sequence: 0,
            event_type: short_type_name(data.type_name()).to_string(),
            timestamp: Utc::now(),
            data,
        }
    }

    /// Set the stream version
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Set the global sequence number
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Override the event type name
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    /// Set the commit timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The wrapped payload
    pub fn payload(&self) -> &Document {
        &self.data
    }

    /// Borrow the payload as `T` if it is exactly of that type
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Shared handle to the payload as `T` if it is exactly of that type
    pub fn data_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.data.downcast::<T>()
    }
}

/// Strip module path and generic arguments from a type name
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
