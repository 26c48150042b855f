//! Identifier types shared across the callback contract
//!
//! This module defines the identifiers the host attaches to commits:
//! - [`SessionId`]: Unique identifier for a document session
//! - [`StreamId`]: Identifier of the event stream an event belongs to
//! - [`SessionInfo`]: The session that produced a commit

use uuid::Uuid;

/// Unique identifier for a document session
///
/// A session is the unit of work the host commits. Several sessions may
/// share one listener, so the id is carried on every commit notification
/// for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random SessionId using UUID v4
    ///
    /// # Examples
    ///
    /// ```
    /// use commitwatch_core::SessionId;
    ///
    /// let id1 = SessionId::new();
    /// let id2 = SessionId::new();
    /// assert_ne!(id1, id2);
    /// ```
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }

    /// Wrap an existing UUID issued by the host
    pub fn from_uuid(uuid: Uuid) -> Self {
        SessionId(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an event stream
///
/// Hosts key streams either by UUID or by a string key; both are kept as
/// given and only ever displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StreamId {
    /// Stream keyed by UUID
    Guid(Uuid),
    /// Stream keyed by an arbitrary string
    Key(String),
}

impl From<Uuid> for StreamId {
    fn from(id: Uuid) -> Self {
        StreamId::Guid(id)
    }
}

impl From<&str> for StreamId {
    fn from(key: &str) -> Self {
        StreamId::Key(key.to_string())
    }
}

impl From<String> for StreamId {
    fn from(key: String) -> Self {
        StreamId::Key(key)
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamId::Guid(id) => write!(f, "{}", id),
            StreamId::Key(key) => f.write_str(key),
        }
    }
}

/// The session that produced a commit
///
/// Passed to every [`SessionListener`](crate::SessionListener) callback.
/// Listeners only use it for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Session identifier
    pub id: SessionId,
    /// Tenant the session is bound to
    pub tenant: String,
}

impl SessionInfo {
    /// Tenant used when the host does not partition by tenant
    pub const DEFAULT_TENANT: &'static str = "*DEFAULT*";

    /// Create session info for a tenant
    pub fn new(tenant: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            tenant: tenant.into(),
        }
    }
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TENANT)
    }
}

impl std::fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.tenant)
    }
}
