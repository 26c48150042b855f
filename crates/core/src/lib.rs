//! Core types for commitwatch
//!
//! This crate defines the contract between a document store and the
//! listeners attached to its sessions:
//! - [`SessionListener`]: callbacks the host drives from its commit pipeline
//! - [`ChangeSet`]: what a commit changed
//! - [`Event`] and [`Document`]: type-erased values carried by a commit
//! - [`Error`]: the error type shared by the workspace

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod change_set;
pub mod document;
pub mod error;
pub mod event;
pub mod listener;
pub mod types;

pub use change_set::ChangeSet;
pub use document::{Document, Identified};
pub use error::{Error, Result};
pub use event::Event;
pub use listener::{ListenerChain, SessionListener};
pub use types::{SessionId, SessionInfo, StreamId};
