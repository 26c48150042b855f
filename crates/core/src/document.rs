//! Type-erased documents carried by a commit
//!
//! The host hands listeners whatever document values a commit touched.
//! A [`Document`] keeps the value behind an `Arc<dyn Any>` together with the
//! concrete `TypeId` captured at construction, so consumers can filter by
//! exact runtime type without knowing every document type up front.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Capability for documents that can describe their own identity
///
/// Used only for diagnostics. Documents built through
/// [`Document::identified`] record this identity; others carry none and
/// log output simply omits it.
pub trait Identified {
    /// Human-readable identity of the document (usually its id field)
    fn identity(&self) -> String;
}

/// A document value observed in a commit
///
/// Cloning is cheap: the value itself is shared.
#[derive(Clone)]
pub struct Document {
    value: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
    identity: Option<String>,
}

impl Document {
    /// Wrap a document value
    ///
    /// # Examples
    ///
    /// ```
    /// use commitwatch_core::Document;
    ///
    /// let doc = Document::new(42u32);
    /// assert!(doc.is::<u32>());
    /// assert!(!doc.is::<u64>());
    /// ```
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an already shared document value
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Document {
            value,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            identity: None,
        }
    }

    /// Wrap a document value and record its identity for diagnostics
    pub fn identified<T: Identified + Any + Send + Sync>(value: T) -> Self {
        let identity = value.identity();
        let mut doc = Self::new(value);
        doc.identity = Some(identity);
        doc
    }

    /// Runtime type of the wrapped value
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Identity recorded at construction, if the value is [`Identified`]
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Check whether the wrapped value is exactly of type `T`
    ///
    /// No structural or wrapper matching: a `Document` holding `Box<T>`
    /// or `Arc<T>` is not a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrow the value as `T` if it is exactly of that type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        if !self.is::<T>() {
            return None;
        }
        (*self.value).downcast_ref::<T>()
    }

    /// Get a shared handle to the value as `T` if it is exactly of that type
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        if !self.is::<T>() {
            return None;
        }
        Arc::clone(&self.value).downcast::<T>().ok()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("type_name", &self.type_name)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
