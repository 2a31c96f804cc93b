//! Handle types for the scene arenas

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Versioned handle of a node in a [`Scene`](crate::scene::Scene)
    pub struct NodeId;

    /// Versioned handle of a shape feature, regardless of its shape type
    pub struct ShapeId;

    /// Versioned handle of a [`ShapeGroup`](crate::shapes::ShapeGroup)
    pub struct GroupId;
}

/// Typed handle for a shape feature holding a `T`
///
/// Converts into the untyped [`ShapeId`] for group membership and other
/// type-erased operations.
pub struct ShapeHandle<T> {
    id: ShapeId,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> ShapeHandle<T> {
    /// Create a new typed handle from an untyped id
    pub(crate) fn new(id: ShapeId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying untyped id
    pub fn id(&self) -> ShapeId {
        self.id
    }
}

// Manual impls: deriving would put bounds on `T`.
impl<T> Clone for ShapeHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ShapeHandle<T> {}

impl<T> PartialEq for ShapeHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ShapeHandle<T> {}

impl<T> Hash for ShapeHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for ShapeHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapeHandle").field(&self.id).finish()
    }
}

impl<T> From<ShapeHandle<T>> for ShapeId {
    fn from(handle: ShapeHandle<T>) -> Self {
        handle.id
    }
}
