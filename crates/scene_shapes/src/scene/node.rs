//! Scene node storage

use crate::foundation::collections::{NodeId, ShapeId};
use crate::foundation::math::Dimensions;

/// A node of the transform hierarchy
#[derive(Debug, Clone)]
pub(crate) struct Node<D: Dimensions> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Transformation relative to the parent
    pub(crate) transformation: D::Matrix,
    /// Valid only while the node is clean
    pub(crate) absolute: D::Matrix,
    pub(crate) dirty: bool,
    /// Attached shape features, in attachment order
    pub(crate) shapes: Vec<ShapeId>,
}

impl<D: Dimensions> Node<D> {
    pub(crate) fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            transformation: D::identity(),
            absolute: D::identity(),
            dirty: true,
            shapes: Vec::new(),
        }
    }
}
