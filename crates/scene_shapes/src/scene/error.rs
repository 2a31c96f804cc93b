//! Scene errors

use thiserror::Error;

use crate::foundation::collections::{GroupId, NodeId, ShapeId};
use crate::shapes::ShapeKind;

/// Errors reported by [`Scene`](super::Scene) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The node was destroyed or never belonged to this scene
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),

    /// The shape was removed or never belonged to this scene
    #[error("shape {0:?} not found")]
    ShapeNotFound(ShapeId),

    /// The group was destroyed or never belonged to this scene
    #[error("shape group {0:?} not found")]
    GroupNotFound(GroupId),

    /// A node hosts at most one shape of each type
    #[error("node {node:?} already has a {kind} shape of this type")]
    DuplicateShapeType {
        /// Node that already hosts the shape type
        node: NodeId,
        /// Kind of the rejected shape
        kind: ShapeKind,
    },

    /// Re-parenting would make a node its own ancestor
    #[error("cannot parent node {node:?} under its descendant {parent:?}")]
    CyclicParent {
        /// Node being re-parented
        node: NodeId,
        /// Requested parent
        parent: NodeId,
    },
}
