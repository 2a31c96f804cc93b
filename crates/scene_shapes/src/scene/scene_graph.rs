//! Scene graph storage and the dirty/clean protocol

use crate::config::SceneConfig;
use crate::foundation::collections::{GroupId, NodeId, ShapeId, SlotMap};
use crate::foundation::math::{Dim2, Dim3, Dimensions};
use crate::shapes::{AbstractShape, ShapeGroup};

use super::{Node, SceneError};

/// Counters describing a scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Live nodes
    pub node_count: usize,

    /// Live shape features
    pub shape_count: usize,

    /// Live shape groups
    pub group_count: usize,

    /// Nodes cleaned since the scene was created
    pub clean_passes: u64,

    /// Shape caches recomputed since the scene was created
    pub shapes_recomputed: u64,
}

/// Transform hierarchy owning nodes, shape features and shape groups
///
/// Nodes start dirty. A node becomes dirty again whenever its
/// transformation, its parent, an ancestor, or one of its shapes changes,
/// and becomes clean when any of its shapes is read in absolute coordinates.
#[derive(Debug)]
pub struct Scene<D: Dimensions> {
    pub(crate) nodes: SlotMap<NodeId, Node<D>>,
    pub(crate) shapes: SlotMap<ShapeId, Box<dyn AbstractShape<D>>>,
    pub(crate) groups: SlotMap<GroupId, ShapeGroup>,
    clean_passes: u64,
    shapes_recomputed: u64,
}

/// Two-dimensional scene
pub type Scene2D = Scene<Dim2>;

/// Three-dimensional scene
pub type Scene3D = Scene<Dim3>;

impl<D: Dimensions> Default for Scene<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Dimensions> Scene<D> {
    /// Create an empty scene with default capacities
    pub fn new() -> Self {
        Self::with_config(&SceneConfig::default())
    }

    /// Create an empty scene with capacities from configuration
    pub fn with_config(config: &SceneConfig) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(config.node_capacity),
            shapes: SlotMap::with_capacity_and_key(config.shape_capacity),
            groups: SlotMap::with_capacity_and_key(config.group_capacity),
            clean_passes: 0,
            shapes_recomputed: 0,
        }
    }

    /// Current counters
    pub fn stats(&self) -> SceneStats {
        SceneStats {
            node_count: self.nodes.len(),
            shape_count: self.shapes.len(),
            group_count: self.groups.len(),
            clean_passes: self.clean_passes,
            shapes_recomputed: self.shapes_recomputed,
        }
    }

    pub(crate) fn node(&self, node: NodeId) -> Result<&Node<D>, SceneError> {
        self.nodes.get(node).ok_or(SceneError::NodeNotFound(node))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node<D>, SceneError> {
        self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound(node))
    }

    // --- Hierarchy ---

    /// Create a node with identity transformation under `parent`
    ///
    /// The new node is dirty.
    pub fn create_node(&mut self, parent: Option<NodeId>) -> Result<NodeId, SceneError> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }

        let id = self.nodes.insert(Node::new(parent));
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.push(id);
        }

        log::debug!("created node {id:?} under {parent:?}");
        Ok(id)
    }

    /// Destroy a node, its descendants, and every shape attached to them
    pub fn destroy_node(&mut self, node: NodeId) -> Result<(), SceneError> {
        let parent = self.node(node)?.parent;
        if let Some(parent) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            parent.children.retain(|&child| child != node);
        }

        let mut stack = vec![node];
        let mut destroyed = 0usize;
        while let Some(id) = stack.pop() {
            let Some(removed) = self.nodes.remove(id) else {
                continue;
            };
            for shape in removed.shapes {
                self.drop_shape(shape);
            }
            stack.extend(removed.children);
            destroyed += 1;
        }

        log::debug!("destroyed node {node:?} ({destroyed} node(s) in subtree)");
        Ok(())
    }

    /// Check if a node is alive
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Parent of a node
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.node(node)?.parent)
    }

    /// Children of a node, in creation order
    pub fn children(&self, node: NodeId) -> Result<&[NodeId], SceneError> {
        Ok(&self.node(node)?.children)
    }

    /// Move a node under another parent (or make it a root)
    ///
    /// Keeps the relative transformation, so the node's absolute placement
    /// changes and it is marked dirty.
    pub fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        let old_parent = self.node(node)?.parent;

        if let Some(new_parent) = parent {
            let mut ancestor = Some(new_parent);
            while let Some(id) = ancestor {
                if id == node {
                    log::warn!("rejected re-parenting {node:?} under its descendant {new_parent:?}");
                    return Err(SceneError::CyclicParent {
                        node,
                        parent: new_parent,
                    });
                }
                ancestor = self.node(id)?.parent;
            }
        }

        if old_parent == parent {
            return Ok(());
        }

        if let Some(old) = old_parent.and_then(|old| self.nodes.get_mut(old)) {
            old.children.retain(|&child| child != node);
        }
        if let Some(new_parent) = parent {
            self.node_mut(new_parent)?.children.push(node);
        }
        self.node_mut(node)?.parent = parent;

        self.set_dirty(node)
    }

    // --- Transformation ---

    /// Transformation of a node relative to its parent
    pub fn transformation(&self, node: NodeId) -> Result<D::Matrix, SceneError> {
        Ok(self.node(node)?.transformation)
    }

    /// Replace the transformation of a node relative to its parent
    pub fn set_transformation(&mut self, node: NodeId, transformation: D::Matrix) -> Result<(), SceneError> {
        self.node_mut(node)?.transformation = transformation;
        self.set_dirty(node)
    }

    /// Translate a node in its parent's coordinates
    pub fn translate(&mut self, node: NodeId, offset: &D::Vector) -> Result<(), SceneError> {
        let transformation = D::translation(offset) * self.transformation(node)?;
        self.set_transformation(node, transformation)
    }

    /// Absolute transformation of a node, composed from its ancestors
    ///
    /// Always reflects the current hierarchy and never changes dirty state.
    pub fn absolute_transformation_matrix(&self, node: NodeId) -> Result<D::Matrix, SceneError> {
        let current = self.node(node)?;
        let mut matrix = current.transformation;
        let mut ancestor = current.parent;
        while let Some(id) = ancestor {
            let parent = self.node(id)?;
            matrix = parent.transformation * matrix;
            ancestor = parent.parent;
        }
        Ok(matrix)
    }

    // --- Dirty / clean protocol ---

    /// Check if a node is dirty
    pub fn is_dirty(&self, node: NodeId) -> Result<bool, SceneError> {
        Ok(self.node(node)?.dirty)
    }

    /// Mark a node and all its descendants dirty
    pub fn set_dirty(&mut self, node: NodeId) -> Result<(), SceneError> {
        self.node(node)?;

        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(current) = self.nodes.get_mut(id) else {
                continue;
            };
            // A dirty node always has dirty descendants.
            if current.dirty {
                continue;
            }
            current.dirty = true;
            stack.extend(current.children.iter().copied());
        }
        Ok(())
    }

    /// Clean a node, cleaning its dirty ancestors first
    ///
    /// Every shape attached to a cleaned node is recomputed from its local
    /// value and the node's absolute transformation. Does nothing for a
    /// clean node.
    pub fn set_clean(&mut self, node: NodeId) -> Result<(), SceneError> {
        self.node(node)?;
        self.clean_with_ancestors(node);
        Ok(())
    }

    /// Clean every dirty node in the scene
    pub fn clean_all(&mut self) {
        let dirty: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.dirty)
            .map(|(id, _)| id)
            .collect();

        for id in dirty {
            self.clean_with_ancestors(id);
        }
    }

    /// Clean the dirty part of the chain from `node` up to its root, top-down
    fn clean_with_ancestors(&mut self, node: NodeId) {
        let mut dirty_chain = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(entry) = self.nodes.get(id) else {
                break;
            };
            // A clean node always has clean ancestors.
            if !entry.dirty {
                break;
            }
            dirty_chain.push(id);
            current = entry.parent;
        }

        for id in dirty_chain.into_iter().rev() {
            self.clean_node(id);
        }
    }

    /// Clean a single node whose parent is already clean
    fn clean_node(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let absolute = match node.parent.and_then(|parent| self.nodes.get(parent)) {
            Some(parent) => parent.absolute * node.transformation,
            None => node.transformation,
        };

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.absolute = absolute;
        node.dirty = false;

        for &shape_id in &node.shapes {
            if let Some(shape) = self.shapes.get_mut(shape_id) {
                shape.clean(&absolute);
                self.shapes_recomputed += 1;
            }
        }
        self.clean_passes += 1;

        log::trace!("cleaned node {id:?}, recomputed {} shape(s)", node.shapes.len());
    }
}
