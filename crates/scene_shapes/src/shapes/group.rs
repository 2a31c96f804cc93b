//! Shape groups
//!
//! A [`ShapeGroup`] is a set of shapes that can collide with each other. It
//! only stores shape ids; the shapes stay owned by their nodes. Groups can be
//! rearranged at any time with [`Scene::add_to_group`] and
//! [`Scene::remove_from_group`], for example to maintain collision islands.

use crate::foundation::collections::{GroupId, ShapeId};
use crate::foundation::math::Dimensions;
use crate::scene::{Scene, SceneError};

use super::collision;

/// Set of shapes taking part in the same collision queries
#[derive(Debug, Clone, Default)]
pub struct ShapeGroup {
    shapes: Vec<ShapeId>,
}

impl ShapeGroup {
    /// Shapes in the group
    pub fn shapes(&self) -> &[ShapeId] {
        &self.shapes
    }

    /// Number of shapes in the group
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the group has no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Check if a shape is in the group
    pub fn contains(&self, shape: ShapeId) -> bool {
        self.shapes.contains(&shape)
    }

    fn insert(&mut self, shape: ShapeId) {
        if !self.contains(shape) {
            self.shapes.push(shape);
        }
    }

    pub(crate) fn remove(&mut self, shape: ShapeId) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|&id| id != shape);
        self.shapes.len() != before
    }
}

impl<D: Dimensions> Scene<D> {
    fn group(&self, group: GroupId) -> Result<&ShapeGroup, SceneError> {
        self.groups.get(group).ok_or(SceneError::GroupNotFound(group))
    }

    /// Create an empty shape group
    pub fn create_group(&mut self) -> GroupId {
        let id = self.groups.insert(ShapeGroup::default());
        log::debug!("created shape group {id:?}");
        id
    }

    /// Destroy a group; its shapes stay attached to their nodes without a group
    pub fn destroy_group(&mut self, group: GroupId) -> Result<(), SceneError> {
        let removed = self.groups.remove(group).ok_or(SceneError::GroupNotFound(group))?;
        for &shape in removed.shapes() {
            if let Some(feature) = self.shapes.get_mut(shape) {
                feature.set_group(None);
            }
        }
        log::debug!("destroyed shape group {group:?} with {} shape(s)", removed.len());
        Ok(())
    }

    /// Add a shape to a group
    ///
    /// A shape belongs to at most one group, so it leaves its previous group.
    /// Neither the shape nor its cached absolute shape is touched.
    pub fn add_to_group(&mut self, group: GroupId, shape: impl Into<ShapeId>) -> Result<(), SceneError> {
        let shape = shape.into();
        self.group(group)?;
        let previous = self.abstract_shape(shape)?.group();

        if previous == Some(group) {
            return Ok(());
        }
        if let Some(previous) = previous.and_then(|previous| self.groups.get_mut(previous)) {
            previous.remove(shape);
        }
        if let Some(target) = self.groups.get_mut(group) {
            target.insert(shape);
        }
        if let Some(feature) = self.shapes.get_mut(shape) {
            feature.set_group(Some(group));
        }
        Ok(())
    }

    /// Remove a shape from a group
    ///
    /// Does nothing if the shape is not in the group.
    pub fn remove_from_group(&mut self, group: GroupId, shape: impl Into<ShapeId>) -> Result<(), SceneError> {
        let shape = shape.into();
        let removed = self
            .groups
            .get_mut(group)
            .ok_or(SceneError::GroupNotFound(group))?
            .remove(shape);

        if removed {
            if let Some(feature) = self.shapes.get_mut(shape) {
                feature.set_group(None);
            }
        }
        Ok(())
    }

    /// Shapes in a group
    pub fn group_shapes(&self, group: GroupId) -> Result<&[ShapeId], SceneError> {
        Ok(self.group(group)?.shapes())
    }

    /// Number of shapes in a group
    pub fn group_len(&self, group: GroupId) -> Result<usize, SceneError> {
        Ok(self.group(group)?.len())
    }

    /// Check if any shape in a group needs cleaning
    pub fn is_group_dirty(&self, group: GroupId) -> Result<bool, SceneError> {
        let group = self.group(group)?;
        Ok(group
            .shapes()
            .iter()
            .filter_map(|&shape| self.shapes.get(shape))
            .any(|feature| self.nodes.get(feature.node()).is_some_and(|node| node.dirty)))
    }

    /// Clean every shape in a group
    pub fn clean_group(&mut self, group: GroupId) -> Result<(), SceneError> {
        let shapes = self.group(group)?.shapes().to_vec();
        for shape in shapes {
            self.clean_shape(shape)?;
        }
        Ok(())
    }

    /// First shape in the group colliding with `shape`
    ///
    /// Cleans `shape` and the whole group before testing. `shape` itself is
    /// skipped, so it may or may not be a member of the group.
    pub fn first_collision(&mut self, group: GroupId, shape: impl Into<ShapeId>) -> Result<Option<ShapeId>, SceneError> {
        let shape = shape.into();
        self.clean_shape(shape)?;
        self.clean_group(group)?;

        let query = self.abstract_shape(shape)?.abstract_transformed_shape();
        let hit = self
            .group(group)?
            .shapes()
            .iter()
            .copied()
            .filter(|&other| other != shape)
            .find(|&other| {
                self.shapes
                    .get(other)
                    .is_some_and(|feature| collision::collides(query, feature.abstract_transformed_shape()))
            });

        if let Some(other) = hit {
            log::trace!("shape {shape:?} collides with {other:?}");
        }
        Ok(hit)
    }
}
