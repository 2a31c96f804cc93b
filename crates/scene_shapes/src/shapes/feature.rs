//! Shape features attached to scene nodes
//!
//! A [`ShapeFeature`] stores the shape as set by the caller and a cached copy
//! in absolute coordinates. The cache is only ever written by the owning
//! node's clean pass, through the shape type's
//! [`TransformStrategy`](super::TransformStrategy).
//!
//! Code that does not know the concrete shape type works through
//! [`AbstractShape`] and the `ShapeId` based methods on [`Scene`].

use std::any::Any;
use std::fmt;

use crate::foundation::collections::{GroupId, NodeId, ShapeHandle, ShapeId};
use crate::foundation::math::{DimensionTag, Dimensions};
use crate::scene::{Scene, SceneError};

use super::strategy::TransformStrategy;
use super::{Shape, ShapeKind, ShapeRef};

pub(crate) mod sealed {
    use crate::foundation::collections::GroupId;
    use crate::foundation::math::Dimensions;

    /// Cache and membership updates reserved for the scene
    pub trait CacheMaintenance<D: Dimensions> {
        /// Recompute the cached absolute shape
        fn clean(&mut self, absolute_transformation_matrix: &D::Matrix);

        /// Record group membership
        fn set_group(&mut self, group: Option<GroupId>);
    }
}

use sealed::CacheMaintenance;

/// Type-erased view of a shape feature
///
/// Every [`ShapeFeature`] implements this, which lets shape groups hold
/// shapes of unrelated types side by side. The trait is sealed: the cache is
/// only recomputed by the owning node's clean pass, and membership only
/// changes through the scene's group operations.
///
/// ```compile_fail
/// use scene_shapes::prelude::*;
///
/// let mut scene = Scene3D::new();
/// let node = scene.create_node(None).unwrap();
/// let sphere = scene.add_shape(node, Sphere::new(Vec3::zeros(), 1.0), None).unwrap();
///
/// let mut feature = scene.shape_feature(sphere).unwrap().clone();
/// feature.clean(&Dim3::translation(&Vec3::new(1.0, 0.0, 0.0)));
/// ```
pub trait AbstractShape<D: Dimensions>: fmt::Debug + CacheMaintenance<D> {
    /// Node the shape is attached to
    fn node(&self) -> NodeId;

    /// Group the shape belongs to, if any
    fn group(&self) -> Option<GroupId>;

    /// Kind of the shape
    fn kind(&self) -> ShapeKind;

    /// Dimensionality of the shape
    fn dimensions(&self) -> DimensionTag {
        D::TAG
    }

    /// Cached absolute shape
    ///
    /// Only valid while the owning node is clean; go through
    /// [`Scene::abstract_transformed_shape`] to have it cleaned first.
    fn abstract_transformed_shape(&self) -> ShapeRef<'_, D>;

    /// Downcasting support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcasting support
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A shape of type `T` attached to a scene node
#[derive(Debug, Clone)]
pub struct ShapeFeature<D: Dimensions, T: Shape<D>> {
    node: NodeId,
    group: Option<GroupId>,
    shape: T,
    transformed_shape: T,
    _dimensions: std::marker::PhantomData<D>,
}

impl<D: Dimensions, T: Shape<D>> ShapeFeature<D, T> {
    fn new(node: NodeId, shape: T) -> Self {
        let mut feature = Self {
            node,
            group: None,
            shape: T::default(),
            transformed_shape: T::default(),
            _dimensions: std::marker::PhantomData,
        };
        feature.assign(shape);
        feature
    }

    fn assign(&mut self, shape: T) {
        <T::Strategy as TransformStrategy<D, T>>::assign(&mut self.shape, &mut self.transformed_shape, shape);
    }

    /// Shape relative to the node, exactly as last set
    pub const fn shape(&self) -> &T {
        &self.shape
    }

    /// Cached absolute shape, without cleaning
    pub const fn cached_shape(&self) -> &T {
        &self.transformed_shape
    }
}

impl<D: Dimensions, T: Shape<D>> AbstractShape<D> for ShapeFeature<D, T> {
    fn node(&self) -> NodeId {
        self.node
    }

    fn group(&self) -> Option<GroupId> {
        self.group
    }

    fn kind(&self) -> ShapeKind {
        T::KIND
    }

    fn abstract_transformed_shape(&self) -> ShapeRef<'_, D> {
        self.transformed_shape.as_shape_ref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<D: Dimensions, T: Shape<D>> CacheMaintenance<D> for ShapeFeature<D, T> {
    fn clean(&mut self, absolute_transformation_matrix: &D::Matrix) {
        <T::Strategy as TransformStrategy<D, T>>::recompute(
            &self.shape,
            absolute_transformation_matrix,
            &mut self.transformed_shape,
        );
    }

    fn set_group(&mut self, group: Option<GroupId>) {
        self.group = group;
    }
}

impl<D: Dimensions> Scene<D> {
    fn feature<T: Shape<D>>(&self, handle: ShapeHandle<T>) -> Result<&ShapeFeature<D, T>, SceneError> {
        self.shapes
            .get(handle.id())
            .and_then(|shape| shape.as_any().downcast_ref::<ShapeFeature<D, T>>())
            .ok_or(SceneError::ShapeNotFound(handle.id()))
    }

    fn feature_mut<T: Shape<D>>(&mut self, handle: ShapeHandle<T>) -> Result<&mut ShapeFeature<D, T>, SceneError> {
        self.shapes
            .get_mut(handle.id())
            .and_then(|shape| shape.as_any_mut().downcast_mut::<ShapeFeature<D, T>>())
            .ok_or(SceneError::ShapeNotFound(handle.id()))
    }

    /// Attach a shape to a node, optionally adding it to a group
    ///
    /// A node hosts at most one shape of each type. The node is marked dirty
    /// so the first read computes the absolute shape.
    pub fn add_shape<T: Shape<D>>(
        &mut self,
        node: NodeId,
        shape: T,
        group: Option<GroupId>,
    ) -> Result<ShapeHandle<T>, SceneError> {
        let hosted = &self.node(node)?.shapes;
        if let Some(group) = group {
            if !self.groups.contains_key(group) {
                return Err(SceneError::GroupNotFound(group));
            }
        }
        let duplicate = hosted
            .iter()
            .filter_map(|&id| self.shapes.get(id))
            .any(|existing| existing.as_any().is::<ShapeFeature<D, T>>());
        if duplicate {
            log::warn!("node {node:?} already hosts a {} of this type", T::KIND);
            return Err(SceneError::DuplicateShapeType { node, kind: T::KIND });
        }

        let id = self.shapes.insert(Box::new(ShapeFeature::new(node, shape)));
        if let Some(node) = self.nodes.get_mut(node) {
            node.shapes.push(id);
        }
        if let Some(group) = group {
            self.add_to_group(group, id)?;
        }
        self.set_dirty(node)?;

        log::debug!("attached {} {id:?} to node {node:?}", T::KIND);
        Ok(ShapeHandle::new(id))
    }

    /// Attach a shape holding `T::default()` to a node
    pub fn add_default_shape<T: Shape<D>>(
        &mut self,
        node: NodeId,
        group: Option<GroupId>,
    ) -> Result<ShapeHandle<T>, SceneError> {
        self.add_shape(node, T::default(), group)
    }

    /// Shape relative to its node, exactly as last set
    ///
    /// Never cleans and never reflects node movement.
    pub fn shape<T: Shape<D>>(&self, handle: ShapeHandle<T>) -> Result<&T, SceneError> {
        Ok(self.feature(handle)?.shape())
    }

    /// Replace a shape and mark its node dirty
    ///
    /// Returns the scene for method chaining.
    pub fn set_shape<T: Shape<D>>(&mut self, handle: ShapeHandle<T>, shape: T) -> Result<&mut Self, SceneError> {
        let feature = self.feature_mut(handle)?;
        feature.assign(shape);
        let node = feature.node;
        self.set_dirty(node)?;
        Ok(self)
    }

    /// Shape in absolute coordinates
    ///
    /// Cleans the owning node first if it is dirty; on a clean node this is a
    /// plain read.
    pub fn transformed_shape<T: Shape<D>>(&mut self, handle: ShapeHandle<T>) -> Result<&T, SceneError> {
        let node = self.feature(handle)?.node;
        self.set_clean(node)?;
        Ok(self.feature(handle)?.cached_shape())
    }

    /// Typed shape feature behind a handle
    pub fn shape_feature<T: Shape<D>>(&self, handle: ShapeHandle<T>) -> Result<&ShapeFeature<D, T>, SceneError> {
        self.feature(handle)
    }

    /// Detach and drop a shape
    pub fn remove_shape(&mut self, shape: impl Into<ShapeId>) -> Result<(), SceneError> {
        let shape = shape.into();
        let node = self.abstract_shape(shape)?.node();
        if let Some(node) = self.nodes.get_mut(node) {
            node.shapes.retain(|&id| id != shape);
        }
        self.drop_shape(shape);
        Ok(())
    }

    /// Remove a shape from its group and the arena, leaving its node alone
    pub(crate) fn drop_shape(&mut self, shape: ShapeId) {
        let Some(removed) = self.shapes.remove(shape) else {
            return;
        };
        if let Some(group) = removed.group().and_then(|group| self.groups.get_mut(group)) {
            group.remove(shape);
        }
        log::debug!("removed {} {shape:?}", removed.kind());
    }

    /// Shapes attached to a node, in attachment order
    pub fn shapes_of(&self, node: NodeId) -> Result<&[ShapeId], SceneError> {
        Ok(&self.node(node)?.shapes)
    }

    /// Check if a shape is alive
    pub fn contains_shape(&self, shape: impl Into<ShapeId>) -> bool {
        self.shapes.contains_key(shape.into())
    }

    // --- Type-erased access ---

    /// Type-erased shape feature, without cleaning
    pub fn abstract_shape(&self, shape: impl Into<ShapeId>) -> Result<&dyn AbstractShape<D>, SceneError> {
        let shape = shape.into();
        self.shapes
            .get(shape)
            .map(|feature| &**feature)
            .ok_or(SceneError::ShapeNotFound(shape))
    }

    /// Check if the node owning a shape is dirty
    pub fn is_shape_dirty(&self, shape: impl Into<ShapeId>) -> Result<bool, SceneError> {
        let node = self.abstract_shape(shape)?.node();
        self.is_dirty(node)
    }

    /// Clean the node owning a shape
    pub fn clean_shape(&mut self, shape: impl Into<ShapeId>) -> Result<(), SceneError> {
        let node = self.abstract_shape(shape)?.node();
        self.set_clean(node)
    }

    /// Type-erased shape in absolute coordinates, cleaning its node first
    pub fn abstract_transformed_shape(&mut self, shape: impl Into<ShapeId>) -> Result<ShapeRef<'_, D>, SceneError> {
        let shape = shape.into();
        self.clean_shape(shape)?;
        Ok(self.abstract_shape(shape)?.abstract_transformed_shape())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Dim3, Vec3};
    use crate::scene::Scene3D;
    use crate::shapes::{Point, Sphere};
    use approx::assert_relative_eq;

    #[test]
    fn test_set_shape_marks_node_dirty() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        let sphere = scene.add_default_shape::<Sphere<Dim3>>(node, None).unwrap();
        scene.transformed_shape(sphere).unwrap();
        assert!(!scene.is_dirty(node).unwrap());

        scene.set_shape(sphere, Sphere::new(Vec3::zeros(), 2.0)).unwrap();

        assert!(scene.is_dirty(node).unwrap());
        assert!(scene.is_shape_dirty(sphere).unwrap());
    }

    #[test]
    fn test_set_shape_chains() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        let sphere = scene.add_default_shape::<Sphere<Dim3>>(node, None).unwrap();
        let point = scene.add_default_shape::<Point<Dim3>>(node, None).unwrap();

        scene
            .set_shape(sphere, Sphere::new(Vec3::zeros(), 1.0))
            .unwrap()
            .set_shape(point, Point::new(Vec3::new(0.0, 1.0, 0.0)))
            .unwrap();

        assert_eq!(scene.shape(sphere).unwrap().radius, 1.0);
        assert_eq!(scene.shape(point).unwrap().position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_unset_shape_reads_transformed_default() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        scene.translate(node, &Vec3::new(4.0, 0.0, 0.0)).unwrap();
        let point = scene.add_default_shape::<Point<Dim3>>(node, None).unwrap();

        assert_relative_eq!(scene.transformed_shape(point).unwrap().position, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_duplicate_shape_type_is_rejected() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        scene.add_default_shape::<Sphere<Dim3>>(node, None).unwrap();

        let result = scene.add_default_shape::<Sphere<Dim3>>(node, None);
        assert_eq!(
            result.unwrap_err(),
            SceneError::DuplicateShapeType {
                node,
                kind: ShapeKind::Sphere
            }
        );
        assert_eq!(scene.shapes_of(node).unwrap().len(), 1);
    }

    #[test]
    fn test_abstract_view_reports_kind_and_dimensions() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        let sphere = scene.add_shape(node, Sphere::new(Vec3::zeros(), 0.5), None).unwrap();

        let view = scene.abstract_transformed_shape(sphere).unwrap();
        assert_eq!(view.kind(), ShapeKind::Sphere);
        assert_eq!(view.dimensions(), DimensionTag::Three);

        let shape = scene.abstract_shape(sphere).unwrap();
        assert_eq!(shape.node(), node);
        assert_eq!(shape.group(), None);
        assert_eq!(shape.dimensions(), DimensionTag::Three);
    }

    #[test]
    fn test_abstract_read_cleans_and_follows_node() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        let sphere = scene.add_shape(node, Sphere::new(Vec3::zeros(), 0.5), None).unwrap();
        scene.abstract_transformed_shape(sphere).unwrap();

        scene.translate(node, &Vec3::new(0.0, -4.0, 1.0)).unwrap();
        assert!(scene.is_shape_dirty(sphere).unwrap());

        match scene.abstract_transformed_shape(sphere).unwrap() {
            ShapeRef::Sphere(moved) => {
                assert_eq!(moved.position, Vec3::new(0.0, -4.0, 1.0));
                assert_eq!(moved.radius, 0.5);
            }
            other => panic!("unexpected shape {other:?}"),
        }
        assert!(!scene.is_shape_dirty(sphere).unwrap());
    }

    #[test]
    fn test_remove_shape_detaches_from_node() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        let sphere = scene.add_default_shape::<Sphere<Dim3>>(node, None).unwrap();

        scene.remove_shape(sphere).unwrap();

        assert!(!scene.contains_shape(sphere));
        assert!(scene.shapes_of(node).unwrap().is_empty());
        assert_eq!(scene.shape(sphere).unwrap_err(), SceneError::ShapeNotFound(sphere.id()));
        // The type can be attached again once the old one is gone
        assert!(scene.add_default_shape::<Sphere<Dim3>>(node, None).is_ok());
    }

    #[test]
    fn test_missing_node_and_group_are_reported() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        let group = scene.create_group();
        scene.destroy_group(group).unwrap();

        let result = scene.add_default_shape::<Sphere<Dim3>>(node, Some(group));
        assert_eq!(result.unwrap_err(), SceneError::GroupNotFound(group));

        scene.destroy_node(node).unwrap();
        let result = scene.add_default_shape::<Sphere<Dim3>>(node, None);
        assert_eq!(result.unwrap_err(), SceneError::NodeNotFound(node));
    }
}
