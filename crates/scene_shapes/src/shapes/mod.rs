//! Collision shapes attached to scene nodes
//!
//! A shape feature keeps the shape exactly as the caller set it (relative to
//! its node) next to a cached copy in absolute coordinates. The cache is
//! refreshed lazily: setting a shape or moving a node marks the node dirty,
//! and the next read of the transformed shape cleans the node.
//!
//! # Module Organization
//!
//! - [`primitives`] - Points, segments, spheres and boxes
//! - [`composition`] - Aggregate shape made of independently placed primitives
//! - [`strategy`] - How each shape type assigns and recomputes its cache
//! - [`feature`] - Shape features and the type-erased [`AbstractShape`] view
//! - [`group`] - Shape groups queried for collisions
//! - [`collision`] - Pairwise intersection dispatch over [`ShapeRef`]
//!
//! # Example
//!
//! ```
//! use scene_shapes::prelude::*;
//!
//! let mut scene = Scene3D::new();
//! let group = scene.create_group();
//! let node = scene.create_node(None).unwrap();
//!
//! let sphere = scene
//!     .add_shape(node, Sphere::new(Vec3::zeros(), 0.75), Some(group))
//!     .unwrap();
//!
//! scene.translate(node, &Vec3::new(1.0, 2.0, 3.0)).unwrap();
//! let transformed = scene.transformed_shape(sphere).unwrap();
//! assert_eq!(transformed.position, Vec3::new(1.0, 2.0, 3.0));
//! ```

use std::fmt;

use crate::foundation::math::{DimensionTag, Dimensions};

pub mod collision;
pub mod composition;
pub mod feature;
pub mod group;
pub mod primitives;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use composition::{Composition, CompositionPart};
pub use feature::{AbstractShape, ShapeFeature};
pub use group::ShapeGroup;
pub use primitives::{AxisAlignedBox, LineSegment, Point, Primitive, Sphere};
pub use strategy::{CompositionTransform, DirectTransform, TransformStrategy};

/// Kinds of shapes known to the collision dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// [`Point`]
    Point,
    /// [`LineSegment`]
    LineSegment,
    /// [`Sphere`]
    Sphere,
    /// [`AxisAlignedBox`]
    AxisAlignedBox,
    /// [`Composition`]
    Composition,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::LineSegment => "line segment",
            Self::Sphere => "sphere",
            Self::AxisAlignedBox => "axis-aligned box",
            Self::Composition => "composition",
        };
        f.write_str(name)
    }
}

/// Borrowed, type-erased view of a shape
///
/// This is what collision code sees when it only holds a
/// [`ShapeId`](crate::foundation::collections::ShapeId).
#[derive(Debug)]
pub enum ShapeRef<'a, D: Dimensions> {
    /// A point
    Point(&'a Point<D>),
    /// A line segment
    LineSegment(&'a LineSegment<D>),
    /// A sphere
    Sphere(&'a Sphere<D>),
    /// An axis-aligned box
    AxisAlignedBox(&'a AxisAlignedBox<D>),
    /// A composition of placed primitives
    Composition(&'a Composition<D>),
}

// Manual impls: the derives would require `D: Clone` for a shared borrow.
impl<D: Dimensions> Clone for ShapeRef<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Dimensions> Copy for ShapeRef<'_, D> {}

impl<D: Dimensions> ShapeRef<'_, D> {
    /// Kind of the viewed shape
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::LineSegment(_) => ShapeKind::LineSegment,
            Self::Sphere(_) => ShapeKind::Sphere,
            Self::AxisAlignedBox(_) => ShapeKind::AxisAlignedBox,
            Self::Composition(_) => ShapeKind::Composition,
        }
    }

    /// Dimensionality of the viewed shape
    pub const fn dimensions(&self) -> DimensionTag {
        D::TAG
    }

    /// Check if this shape collides with another one
    pub fn collides(&self, other: &ShapeRef<'_, D>) -> bool {
        collision::collides(*self, *other)
    }
}

/// Shape type that can be attached to a scene node
///
/// `transformed` must be pure and defined for every matrix. `Default` is the
/// value a feature holds before any shape is set.
pub trait Shape<D: Dimensions>: Clone + fmt::Debug + Default + 'static {
    /// Kind reported through [`ShapeRef`]
    const KIND: ShapeKind;

    /// How a feature assigns and recomputes values of this type
    type Strategy: TransformStrategy<D, Self>;

    /// Copy of this shape in the space described by `matrix`
    fn transformed(&self, matrix: &D::Matrix) -> Self;

    /// Borrowed, type-erased view of this shape
    fn as_shape_ref(&self) -> ShapeRef<'_, D>;
}
