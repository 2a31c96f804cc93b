//! Primitive collision shapes
//!
//! Points, line segments, spheres and axis-aligned boxes, generic over
//! [`Dimensions`]. Each primitive knows how to transform itself by a
//! homogeneous matrix; intersection tests live in
//! [`collision`](super::collision).

use crate::foundation::math::Dimensions;

use super::strategy::DirectTransform;
use super::{Shape, ShapeKind, ShapeRef};

/// A single point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<D: Dimensions> {
    /// Position of the point
    pub position: D::Vector,
}

impl<D: Dimensions> Point<D> {
    /// Create a point at the given position
    pub const fn new(position: D::Vector) -> Self {
        Self { position }
    }

    /// Point moved by the given transformation
    pub fn transformed(&self, matrix: &D::Matrix) -> Self {
        Self::new(D::transform_point(matrix, &self.position))
    }
}

impl<D: Dimensions> Default for Point<D> {
    fn default() -> Self {
        Self::new(D::zero())
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment<D: Dimensions> {
    /// First end point
    pub a: D::Vector,
    /// Second end point
    pub b: D::Vector,
}

impl<D: Dimensions> LineSegment<D> {
    /// Create a segment from its two end points
    pub const fn new(a: D::Vector, b: D::Vector) -> Self {
        Self { a, b }
    }

    /// Segment with both end points transformed
    pub fn transformed(&self, matrix: &D::Matrix) -> Self {
        Self::new(D::transform_point(matrix, &self.a), D::transform_point(matrix, &self.b))
    }

    /// Point on the segment closest to `point`
    pub fn closest_point(&self, point: &D::Vector) -> D::Vector {
        let direction = self.b - self.a;
        let length_squared = D::length_squared(&direction);
        if length_squared <= f32::EPSILON {
            return self.a;
        }

        let t = (D::dot(&(*point - self.a), &direction) / length_squared).clamp(0.0, 1.0);
        self.a + direction * t
    }
}

impl<D: Dimensions> Default for LineSegment<D> {
    fn default() -> Self {
        Self::new(D::zero(), D::zero())
    }
}

/// A sphere (a circle in 2D)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere<D: Dimensions> {
    /// Center of the sphere
    pub position: D::Vector,
    /// Radius of the sphere
    pub radius: f32,
}

impl<D: Dimensions> Sphere<D> {
    /// Create a sphere with the given center and radius
    pub const fn new(position: D::Vector, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Sphere with transformed center and scaled radius
    ///
    /// The radius is scaled by [`Dimensions::uniform_scaling`], so the result
    /// is exact only for uniform scaling.
    pub fn transformed(&self, matrix: &D::Matrix) -> Self {
        Self::new(
            D::transform_point(matrix, &self.position),
            self.radius * D::uniform_scaling(matrix),
        )
    }

    /// Check if the sphere contains a point (boundary included)
    pub fn contains_point(&self, point: &D::Vector) -> bool {
        D::length_squared(&(*point - self.position)) <= self.radius * self.radius
    }

    /// Check if this sphere intersects another
    pub fn intersects_sphere(&self, other: &Self) -> bool {
        let radius_sum = self.radius + other.radius;
        D::length_squared(&(other.position - self.position)) <= radius_sum * radius_sum
    }

    /// Check if this sphere touches a line segment
    pub fn intersects_segment(&self, segment: &LineSegment<D>) -> bool {
        self.contains_point(&segment.closest_point(&self.position))
    }

    /// Check if this sphere intersects an axis-aligned box
    pub fn intersects_box(&self, aabb: &AxisAlignedBox<D>) -> bool {
        self.contains_point(&aabb.closest_point(&self.position))
    }
}

impl<D: Dimensions> Default for Sphere<D> {
    fn default() -> Self {
        Self::new(D::zero(), 0.0)
    }
}

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAlignedBox<D: Dimensions> {
    /// Minimal corner
    pub min: D::Vector,
    /// Maximal corner
    pub max: D::Vector,
}

impl<D: Dimensions> AxisAlignedBox<D> {
    /// Create a box from two opposite corners, in any order
    pub fn new(a: D::Vector, b: D::Vector) -> Self {
        Self {
            min: D::component_min(&a, &b),
            max: D::component_max(&a, &b),
        }
    }

    /// Box with both corners transformed and re-sorted per axis
    ///
    /// Rotations other than multiples of 90 degrees are not representable by
    /// an axis-aligned box; only the two stored corners are transformed.
    pub fn transformed(&self, matrix: &D::Matrix) -> Self {
        Self::new(D::transform_point(matrix, &self.min), D::transform_point(matrix, &self.max))
    }

    /// Center of the box
    pub fn center(&self) -> D::Vector {
        (self.min + self.max) * 0.5
    }

    /// Point inside the box closest to `point`
    pub fn closest_point(&self, point: &D::Vector) -> D::Vector {
        D::component_min(&D::component_max(point, &self.min), &self.max)
    }

    /// Check if the box contains a point (boundary included)
    pub fn contains_point(&self, point: &D::Vector) -> bool {
        self.closest_point(point) == *point
    }

    /// Check if this box overlaps another
    pub fn intersects_box(&self, other: &Self) -> bool {
        // Overlap on every axis iff the clamped intervals are non-empty.
        let low = D::component_max(&self.min, &other.min);
        let high = D::component_min(&self.max, &other.max);
        D::component_min(&low, &high) == low
    }
}

impl<D: Dimensions> Default for AxisAlignedBox<D> {
    fn default() -> Self {
        Self {
            min: D::zero(),
            max: D::zero(),
        }
    }
}

/// Any primitive shape, used as a part of a
/// [`Composition`](super::composition::Composition)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<D: Dimensions> {
    /// See [`Point`]
    Point(Point<D>),
    /// See [`LineSegment`]
    LineSegment(LineSegment<D>),
    /// See [`Sphere`]
    Sphere(Sphere<D>),
    /// See [`AxisAlignedBox`]
    AxisAlignedBox(AxisAlignedBox<D>),
}

impl<D: Dimensions> Primitive<D> {
    /// Primitive transformed by the given matrix
    pub fn transformed(&self, matrix: &D::Matrix) -> Self {
        match self {
            Self::Point(shape) => Self::Point(shape.transformed(matrix)),
            Self::LineSegment(shape) => Self::LineSegment(shape.transformed(matrix)),
            Self::Sphere(shape) => Self::Sphere(shape.transformed(matrix)),
            Self::AxisAlignedBox(shape) => Self::AxisAlignedBox(shape.transformed(matrix)),
        }
    }

    /// Kind of the wrapped primitive
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::LineSegment(_) => ShapeKind::LineSegment,
            Self::Sphere(_) => ShapeKind::Sphere,
            Self::AxisAlignedBox(_) => ShapeKind::AxisAlignedBox,
        }
    }

    /// Borrowed, type-erased view of the primitive
    pub const fn as_shape_ref(&self) -> ShapeRef<'_, D> {
        match self {
            Self::Point(shape) => ShapeRef::Point(shape),
            Self::LineSegment(shape) => ShapeRef::LineSegment(shape),
            Self::Sphere(shape) => ShapeRef::Sphere(shape),
            Self::AxisAlignedBox(shape) => ShapeRef::AxisAlignedBox(shape),
        }
    }
}

impl<D: Dimensions> Default for Primitive<D> {
    fn default() -> Self {
        Self::Point(Point::default())
    }
}

macro_rules! impl_primitive_shape {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<D: Dimensions> Shape<D> for $ty<D> {
                const KIND: ShapeKind = ShapeKind::$ty;
                type Strategy = DirectTransform;

                fn transformed(&self, matrix: &D::Matrix) -> Self {
                    $ty::transformed(self, matrix)
                }

                fn as_shape_ref(&self) -> ShapeRef<'_, D> {
                    ShapeRef::$ty(self)
                }
            }

            impl<D: Dimensions> From<$ty<D>> for Primitive<D> {
                fn from(shape: $ty<D>) -> Self {
                    Self::$ty(shape)
                }
            }
        )*
    };
}

impl_primitive_shape!(Point, LineSegment, Sphere, AxisAlignedBox);
