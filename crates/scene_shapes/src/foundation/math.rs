//! Math utilities and types
//!
//! Provides the vector and homogeneous matrix types used by shapes, plus the
//! [`Dimensions`] markers that let the same scene and shape code run in 2D
//! and 3D.

use std::fmt;
use std::ops::{Add, Mul, Sub};

pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type (homogeneous 2D transformation)
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type (homogeneous 3D transformation)
pub type Mat4 = Matrix4<f32>;

/// Dimensionality of a shape, used by collision dispatch to pick a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionTag {
    /// Two-dimensional shapes transformed by [`Mat3`]
    Two,
    /// Three-dimensional shapes transformed by [`Mat4`]
    Three,
}

impl DimensionTag {
    /// Number of spatial axes
    pub const fn count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Compile-time selection of vector and matrix types for a dimensionality
///
/// Implemented by the [`Dim2`] and [`Dim3`] markers. All matrices are
/// homogeneous, so composing placements is plain matrix multiplication.
pub trait Dimensions: fmt::Debug + Clone + Copy + PartialEq + 'static {
    /// Runtime tag matching this dimensionality
    const TAG: DimensionTag;

    /// Position / direction vector
    type Vector: fmt::Debug
        + Clone
        + Copy
        + PartialEq
        + Add<Output = Self::Vector>
        + Sub<Output = Self::Vector>
        + Mul<f32, Output = Self::Vector>
        + 'static;

    /// Homogeneous transformation matrix
    type Matrix: fmt::Debug + Clone + Copy + PartialEq + Mul<Output = Self::Matrix> + 'static;

    /// Zero vector
    fn zero() -> Self::Vector;

    /// Vector with every component set to `value`
    fn splat(value: f32) -> Self::Vector;

    /// Identity transformation
    fn identity() -> Self::Matrix;

    /// Pure translation
    fn translation(offset: &Self::Vector) -> Self::Matrix;

    /// Uniform scaling about the origin
    fn scaling(factor: f32) -> Self::Matrix;

    /// Apply the full transformation (including translation) to a point
    fn transform_point(matrix: &Self::Matrix, point: &Self::Vector) -> Self::Vector;

    /// Apply only the rotation/scaling part to a direction
    fn transform_vector(matrix: &Self::Matrix, vector: &Self::Vector) -> Self::Vector;

    /// Dot product
    fn dot(a: &Self::Vector, b: &Self::Vector) -> f32;

    /// Component-wise minimum
    fn component_min(a: &Self::Vector, b: &Self::Vector) -> Self::Vector;

    /// Component-wise maximum
    fn component_max(a: &Self::Vector, b: &Self::Vector) -> Self::Vector;

    /// Squared length of a vector
    fn length_squared(vector: &Self::Vector) -> f32 {
        Self::dot(vector, vector)
    }

    /// Scaling factor a matrix applies to lengths
    ///
    /// Ratio between the lengths of the transformed and the original
    /// diagonal `(1, .., 1)`. Exact for rigid motions and uniform scaling.
    fn uniform_scaling(matrix: &Self::Matrix) -> f32 {
        let diagonal = Self::transform_vector(matrix, &Self::splat(1.0));
        (Self::length_squared(&diagonal) / Self::TAG.count() as f32).sqrt()
    }
}

/// Marker for two-dimensional scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dim2;

/// Marker for three-dimensional scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dim3;

impl Dimensions for Dim2 {
    const TAG: DimensionTag = DimensionTag::Two;
    type Vector = Vec2;
    type Matrix = Mat3;

    fn zero() -> Vec2 {
        Vec2::zeros()
    }

    fn splat(value: f32) -> Vec2 {
        Vec2::repeat(value)
    }

    fn identity() -> Mat3 {
        Mat3::identity()
    }

    fn translation(offset: &Vec2) -> Mat3 {
        Mat3::new_translation(offset)
    }

    fn scaling(factor: f32) -> Mat3 {
        Mat3::new_nonuniform_scaling(&Vec2::repeat(factor))
    }

    fn transform_point(matrix: &Mat3, point: &Vec2) -> Vec2 {
        matrix.transform_point(&nalgebra::Point2::from(*point)).coords
    }

    fn transform_vector(matrix: &Mat3, vector: &Vec2) -> Vec2 {
        matrix.transform_vector(vector)
    }

    fn dot(a: &Vec2, b: &Vec2) -> f32 {
        a.dot(b)
    }

    fn component_min(a: &Vec2, b: &Vec2) -> Vec2 {
        a.inf(b)
    }

    fn component_max(a: &Vec2, b: &Vec2) -> Vec2 {
        a.sup(b)
    }
}

impl Dimensions for Dim3 {
    const TAG: DimensionTag = DimensionTag::Three;
    type Vector = Vec3;
    type Matrix = Mat4;

    fn zero() -> Vec3 {
        Vec3::zeros()
    }

    fn splat(value: f32) -> Vec3 {
        Vec3::repeat(value)
    }

    fn identity() -> Mat4 {
        Mat4::identity()
    }

    fn translation(offset: &Vec3) -> Mat4 {
        Mat4::new_translation(offset)
    }

    fn scaling(factor: f32) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::repeat(factor))
    }

    fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
        matrix.transform_point(&nalgebra::Point3::from(*point)).coords
    }

    fn transform_vector(matrix: &Mat4, vector: &Vec3) -> Vec3 {
        matrix.transform_vector(vector)
    }

    fn dot(a: &Vec3, b: &Vec3) -> f32 {
        a.dot(b)
    }

    fn component_min(a: &Vec3, b: &Vec3) -> Vec3 {
        a.inf(b)
    }

    fn component_max(a: &Vec3, b: &Vec3) -> Vec3 {
        a.sup(b)
    }
}
