//! Aggregate shapes
//!
//! A [`Composition`] is an ordered list of primitives, each with its own
//! placement relative to the owning node. Part order is significant: a
//! collision against a composition is reported by part index.

use std::slice;

use crate::foundation::math::Dimensions;

use super::strategy::CompositionTransform;
use super::{collision, Primitive, Shape, ShapeKind, ShapeRef};

/// One primitive of a [`Composition`] with its relative placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionPart<D: Dimensions> {
    /// The primitive, in its own local coordinates
    pub shape: Primitive<D>,
    /// Placement of the primitive relative to the composition
    ///
    /// In a transformed composition this holds the absolute placement the
    /// part was transformed by.
    pub placement: D::Matrix,
}

impl<D: Dimensions> CompositionPart<D> {
    /// Create a part from a primitive and its placement
    pub fn new(shape: impl Into<Primitive<D>>, placement: D::Matrix) -> Self {
        Self {
            shape: shape.into(),
            placement,
        }
    }

    /// Part placed in the space described by `matrix`
    pub fn transformed(&self, matrix: &D::Matrix) -> Self {
        let placement = *matrix * self.placement;
        Self {
            shape: self.shape.transformed(&placement),
            placement,
        }
    }
}

/// Ordered collection of independently placed primitives
///
/// ```
/// use scene_shapes::prelude::*;
///
/// let composition = Composition::<Dim3>::new()
///     .with_part(Sphere::new(Vec3::zeros(), 0.5), Dim3::identity())
///     .with_part(Sphere::new(Vec3::zeros(), 0.5), Dim3::translation(&Vec3::new(1.0, 0.0, 0.0)));
///
/// assert_eq!(composition.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Composition<D: Dimensions> {
    parts: Vec<CompositionPart<D>>,
}

impl<D: Dimensions> Default for Composition<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Dimensions> Composition<D> {
    /// Create an empty composition
    pub const fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Builder pattern: append a primitive with its placement
    #[must_use]
    pub fn with_part(mut self, shape: impl Into<Primitive<D>>, placement: D::Matrix) -> Self {
        self.push(shape, placement);
        self
    }

    /// Append a primitive with its placement
    pub fn push(&mut self, shape: impl Into<Primitive<D>>, placement: D::Matrix) {
        self.parts.push(CompositionPart::new(shape, placement));
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the composition has no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Part at `index`
    pub fn get(&self, index: usize) -> Option<&CompositionPart<D>> {
        self.parts.get(index)
    }

    /// All parts, in order
    pub fn parts(&self) -> &[CompositionPart<D>] {
        &self.parts
    }

    /// Iterate over the parts, in order
    pub fn iter(&self) -> slice::Iter<'_, CompositionPart<D>> {
        self.parts.iter()
    }

    pub(crate) fn parts_mut(&mut self) -> &mut Vec<CompositionPart<D>> {
        &mut self.parts
    }

    /// Index of the first part colliding with `other`
    pub fn first_colliding_part(&self, other: ShapeRef<'_, D>) -> Option<usize> {
        self.parts
            .iter()
            .position(|part| collision::collides(part.shape.as_shape_ref(), other))
    }
}

impl<'a, D: Dimensions> IntoIterator for &'a Composition<D> {
    type Item = &'a CompositionPart<D>;
    type IntoIter = slice::Iter<'a, CompositionPart<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

impl<D: Dimensions> FromIterator<CompositionPart<D>> for Composition<D> {
    fn from_iter<I: IntoIterator<Item = CompositionPart<D>>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl<D: Dimensions> Shape<D> for Composition<D> {
    const KIND: ShapeKind = ShapeKind::Composition;
    type Strategy = CompositionTransform;

    fn transformed(&self, matrix: &D::Matrix) -> Self {
        self.parts.iter().map(|part| part.transformed(matrix)).collect()
    }

    fn as_shape_ref(&self) -> ShapeRef<'_, D> {
        ShapeRef::Composition(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Dim3, Vec3};
    use crate::shapes::{Point, Sphere};
    use approx::assert_relative_eq;

    fn two_spheres() -> Composition<Dim3> {
        Composition::new()
            .with_part(Sphere::new(Vec3::zeros(), 0.5), Dim3::identity())
            .with_part(Sphere::new(Vec3::zeros(), 0.5), Dim3::translation(&Vec3::new(1.0, 0.0, 0.0)))
    }

    #[test]
    fn test_transformed_composes_placements_in_order() {
        let composition = two_spheres();
        let transformed = Shape::transformed(&composition, &Dim3::translation(&Vec3::new(5.0, 0.0, 0.0)));

        assert_eq!(transformed.len(), 2);
        let centers: Vec<_> = transformed
            .iter()
            .map(|part| match part.shape {
                Primitive::Sphere(sphere) => sphere.position,
                other => panic!("unexpected part {other:?}"),
            })
            .collect();
        assert_relative_eq!(centers[0], Vec3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(centers[1], Vec3::new(6.0, 0.0, 0.0));
    }

    #[test]
    fn test_first_colliding_part_reports_index() {
        let composition = two_spheres();
        let transformed = Shape::transformed(&composition, &Dim3::identity());

        let probe = Point::<Dim3>::new(Vec3::new(1.2, 0.0, 0.0));
        assert_eq!(transformed.first_colliding_part(ShapeRef::Point(&probe)), Some(1));

        let miss = Point::<Dim3>::new(Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(transformed.first_colliding_part(ShapeRef::Point(&miss)), None);
    }

    #[test]
    fn test_empty_composition() {
        let composition = Composition::<Dim3>::default();
        assert!(composition.is_empty());
        assert!(Shape::transformed(&composition, &Dim3::identity()).is_empty());
    }
}
