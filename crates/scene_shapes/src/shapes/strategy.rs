//! Per-type cache maintenance for shape features
//!
//! Every [`Shape`] names a [`TransformStrategy`] through its associated
//! `Strategy` type. Scalar shapes use [`DirectTransform`], which defers to the
//! shape's own `transformed`. [`Composition`] uses [`CompositionTransform`],
//! which fans out over the parts and rewrites the cached parts in place.

use crate::foundation::math::Dimensions;

use super::{Composition, Shape};

/// Assign a feature's local value and recompute its cached value
pub trait TransformStrategy<D: Dimensions, T> {
    /// Replace the local value
    ///
    /// `transformed` is passed so strategies can keep structural invariants
    /// between the two values; its contents stay stale until the next clean.
    fn assign(local: &mut T, transformed: &mut T, value: T);

    /// Recompute the cached value from the local value and the node's
    /// absolute transformation
    fn recompute(local: &T, absolute: &D::Matrix, transformed: &mut T);
}

/// Strategy for scalar shapes: one call to [`Shape::transformed`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectTransform;

impl<D: Dimensions, T: Shape<D>> TransformStrategy<D, T> for DirectTransform {
    fn assign(local: &mut T, _transformed: &mut T, value: T) {
        *local = value;
    }

    fn recompute(local: &T, absolute: &D::Matrix, transformed: &mut T) {
        *transformed = local.transformed(absolute);
    }
}

/// Strategy for [`Composition`]: every part is transformed by the absolute
/// matrix composed with the part's own placement
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositionTransform;

impl<D: Dimensions> TransformStrategy<D, Composition<D>> for CompositionTransform {
    fn assign(local: &mut Composition<D>, transformed: &mut Composition<D>, value: Composition<D>) {
        // The cache must always have as many parts as the local value.
        transformed.clone_from(&value);
        *local = value;
    }

    fn recompute(local: &Composition<D>, absolute: &D::Matrix, transformed: &mut Composition<D>) {
        let parts = transformed.parts_mut();
        parts.truncate(local.len());
        for (index, part) in local.iter().enumerate() {
            let part = part.transformed(absolute);
            match parts.get_mut(index) {
                Some(slot) => *slot = part,
                None => parts.push(part),
            }
        }
    }
}
