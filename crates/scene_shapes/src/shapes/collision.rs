//! Pairwise collision dispatch
//!
//! Picks the intersection test for two type-erased shapes. Pairs without a
//! dedicated test report no collision. Compositions collide when any of their
//! parts does.

use crate::foundation::math::Dimensions;

use super::ShapeRef;

/// Check if two shapes collide
///
/// The test is symmetric: `collides(a, b) == collides(b, a)`.
pub fn collides<D: Dimensions>(a: ShapeRef<'_, D>, b: ShapeRef<'_, D>) -> bool {
    use ShapeRef as S;

    match (a, b) {
        (S::Composition(composition), other) | (other, S::Composition(composition)) => {
            composition.first_colliding_part(other).is_some()
        }

        (S::Point(a), S::Point(b)) => a.position == b.position,
        (S::Point(point), S::Sphere(sphere)) | (S::Sphere(sphere), S::Point(point)) => {
            sphere.contains_point(&point.position)
        }
        (S::Point(point), S::AxisAlignedBox(aabb)) | (S::AxisAlignedBox(aabb), S::Point(point)) => {
            aabb.contains_point(&point.position)
        }

        (S::Sphere(a), S::Sphere(b)) => a.intersects_sphere(b),
        (S::Sphere(sphere), S::LineSegment(segment)) | (S::LineSegment(segment), S::Sphere(sphere)) => {
            sphere.intersects_segment(segment)
        }
        (S::Sphere(sphere), S::AxisAlignedBox(aabb)) | (S::AxisAlignedBox(aabb), S::Sphere(sphere)) => {
            sphere.intersects_box(aabb)
        }

        (S::AxisAlignedBox(a), S::AxisAlignedBox(b)) => a.intersects_box(b),

        (S::Point(_) | S::LineSegment(_) | S::AxisAlignedBox(_), S::LineSegment(_))
        | (S::LineSegment(_), S::Point(_) | S::AxisAlignedBox(_)) => {
            log::trace!("no collision test for {} and {}", a.kind(), b.kind());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Dim3, Vec3};
    use crate::shapes::{AxisAlignedBox, Composition, LineSegment, Point, Sphere};

    #[test]
    fn test_sphere_pairs_are_symmetric() {
        let sphere = Sphere::<Dim3>::new(Vec3::zeros(), 1.0);
        let point = Point::<Dim3>::new(Vec3::new(0.5, 0.0, 0.0));
        let aabb = AxisAlignedBox::<Dim3>::new(Vec3::new(0.9, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));

        assert!(collides(ShapeRef::Sphere(&sphere), ShapeRef::Point(&point)));
        assert!(collides(ShapeRef::Point(&point), ShapeRef::Sphere(&sphere)));
        assert!(collides(ShapeRef::Sphere(&sphere), ShapeRef::AxisAlignedBox(&aabb)));
        assert!(collides(ShapeRef::AxisAlignedBox(&aabb), ShapeRef::Sphere(&sphere)));
    }

    #[test]
    fn test_unsupported_pair_reports_no_collision() {
        let segment = LineSegment::<Dim3>::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        let point = Point::<Dim3>::new(Vec3::new(0.5, 0.0, 0.0));

        assert!(!collides(ShapeRef::LineSegment(&segment), ShapeRef::Point(&point)));
        assert!(!collides(ShapeRef::LineSegment(&segment), ShapeRef::LineSegment(&segment)));
    }

    #[test]
    fn test_composition_collides_through_any_part() {
        let composition = Composition::<Dim3>::new()
            .with_part(Point::new(Vec3::new(10.0, 0.0, 0.0)), Dim3::identity())
            .with_part(Sphere::new(Vec3::zeros(), 0.5), Dim3::identity());
        let sphere = Sphere::<Dim3>::new(Vec3::new(0.9, 0.0, 0.0), 0.5);
        let far = Sphere::<Dim3>::new(Vec3::new(0.0, 5.0, 0.0), 0.5);

        assert!(collides(ShapeRef::Composition(&composition), ShapeRef::Sphere(&sphere)));
        assert!(collides(ShapeRef::Sphere(&sphere), ShapeRef::Composition(&composition)));
        assert!(!collides(ShapeRef::Composition(&composition), ShapeRef::Sphere(&far)));
        assert!(collides(ShapeRef::Composition(&composition), ShapeRef::Composition(&composition)));
    }
}
