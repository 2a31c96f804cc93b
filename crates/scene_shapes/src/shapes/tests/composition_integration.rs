//! Integration tests for compositions attached to scene nodes

use crate::foundation::math::{Dim3, Dimensions, Vec3};
use crate::scene::Scene3D;
use crate::shapes::{Composition, CompositionPart, Point, Primitive, Shape, Sphere};

fn part_position(part: &CompositionPart<Dim3>) -> Vec3 {
    match part.shape {
        Primitive::Point(point) => point.position,
        Primitive::Sphere(sphere) => sphere.position,
        other => panic!("unexpected part {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parts_are_transformed_in_order() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        let composition = Composition::<Dim3>::new()
            .with_part(Sphere::new(Vec3::zeros(), 0.5), Dim3::identity())
            .with_part(Sphere::new(Vec3::zeros(), 0.5), Dim3::translation(&Vec3::new(1.0, 0.0, 0.0)));
        let handle = scene.add_shape(node, composition, None).unwrap();

        scene.translate(node, &Vec3::new(5.0, 0.0, 0.0)).unwrap();

        let transformed = scene.transformed_shape(handle).unwrap();
        assert_eq!(transformed.len(), 2);
        assert_relative_eq!(part_position(&transformed.parts()[0]), Vec3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(part_position(&transformed.parts()[1]), Vec3::new(6.0, 0.0, 0.0));

        // Local parts keep their relative placements
        let local = scene.shape(handle).unwrap();
        assert_relative_eq!(part_position(&local.parts()[1]), Vec3::zeros());
        assert_relative_eq!(
            Dim3::transform_point(&local.parts()[1].placement, &Vec3::zeros()),
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_nested_nodes_compose_with_part_placements() {
        let mut scene = Scene3D::new();
        let root = scene.create_node(None).unwrap();
        let child = scene.create_node(Some(root)).unwrap();
        let composition = Composition::<Dim3>::new()
            .with_part(Point::new(Vec3::zeros()), Dim3::translation(&Vec3::new(1.0, 0.0, 0.0)))
            .with_part(Point::new(Vec3::new(0.0, 1.0, 0.0)), Dim3::scaling(2.0));
        let handle = scene.add_shape(child, composition, None).unwrap();

        scene.translate(root, &Vec3::new(0.0, 0.0, 3.0)).unwrap();
        scene.translate(child, &Vec3::new(1.0, 0.0, 0.0)).unwrap();

        let transformed = scene.transformed_shape(handle).unwrap();
        assert_relative_eq!(part_position(&transformed.parts()[0]), Vec3::new(2.0, 0.0, 3.0));
        assert_relative_eq!(part_position(&transformed.parts()[1]), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_cached_part_count_follows_assignment() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        let three = Composition::<Dim3>::new()
            .with_part(Point::new(Vec3::zeros()), Dim3::identity())
            .with_part(Point::new(Vec3::zeros()), Dim3::identity())
            .with_part(Point::new(Vec3::zeros()), Dim3::identity());
        let handle = scene.add_shape(node, three, None).unwrap();
        assert_eq!(scene.shape_feature(handle).unwrap().cached_shape().len(), 3);
        scene.transformed_shape(handle).unwrap();

        let one = Composition::<Dim3>::new().with_part(Sphere::new(Vec3::zeros(), 1.0), Dim3::identity());
        scene.set_shape(handle, one).unwrap();

        // Sizes match before the next clean
        assert_eq!(scene.shape_feature(handle).unwrap().cached_shape().len(), 1);
        scene.translate(node, &Vec3::new(0.0, 0.0, 1.0)).unwrap();
        let transformed = scene.transformed_shape(handle).unwrap();
        assert_eq!(transformed.len(), 1);
        assert_relative_eq!(part_position(&transformed.parts()[0]), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_empty_composition_is_valid() {
        let mut scene = Scene3D::new();
        let node = scene.create_node(None).unwrap();
        let handle = scene.add_default_shape::<Composition<Dim3>>(node, None).unwrap();

        scene.translate(node, &Vec3::new(1.0, 1.0, 1.0)).unwrap();

        assert!(scene.transformed_shape(handle).unwrap().is_empty());
    }

    #[test]
    fn test_group_query_hits_composition_part() {
        let mut scene = Scene3D::new();
        let group = scene.create_group();
        let body = scene.create_node(None).unwrap();
        let probe = scene.create_node(None).unwrap();

        let composition = Composition::<Dim3>::new()
            .with_part(Sphere::new(Vec3::zeros(), 0.5), Dim3::identity())
            .with_part(Sphere::new(Vec3::zeros(), 0.5), Dim3::translation(&Vec3::new(3.0, 0.0, 0.0)));
        let hull = scene.add_shape(body, composition, Some(group)).unwrap();
        let point = scene.add_shape(probe, Point::new(Vec3::zeros()), Some(group)).unwrap();

        scene.translate(body, &Vec3::new(0.0, 10.0, 0.0)).unwrap();
        scene.translate(probe, &Vec3::new(3.2, 10.0, 0.0)).unwrap();

        assert_eq!(scene.first_collision(group, point).unwrap(), Some(hull.id()));

        let probe_shape = *scene.transformed_shape(point).unwrap();
        let transformed = scene.transformed_shape(hull).unwrap();
        assert_eq!(transformed.first_colliding_part(probe_shape.as_shape_ref()), Some(1));
    }
}
