//! # Scene Shapes
//!
//! Collision shapes attached to the nodes of a 2D or 3D scene graph.
//!
//! ## Features
//!
//! - **Lazy Transforms**: Absolute shapes are recomputed only when a dirty node is read
//! - **Primitives**: Points, line segments, spheres and axis-aligned boxes
//! - **Compositions**: Aggregate shapes made of independently placed primitives
//! - **Shape Groups**: Type-erased sets of shapes queried for collisions
//! - **2D and 3D**: One code path generic over [`Dimensions`](foundation::math::Dimensions)
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_shapes::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut scene = Scene3D::new();
//!     let group = scene.create_group();
//!
//!     let ship = scene.create_node(None)?;
//!     let rock = scene.create_node(None)?;
//!     let hull = scene.add_shape(ship, Sphere::new(Vec3::zeros(), 1.0), Some(group))?;
//!     scene.add_shape(rock, Sphere::new(Vec3::zeros(), 0.5), Some(group))?;
//!
//!     scene.translate(rock, &Vec3::new(1.2, 0.0, 0.0))?;
//!     assert!(scene.first_collision(group, hull)?.is_some());
//!
//!     scene.translate(rock, &Vec3::new(5.0, 0.0, 0.0))?;
//!     assert!(scene.first_collision(group, hull)?.is_none());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod scene;
pub mod shapes;

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SceneConfig, TimelineConfig},
        foundation::{
            collections::{GroupId, NodeId, ShapeHandle, ShapeId},
            math::{Dim2, Dim3, DimensionTag, Dimensions, Mat3, Mat4, Vec2, Vec3},
            time::Timeline,
        },
        scene::{Scene, Scene2D, Scene3D, SceneError, SceneStats},
        shapes::{
            AbstractShape, AxisAlignedBox, Composition, CompositionPart, LineSegment, Point, Primitive, Shape,
            ShapeGroup, ShapeKind, ShapeRef, Sphere,
        },
    };
}
