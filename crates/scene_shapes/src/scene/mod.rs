//! Scene graph of transformable nodes
//!
//! The [`Scene`] owns three arenas: nodes, shape features and shape groups.
//! Nodes form a hierarchy of relative transformations and carry a dirty flag
//! that drives lazy recomputation of the absolute shapes attached to them.
//!
//! - [`Scene::set_transformation`] and friends mark a node and its
//!   descendants dirty.
//! - [`Scene::set_clean`] computes the absolute transformation of a node
//!   (cleaning dirty ancestors first) and recomputes every shape attached to
//!   it.

mod error;
mod node;
mod scene_graph;

pub use error::SceneError;
pub use scene_graph::{Scene, Scene2D, Scene3D, SceneStats};

pub(crate) use node::Node;
