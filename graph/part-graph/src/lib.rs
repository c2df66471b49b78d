//! Proximity graphs over rigid mesh parts.
//!
//! This crate is the analysis core of the pipeline. Given an object split
//! into disjoint rigid [`Part`]s, it answers two questions:
//!
//! - **Rootedness**: is every part connected to the ground through a chain
//!   of touching or near-touching surfaces? ([`check_rooted`])
//! - **Structure**: how do the parts group into independent rigid
//!   assemblies, and what joint hierarchy spans each one?
//!   ([`connected_components`], [`Hierarchy`])
//!
//! # Pipeline
//!
//! ```text
//! parts ──► AdjacencyGraph ──┬──► rootedness (ground node 0)
//!                            └──► components ──► spanning hierarchies
//! ```
//!
//! Surface distances are delegated to `parry3d` (`query::distance`); a
//! pair of parts is adjacent when the minimum distance between their
//! surfaces is below a caller-supplied [`ProximityThreshold`]. There is no
//! default threshold: observed variants range from `1e-3` absolute to
//! `0.02×` object scale, so the choice is forced on the caller.
//!
//! # Example
//!
//! ```
//! use nalgebra::{Point3, Vector3};
//! use part_mesh::cuboid;
//! use part_graph::{build_adjacency, connected_components, Part, ProximityThreshold};
//!
//! // Two stacked cubes and one far away.
//! let meshes = vec![
//!     cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0)),
//!     cuboid(Point3::new(0.0, 0.0, 1.5), Vector3::new(1.0, 1.0, 1.0)),
//!     cuboid(Point3::new(9.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0)),
//! ];
//! let parts: Vec<Part> = meshes.into_iter().enumerate()
//!     .map(|(id, m)| Part::from_mesh(id, m))
//!     .collect();
//!
//! let graph = build_adjacency(&parts, ProximityThreshold::Absolute(1e-3)).unwrap();
//! let components = connected_components(&graph);
//! assert_eq!(components, vec![vec![0, 1], vec![2]]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod components;
mod error;
mod hierarchy;
mod part;
mod rooted;
mod threshold;

pub use adjacency::{build_adjacency, build_rooted_adjacency, AdjacencyGraph, GROUND};
pub use components::connected_components;
pub use error::{GraphError, GraphResult};
pub use hierarchy::Hierarchy;
pub use part::{split_into_parts, Part};
pub use rooted::{check_rooted, is_rooted};
pub use threshold::ProximityThreshold;
