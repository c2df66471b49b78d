//! Triangle-mesh substrate for part-graph analysis.
//!
//! This crate provides the mesh-side foundation for decomposing an object
//! into rigid parts:
//!
//! - [`TriMesh`] - An indexed triangle mesh with derived measures
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`split_surface_pieces`] - Split a mesh into maximal connected pieces
//! - [`load_obj`] / [`save_obj`] - Wavefront OBJ I/O
//! - [`save_stl`] - Binary STL export
//!
//! # Coordinate System
//!
//! The pipeline works in a **z-up right-handed** frame. Input OBJ files are
//! conventionally y-up; [`TriMesh::swap_yup_to_zup`] converts on load by
//! swapping each vertex's Y and Z components and repairing face winding so
//! normals stay outward.
//!
//! # Units
//!
//! Unit-agnostic. All coordinates are `f64`.
//!
//! # Example
//!
//! ```
//! use part_mesh::{cuboid, split_surface_pieces};
//! use nalgebra::{Point3, Vector3};
//!
//! // Two disjoint boxes in one mesh.
//! let mut mesh = cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0));
//! mesh.merge(&cuboid(Point3::new(5.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0)));
//!
//! let pieces = split_surface_pieces(&mesh);
//! assert_eq!(pieces.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod error;
mod mesh;
mod obj;
mod split;
mod stl;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use mesh::{cuboid, TriMesh};
pub use obj::{load_obj, save_obj};
pub use split::split_surface_pieces;
pub use stl::save_stl;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
