//! Assembly emission for decomposed part graphs.
//!
//! Takes the output of `part-graph` — parts, adjacency, components,
//! spanning hierarchies — and renders each independent rigid assembly
//! into a form an external rigid-body simulator can load:
//!
//! - one URDF document per assembly: a fixed-joint link tree with
//!   per-part mesh references, mass = volume × density, and a placeholder
//!   unit inertia tensor;
//! - one binary STL per part for the links to reference;
//! - one versioned JSON metadata record per assembly carrying the start
//!   position and the volume-derived scale scalar that sizes downstream
//!   perturbations and thresholds.
//!
//! # Modes
//!
//! [`ExportMode::Multi`] emits one document set per connected component.
//! [`ExportMode::SingleLegacy`] emits one combined document and a
//! metadata record holding only the vertical ground offset; it requires
//! the object to form a single component and skips recentering.
//!
//! # Example
//!
//! ```no_run
//! use part_graph::ProximityThreshold;
//! use urdf_export::{export_obj_to_urdf, ExportOptions};
//!
//! let options = ExportOptions::new(ProximityThreshold::RelativeToScale(0.005));
//! let assemblies = export_obj_to_urdf("object.obj", "out", &options).unwrap();
//! println!("emitted {} assemblies", assemblies.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod assembly;
mod error;
mod export;
mod metadata;
mod urdf;

pub use assembly::{build_assemblies, Assembly};
pub use error::{ExportError, ExportResult};
pub use export::{export_obj_to_urdf, write_assembly_files, ExportMode, ExportOptions};
pub use metadata::{load_metadata, save_metadata, AssemblyMetadata, LegacyMetadata, METADATA_VERSION};
pub use urdf::{urdf_document, ROBOT_NAME};
