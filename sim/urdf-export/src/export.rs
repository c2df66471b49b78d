//! The OBJ → URDF decomposition pipeline.

use std::fs;
use std::path::Path;

use part_graph::{
    build_adjacency, connected_components, split_into_parts, Hierarchy, Part, ProximityThreshold,
};
use part_mesh::save_stl;

use crate::assembly::{build_assemblies, Assembly};
use crate::error::{ExportError, ExportResult};
use crate::metadata::{save_metadata, AssemblyMetadata, LegacyMetadata};
use crate::urdf::{part_mesh_filename, urdf_document};

/// Which document layout to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// One URDF + metadata record per connected component (default).
    Multi,
    /// One combined URDF with a single ground offset.
    ///
    /// Requires the object to form exactly one connected component and
    /// skips recentering; parts stay in the shared input frame.
    SingleLegacy,
}

/// Options for the decomposition pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Proximity threshold for the adjacency graph (mandatory).
    pub threshold: ProximityThreshold,
    /// Material density; link mass = part volume × density.
    pub density: f64,
    /// Document layout.
    pub mode: ExportMode,
}

impl ExportOptions {
    /// Options with the given threshold, unit density, and multi-assembly
    /// layout.
    #[must_use]
    pub const fn new(threshold: ProximityThreshold) -> Self {
        Self {
            threshold,
            density: 1.0,
            mode: ExportMode::Multi,
        }
    }

    /// Set the material density.
    #[must_use]
    pub const fn density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Switch to single-assembly legacy layout.
    #[must_use]
    pub const fn legacy(mut self) -> Self {
        self.mode = ExportMode::SingleLegacy;
        self
    }
}

/// Decompose an OBJ object into URDF assemblies on disk.
///
/// Loads the mesh (y-up on disk, converted to z-up), splits it into
/// parts, builds the proximity graph, partitions it into assemblies, and
/// writes per-assembly URDF documents, metadata records, and per-part
/// STL meshes into `output_dir` (created if missing).
///
/// Returns the built assemblies; their member parts have been recentered
/// when the mode recenters (multi-assembly layout).
///
/// # Errors
///
/// - Mesh and graph failures, including
///   [`GraphError::EmptyDecomposition`](part_graph::GraphError::EmptyDecomposition)
///   for an object with no parts.
/// - [`ExportError::MultipleComponents`] in legacy mode when the object
///   is not a single component.
/// - I/O, XML, and JSON failures while writing.
pub fn export_obj_to_urdf<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    options: &ExportOptions,
) -> ExportResult<Vec<Assembly>> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut mesh = part_mesh::load_obj(input.as_ref())?;
    mesh.swap_yup_to_zup();

    let mut parts = split_into_parts(&mesh);
    if parts.is_empty() {
        return Err(part_graph::GraphError::EmptyDecomposition.into());
    }

    let graph = build_adjacency(&parts, options.threshold)?;

    let assemblies = match options.mode {
        ExportMode::Multi => {
            let assemblies = build_assemblies(&mut parts, &graph)?;
            write_assembly_files(output_dir, &assemblies, &parts, options.density)?;
            assemblies
        }
        ExportMode::SingleLegacy => {
            let z_offset = -combined_min_z(&parts);
            let assembly = build_legacy_assembly(&parts, &graph, z_offset)?;
            let document = urdf_document(&assembly, &parts, options.density)?;
            fs::write(output_dir.join("assembly.urdf"), document)?;

            save_metadata(
                &LegacyMetadata::new(z_offset),
                output_dir.join("assembly.json"),
            )?;
            write_part_meshes(output_dir, &parts)?;
            vec![assembly]
        }
    };

    tracing::info!(
        assemblies = assemblies.len(),
        parts = parts.len(),
        output = %output_dir.display(),
        "exported URDF decomposition"
    );

    Ok(assemblies)
}

/// Write the document set for already-built assemblies.
///
/// One `assembly_<i>.urdf` and `assembly_<i>.json` per assembly, plus
/// `part_<j>.stl` for every part. Shared by the export pipeline and the
/// stability evaluator (which emits into a scoped temporary directory).
///
/// # Errors
///
/// I/O, XML, and JSON failures while writing.
pub fn write_assembly_files(
    output_dir: &Path,
    assemblies: &[Assembly],
    parts: &[Part],
    density: f64,
) -> ExportResult<()> {
    for assembly in assemblies {
        let document = urdf_document(assembly, parts, density)?;
        fs::write(
            output_dir.join(format!("assembly_{}.urdf", assembly.index())),
            document,
        )?;

        save_metadata(
            &AssemblyMetadata::new(assembly.start_pos(), assembly.scale()),
            output_dir.join(format!("assembly_{}.json", assembly.index())),
        )?;
    }

    write_part_meshes(output_dir, parts)
}

/// Export every part's surface mesh.
fn write_part_meshes(output_dir: &Path, parts: &[Part]) -> ExportResult<()> {
    for part in parts {
        save_stl(part.mesh(), output_dir.join(part_mesh_filename(part.id())))?;
    }
    Ok(())
}

/// Build the single combined assembly for legacy mode.
fn build_legacy_assembly(
    parts: &[Part],
    graph: &part_graph::AdjacencyGraph,
    z_offset: f64,
) -> ExportResult<Assembly> {
    let components = connected_components(graph);
    if components.len() != 1 {
        return Err(ExportError::MultipleComponents {
            count: components.len(),
        });
    }

    let component = &components[0];
    let hierarchy = Hierarchy::span(component, graph, None)?;
    let scale: f64 = component.iter().map(|&id| parts[id].volume()).sum();

    Ok(Assembly::legacy(component.clone(), hierarchy, scale, z_offset))
}

/// Lowest vertical extent over all parts.
fn combined_min_z(parts: &[Part]) -> f64 {
    parts
        .iter()
        .map(|p| p.bounds().min.z)
        .fold(f64::INFINITY, f64::min)
}
