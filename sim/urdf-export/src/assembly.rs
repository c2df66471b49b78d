//! Assemblies: one connected component prepared for simulation.

use nalgebra::Vector3;
use part_graph::{connected_components, AdjacencyGraph, Hierarchy, Part};
use part_mesh::TriMesh;

use crate::error::ExportResult;

/// One independently simulatable rigid assembly.
///
/// A connected component of the part graph, together with its spanning
/// [`Hierarchy`], the recentering translation that was applied to its
/// member parts, the position where the simulator should place it, and
/// the volume-derived scale scalar that sizes perturbation magnitudes and
/// failure thresholds downstream.
#[derive(Debug, Clone)]
pub struct Assembly {
    index: usize,
    part_ids: Vec<usize>,
    hierarchy: Hierarchy,
    recenter: Vector3<f64>,
    start_pos: [f64; 3],
    scale: f64,
}

impl Assembly {
    /// Assembly index within the decomposition (file-name suffix).
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Ids of the member parts, ascending.
    #[inline]
    #[must_use]
    pub fn part_ids(&self) -> &[usize] {
        &self.part_ids
    }

    /// The fixed-joint spanning tree over the member parts.
    #[inline]
    #[must_use]
    pub const fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// The translation that was applied to recenter the member parts
    /// (the negative of the assembly's centroid at build time).
    #[inline]
    #[must_use]
    pub const fn recenter(&self) -> Vector3<f64> {
        self.recenter
    }

    /// Simulation start position.
    ///
    /// Horizontal components are the original centroid coordinates; the
    /// vertical component is the negated post-recenter minimum z, so the
    /// assembly rests exactly on the ground plane at simulation start.
    #[inline]
    #[must_use]
    pub const fn start_pos(&self) -> [f64; 3] {
        self.start_pos
    }

    /// Scale scalar: the assembly's volume.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Combined assembly for single-assembly legacy emission.
    ///
    /// No recentering is applied; parts stay in the shared input frame
    /// and the start position carries only the vertical ground offset.
    pub(crate) fn legacy(
        part_ids: Vec<usize>,
        hierarchy: Hierarchy,
        scale: f64,
        z_offset: f64,
    ) -> Self {
        Self {
            index: 0,
            part_ids,
            hierarchy,
            recenter: Vector3::zeros(),
            start_pos: [0.0, 0.0, z_offset],
            scale,
        }
    }
}

/// Partition parts into assemblies and recenter each one.
///
/// For every connected component of `graph`:
///
/// 1. concatenate the member meshes and take their surface centroid;
/// 2. translate every member part by the negated centroid (the one-time
///    recentering mutation);
/// 3. record the start position `(cx, cy, −min_z)` and the scale scalar
///    (component volume);
/// 4. span the component with a depth-first hierarchy rooted at its
///    minimum id.
///
/// # Errors
///
/// Propagates hierarchy construction failures; a valid partition cannot
/// actually produce one.
pub fn build_assemblies(
    parts: &mut [Part],
    graph: &AdjacencyGraph,
) -> ExportResult<Vec<Assembly>> {
    let components = connected_components(graph);
    let mut assemblies = Vec::with_capacity(components.len());

    for (index, component) in components.into_iter().enumerate() {
        let mut combined = TriMesh::new();
        for &id in &component {
            combined.merge(parts[id].mesh());
        }

        let centroid = combined.centroid();
        let recenter = -centroid.coords;
        for &id in &component {
            parts[id].translate(recenter);
        }
        combined.translate(recenter);

        let start_pos = [centroid.x, centroid.y, -combined.bounds().min.z];
        let scale = combined.volume();
        let hierarchy = Hierarchy::span(&component, graph, None)?;

        tracing::debug!(
            assembly = index,
            parts = component.len(),
            scale,
            "built assembly"
        );

        assemblies.push(Assembly {
            index,
            part_ids: component,
            hierarchy,
            recenter,
            start_pos,
            scale,
        });
    }

    Ok(assemblies)
}
