//! Proximity-based adjacency graphs.
//!
//! Every unordered pair of parts is tested with a minimum-surface-distance
//! query (delegated to `parry3d`); pairs closer than the resolved
//! threshold get a symmetric edge. O(n²) in the part count, which is fine
//! for the tens of parts these objects decompose into. The pairwise tests
//! are independent and could be parallelized without changing results;
//! they are kept sequential.

use std::collections::BTreeSet;

use nalgebra::{Isometry3, Point3, Vector3};
use parry3d_f64::query;
use parry3d_f64::shape::TriMesh as CollisionMesh;
use part_mesh::{cuboid, Aabb, TriMesh};

use crate::error::{GraphError, GraphResult};
use crate::part::Part;
use crate::threshold::ProximityThreshold;

/// Reserved node id for the synthetic ground slab in rooted graphs.
pub const GROUND: usize = 0;

/// Thickness of the synthetic ground slab.
const GROUND_THICKNESS: f64 = 0.01;

/// Minimum horizontal extent of the ground slab, matching the fixed slab
/// size of earlier pipelines. The slab never shrinks below this even for
/// small objects.
const MIN_GROUND_EXTENT: f64 = 10.0;

/// Undirected adjacency over graph node ids.
///
/// Symmetric by construction. Neighbor sets are ordered, so iteration is
/// deterministic; hierarchy construction relies on this for reproducible
/// joint naming.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    neighbors: Vec<BTreeSet<usize>>,
}

impl AdjacencyGraph {
    /// Create a graph with `nodes` isolated nodes.
    #[must_use]
    pub fn with_nodes(nodes: usize) -> Self {
        Self {
            neighbors: vec![BTreeSet::new(); nodes],
        }
    }

    /// Number of nodes.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Record a symmetric edge between `a` and `b`.
    ///
    /// Self-loops are ignored.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of range; ids come from the builder's
    /// own enumeration, so this indicates a bug, not bad input.
    pub fn insert_edge(&mut self, a: usize, b: usize) {
        assert!(a < self.neighbors.len() && b < self.neighbors.len());
        if a == b {
            return;
        }
        self.neighbors[a].insert(b);
        self.neighbors[b].insert(a);
    }

    /// Whether `a` and `b` are adjacent.
    #[must_use]
    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors.get(a).is_some_and(|set| set.contains(&b))
    }

    /// Iterate the neighbors of `id` in ascending order.
    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.get(id).into_iter().flatten().copied()
    }
}

/// Build the adjacency graph over parts only (no ground node).
///
/// Node `i` is part `i`. This is the graph the component partitioner
/// consumes.
///
/// # Errors
///
/// Fails on an invalid threshold, a part the collision library rejects,
/// or a nonsensical distance result (see [`min_surface_distance`]).
pub fn build_adjacency(parts: &[Part], threshold: ProximityThreshold) -> GraphResult<AdjacencyGraph> {
    let epsilon = threshold.resolve(combined_scale(parts))?;
    let shapes = collision_shapes(parts, 0)?;
    pairwise_edges(&shapes, epsilon)
}

/// Build the adjacency graph including the synthetic ground slab.
///
/// The ground occupies node [`GROUND`]; part `i` becomes node `i + 1`.
/// The slab's top face sits at the object's minimum vertical extent and
/// its horizontal extents are twice the object's footprint (never below a
/// fixed minimum), so any part resting at the bottom of the object is
/// within reach.
///
/// # Errors
///
/// Same failure modes as [`build_adjacency`].
pub fn build_rooted_adjacency(
    parts: &[Part],
    threshold: ProximityThreshold,
) -> GraphResult<AdjacencyGraph> {
    let epsilon = threshold.resolve(combined_scale(parts))?;

    let bounds = combined_bounds(parts);
    let slab = ground_slab(&bounds);
    let slab_shape = collision_shape(&slab, GROUND)?;

    let mut shapes = Vec::with_capacity(parts.len() + 1);
    shapes.push((GROUND, slab_shape));
    shapes.extend(collision_shapes(parts, 1)?);

    pairwise_edges(&shapes, epsilon)
}

/// Minimum surface distance between two collision shapes.
///
/// # Errors
///
/// A non-finite or negative result is [`GraphError::InvalidDistance`] —
/// never an implicit "not adjacent". An unsupported shape pairing is
/// [`GraphError::DistanceUnsupported`].
pub fn min_surface_distance(
    first: (usize, &CollisionMesh),
    second: (usize, &CollisionMesh),
) -> GraphResult<f64> {
    let identity = Isometry3::identity();
    let distance = query::distance(&identity, first.1, &identity, second.1).map_err(|_| {
        GraphError::DistanceUnsupported {
            first: first.0,
            second: second.0,
        }
    })?;

    if !distance.is_finite() || distance < 0.0 {
        return Err(GraphError::InvalidDistance {
            first: first.0,
            second: second.0,
            distance,
        });
    }

    Ok(distance)
}

/// Run the O(n²) pairwise test and collect edges.
fn pairwise_edges(shapes: &[(usize, CollisionMesh)], epsilon: f64) -> GraphResult<AdjacencyGraph> {
    let mut graph = AdjacencyGraph::with_nodes(shapes.len());

    for i in 0..shapes.len() {
        for j in (i + 1)..shapes.len() {
            let (id_i, shape_i) = &shapes[i];
            let (id_j, shape_j) = &shapes[j];
            let distance = min_surface_distance((*id_i, shape_i), (*id_j, shape_j))?;
            if distance < epsilon {
                graph.insert_edge(i, j);
            }
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        epsilon,
        "built adjacency graph"
    );

    Ok(graph)
}

/// Build collision shapes for all parts, with node ids starting at `offset`.
fn collision_shapes(parts: &[Part], offset: usize) -> GraphResult<Vec<(usize, CollisionMesh)>> {
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| Ok((offset + i, collision_shape(part.mesh(), offset + i)?)))
        .collect()
}

/// Convert a surface mesh into the collision library's mesh shape.
fn collision_shape(mesh: &TriMesh, _node: usize) -> GraphResult<CollisionMesh> {
    Ok(CollisionMesh::new(mesh.vertices.clone(), mesh.faces.clone()))
}

/// Union of all part bounds.
fn combined_bounds(parts: &[Part]) -> Aabb {
    let mut bounds = Aabb::empty();
    for part in parts {
        bounds.expand_to_include(&part.bounds().min);
        bounds.expand_to_include(&part.bounds().max);
    }
    bounds
}

/// Overall object scale: the bounding-box diagonal over all parts.
fn combined_scale(parts: &[Part]) -> f64 {
    combined_bounds(parts).diagonal()
}

/// The synthetic ground slab for rootedness analysis.
fn ground_slab(bounds: &Aabb) -> TriMesh {
    let size = bounds.size();
    let extent_x = (2.0 * size.x).max(MIN_GROUND_EXTENT);
    let extent_y = (2.0 * size.y).max(MIN_GROUND_EXTENT);
    let center = bounds.center();

    cuboid(
        Point3::new(center.x, center.y, bounds.min.z - GROUND_THICKNESS / 2.0),
        Vector3::new(extent_x, extent_y, GROUND_THICKNESS),
    )
}
