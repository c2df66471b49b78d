//! Rootedness: is every part reachable from the ground?

use std::path::Path;

use crate::adjacency::{build_rooted_adjacency, AdjacencyGraph, GROUND};
use crate::error::{GraphError, GraphResult};
use crate::part::split_into_parts;
use crate::threshold::ProximityThreshold;

/// Whether every node of a rooted adjacency graph is reachable from the
/// ground node.
///
/// Any traversal order gives the same answer; this one is an iterative
/// DFS with per-node visited marking. A graph containing only the ground
/// node is vacuously rooted — the pipelines reject that case earlier as
/// an empty decomposition.
#[must_use]
pub fn is_rooted(graph: &AdjacencyGraph) -> bool {
    let n = graph.node_count();
    if n == 0 {
        return false;
    }

    let mut visited = vec![false; n];
    let mut stack = vec![GROUND];
    visited[GROUND] = true;
    while let Some(id) = stack.pop() {
        for neighbor in graph.neighbors(id) {
            if !visited[neighbor] {
                visited[neighbor] = true;
                stack.push(neighbor);
            }
        }
    }

    visited.iter().all(|&v| v)
}

/// Check whether the object in an OBJ file is rooted.
///
/// Loads the mesh (converting from the on-disk y-up convention to z-up),
/// splits it into parts, inserts the synthetic ground slab, builds the
/// proximity graph at the given threshold, and tests reachability from
/// the ground.
///
/// The predicate fails closed: every internal error propagates rather
/// than defaulting to `false`.
///
/// # Errors
///
/// - Mesh loading/parsing failures.
/// - [`GraphError::EmptyDecomposition`] when the mesh splits into zero
///   parts.
/// - Threshold, collision-shape, and distance-query failures from
///   [`build_rooted_adjacency`].
///
/// # Example
///
/// ```no_run
/// use part_graph::{check_rooted, ProximityThreshold};
///
/// let rooted = check_rooted("tower.obj", ProximityThreshold::Absolute(1e-3)).unwrap();
/// println!("rooted: {rooted}");
/// ```
pub fn check_rooted<P: AsRef<Path>>(
    path: P,
    threshold: ProximityThreshold,
) -> GraphResult<bool> {
    let mut mesh = part_mesh::load_obj(path.as_ref())?;
    mesh.swap_yup_to_zup();

    let parts = split_into_parts(&mesh);
    if parts.is_empty() {
        return Err(GraphError::EmptyDecomposition);
    }

    let graph = build_rooted_adjacency(&parts, threshold)?;
    let rooted = is_rooted(&graph);

    tracing::info!(
        parts = parts.len(),
        rooted,
        path = %path.as_ref().display(),
        "rootedness check complete"
    );

    Ok(rooted)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn fully_reachable_graph_is_rooted() {
        let mut graph = AdjacencyGraph::with_nodes(3);
        graph.insert_edge(GROUND, 1);
        graph.insert_edge(1, 2);
        assert!(is_rooted(&graph));
    }

    #[test]
    fn unreachable_node_breaks_rootedness() {
        let mut graph = AdjacencyGraph::with_nodes(3);
        graph.insert_edge(GROUND, 1);
        assert!(!is_rooted(&graph));
    }

    #[test]
    fn ground_only_graph_is_vacuously_rooted() {
        let graph = AdjacencyGraph::with_nodes(1);
        assert!(is_rooted(&graph));
    }

    #[test]
    fn empty_graph_is_not_rooted() {
        let graph = AdjacencyGraph::with_nodes(0);
        assert!(!is_rooted(&graph));
    }
}
