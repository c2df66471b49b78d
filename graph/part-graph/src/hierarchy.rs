//! Spanning-tree joint hierarchies.

use hashbrown::{HashMap, HashSet};

use crate::adjacency::AdjacencyGraph;
use crate::error::{GraphError, GraphResult};

/// A rooted spanning tree over one connected component.
///
/// Every non-root id has exactly one parent, every tree edge is an
/// adjacency edge, and a component of size `k` yields exactly `k − 1`
/// edges. Edges are stored in discovery order, which is deterministic
/// because adjacency sets iterate in ascending order.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    root: usize,
    edges: Vec<(usize, usize)>,
    parent: HashMap<usize, usize>,
}

impl Hierarchy {
    /// Build the spanning tree of `component` within `graph` by
    /// depth-first traversal.
    ///
    /// `root` defaults to the component's minimum id when not supplied.
    ///
    /// # Errors
    ///
    /// - [`GraphError::EmptyComponent`] for an empty id set.
    /// - [`GraphError::RootNotInComponent`] when an explicit root is not a
    ///   member.
    /// - [`GraphError::DisconnectedComponent`] when the ids are not
    ///   mutually reachable (a valid partition never triggers this).
    pub fn span(
        component: &[usize],
        graph: &AdjacencyGraph,
        root: Option<usize>,
    ) -> GraphResult<Self> {
        let members: HashSet<usize> = component.iter().copied().collect();
        let root = match root {
            Some(id) => {
                if !members.contains(&id) {
                    return Err(GraphError::RootNotInComponent { root: id });
                }
                id
            }
            None => *component
                .iter()
                .min()
                .ok_or(GraphError::EmptyComponent)?,
        };

        let mut edges = Vec::with_capacity(component.len().saturating_sub(1));
        let mut parent = HashMap::with_capacity(component.len());
        let mut visited: HashSet<usize> = HashSet::with_capacity(component.len());
        let mut stack = vec![root];
        visited.insert(root);

        while let Some(id) = stack.pop() {
            for neighbor in graph.neighbors(id) {
                if members.contains(&neighbor) && visited.insert(neighbor) {
                    parent.insert(neighbor, id);
                    edges.push((id, neighbor));
                    stack.push(neighbor);
                }
            }
        }

        if visited.len() != component.len() {
            return Err(GraphError::DisconnectedComponent {
                expected: component.len(),
                reached: visited.len(),
            });
        }

        Ok(Self {
            root,
            edges,
            parent,
        })
    }

    /// The tree's root id.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> usize {
        self.root
    }

    /// Tree edges as `(parent, child)` pairs in discovery order.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// The parent of `id`, or `None` for the root (and non-members).
    #[must_use]
    pub fn parent_of(&self, id: usize) -> Option<usize> {
        self.parent.get(&id).copied()
    }

    /// Number of ids spanned (edges + root).
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len() + 1
    }

    /// A hierarchy always spans at least its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn path_graph(n: usize) -> AdjacencyGraph {
        let mut graph = AdjacencyGraph::with_nodes(n);
        for i in 1..n {
            graph.insert_edge(i - 1, i);
        }
        graph
    }

    #[test]
    fn path_spans_as_path() {
        let graph = path_graph(3);
        let tree = Hierarchy::span(&[0, 1, 2], &graph, None).unwrap();
        assert_eq!(tree.root(), 0);
        assert_eq!(tree.edges(), &[(0, 1), (1, 2)]);
        assert_eq!(tree.parent_of(2), Some(1));
        assert_eq!(tree.parent_of(0), None);
    }

    #[test]
    fn spanning_tree_has_k_minus_one_edges() {
        // Complete-ish graph: extra edges must not produce extra tree edges.
        let mut graph = AdjacencyGraph::with_nodes(5);
        for a in 0..5 {
            for b in (a + 1)..5 {
                graph.insert_edge(a, b);
            }
        }
        let component: Vec<usize> = (0..5).collect();
        let tree = Hierarchy::span(&component, &graph, None).unwrap();
        assert_eq!(tree.edges().len(), 4);

        // Acyclic and connected: every non-root reaches the root by parents.
        for id in 1..5 {
            let mut cur = id;
            let mut hops = 0;
            while let Some(p) = tree.parent_of(cur) {
                cur = p;
                hops += 1;
                assert!(hops <= 5, "parent chain must terminate");
            }
            assert_eq!(cur, tree.root());
        }
    }

    #[test]
    fn every_tree_edge_is_an_adjacency_edge() {
        let mut graph = AdjacencyGraph::with_nodes(4);
        graph.insert_edge(0, 1);
        graph.insert_edge(0, 2);
        graph.insert_edge(2, 3);
        let tree = Hierarchy::span(&[0, 1, 2, 3], &graph, None).unwrap();
        for &(p, c) in tree.edges() {
            assert!(graph.contains_edge(p, c));
        }
    }

    #[test]
    fn explicit_root_is_honored() {
        let graph = path_graph(3);
        let tree = Hierarchy::span(&[0, 1, 2], &graph, Some(2)).unwrap();
        assert_eq!(tree.root(), 2);
        assert_eq!(tree.edges(), &[(2, 1), (1, 0)]);
    }

    #[test]
    fn foreign_root_is_rejected() {
        let graph = path_graph(3);
        let err = Hierarchy::span(&[0, 1, 2], &graph, Some(9)).unwrap_err();
        assert!(matches!(err, GraphError::RootNotInComponent { root: 9 }));
    }

    #[test]
    fn empty_component_is_rejected() {
        let graph = path_graph(1);
        let err = Hierarchy::span(&[], &graph, None).unwrap_err();
        assert!(matches!(err, GraphError::EmptyComponent));
    }

    #[test]
    fn disconnected_ids_are_rejected() {
        let graph = AdjacencyGraph::with_nodes(2);
        let err = Hierarchy::span(&[0, 1], &graph, None).unwrap_err();
        assert!(matches!(
            err,
            GraphError::DisconnectedComponent {
                expected: 2,
                reached: 1
            }
        ));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut graph = AdjacencyGraph::with_nodes(6);
        graph.insert_edge(0, 1);
        graph.insert_edge(0, 2);
        graph.insert_edge(1, 3);
        graph.insert_edge(2, 4);
        graph.insert_edge(4, 5);
        let component: Vec<usize> = (0..6).collect();

        let first = Hierarchy::span(&component, &graph, None).unwrap();
        let second = Hierarchy::span(&component, &graph, None).unwrap();
        assert_eq!(first.edges(), second.edges());
    }
}
