//! Splitting a mesh into maximal connected surface pieces.
//!
//! Two faces belong to the same piece when they share a vertex
//! *position*. Positions are welded by exact bit pattern first, so meshes
//! whose parts duplicate vertices per face (triangle-soup exports) still
//! split into the intended pieces.

use hashbrown::HashMap;

use crate::TriMesh;

/// Disjoint-set forest with path compression.
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let parent = (0..len as u32).collect();
        Self { parent }
    }

    fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Compress the walked path.
        let mut cur = x;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb as usize] = ra;
        }
    }
}

/// Split a mesh into its maximal connected surface pieces.
///
/// Pieces are ordered by their first face's position in the input mesh,
/// so the result is deterministic for a given input. Each piece gets a
/// compacted vertex table; vertices not referenced by any face are
/// dropped.
///
/// An empty mesh yields an empty vector.
///
/// # Example
///
/// ```
/// use part_mesh::{cuboid, split_surface_pieces};
/// use nalgebra::{Point3, Vector3};
///
/// let mut mesh = cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0));
/// mesh.merge(&cuboid(Point3::new(3.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0)));
///
/// let pieces = split_surface_pieces(&mesh);
/// assert_eq!(pieces.len(), 2);
/// assert_eq!(pieces[0].face_count(), 12);
/// ```
#[must_use]
pub fn split_surface_pieces(mesh: &TriMesh) -> Vec<TriMesh> {
    if mesh.faces.is_empty() {
        return Vec::new();
    }

    // Weld vertices by exact position so duplicated vertices connect.
    let mut welded: HashMap<[u64; 3], u32> = HashMap::with_capacity(mesh.vertices.len());
    let mut weld_of = Vec::with_capacity(mesh.vertices.len());
    for (i, v) in mesh.vertices.iter().enumerate() {
        let key = [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()];
        #[allow(clippy::cast_possible_truncation)]
        let id = *welded.entry(key).or_insert(i as u32);
        weld_of.push(id);
    }

    let mut sets = UnionFind::new(mesh.vertices.len());
    for face in &mesh.faces {
        let a = weld_of[face[0] as usize];
        let b = weld_of[face[1] as usize];
        let c = weld_of[face[2] as usize];
        sets.union(a, b);
        sets.union(a, c);
    }

    // Group faces by component root, keyed in order of first appearance.
    let mut piece_of_root: HashMap<u32, usize> = HashMap::new();
    let mut pieces: Vec<TriMesh> = Vec::new();
    let mut vertex_remap: Vec<HashMap<u32, u32>> = Vec::new();

    for face in &mesh.faces {
        let root = sets.find(weld_of[face[0] as usize]);
        let piece_index = *piece_of_root.entry(root).or_insert_with(|| {
            pieces.push(TriMesh::new());
            vertex_remap.push(HashMap::new());
            pieces.len() - 1
        });

        let piece = &mut pieces[piece_index];
        let remap = &mut vertex_remap[piece_index];
        let mut new_face = [0u32; 3];
        for (slot, &old) in new_face.iter_mut().zip(face) {
            *slot = *remap.entry(old).or_insert_with(|| {
                piece.vertices.push(mesh.vertices[old as usize]);
                #[allow(clippy::cast_possible_truncation)]
                let fresh = (piece.vertices.len() - 1) as u32;
                fresh
            });
        }
        piece.faces.push(new_face);
    }

    tracing::debug!(pieces = pieces.len(), "split mesh into surface pieces");

    pieces
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::cuboid;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn empty_mesh_has_no_pieces() {
        assert!(split_surface_pieces(&TriMesh::new()).is_empty());
    }

    #[test]
    fn single_cuboid_is_one_piece() {
        let mesh = cuboid(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        let pieces = split_surface_pieces(&mesh);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].vertex_count(), 8);
        assert_relative_eq!(pieces[0].signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn three_disjoint_cuboids_split_in_order() {
        let mut mesh = cuboid(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        mesh.merge(&cuboid(Point3::new(5.0, 0.0, 0.0), Vector3::new(2.0, 1.0, 1.0)));
        mesh.merge(&cuboid(Point3::new(10.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 3.0)));

        let pieces = split_surface_pieces(&mesh);
        assert_eq!(pieces.len(), 3);
        // Order follows the first face of each piece.
        assert_relative_eq!(pieces[0].centroid().x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pieces[1].centroid().x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(pieces[2].centroid().x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(pieces[1].volume(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn duplicated_vertices_still_connect() {
        // Two triangles sharing an edge by position only (soup style).
        let mesh = TriMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                // Same edge positions, fresh indices.
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 5, 4]],
        );

        let pieces = split_surface_pieces(&mesh);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].face_count(), 2);
    }

    #[test]
    fn touching_but_vertex_disjoint_cuboids_stay_separate() {
        // Face-to-face contact without shared vertex positions: distinct
        // pieces, exactly what the proximity graph is for.
        let mut mesh = cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0));
        mesh.merge(&cuboid(Point3::new(0.25, 0.0, 1.5), Vector3::new(0.5, 0.5, 1.0)));

        let pieces = split_surface_pieces(&mesh);
        assert_eq!(pieces.len(), 2);
    }
}
