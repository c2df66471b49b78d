//! Indexed triangle mesh and derived measures.

use nalgebra::{Point3, Vector3};

use crate::Aabb;

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by index. Faces use counter-clockwise winding when viewed from
/// outside, so normals point outward by the right-hand rule.
///
/// # Example
///
/// ```
/// use part_mesh::TriMesh;
/// use nalgebra::Point3;
///
/// let mut mesh = TriMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Triangle faces as indices into the vertex array, CCW winding.
    pub faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Axis-aligned bounds of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// Length of the bounding-box diagonal.
    ///
    /// Used as the object's overall scale when resolving relative
    /// proximity thresholds.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.bounds().diagonal()
    }

    /// Compute the signed volume of the mesh.
    ///
    /// Sum of signed tetrahedra volumes formed by each face and the
    /// origin (divergence theorem). Positive for a closed mesh with
    /// outward-facing normals; not meaningful for open meshes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;

        for &[i0, i1, i2] in &self.faces {
            let v0 = &self.vertices[i0 as usize].coords;
            let v1 = &self.vertices[i1 as usize].coords;
            let v2 = &self.vertices[i2 as usize].coords;
            volume += v0.dot(&v1.cross(v2));
        }

        volume / 6.0
    }

    /// Absolute volume of the mesh.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Total surface area of the mesh.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.faces
            .iter()
            .map(|&[i0, i1, i2]| {
                let a = self.vertices[i0 as usize];
                let b = self.vertices[i1 as usize];
                let c = self.vertices[i2 as usize];
                (b - a).cross(&(c - a)).norm() * 0.5
            })
            .sum()
    }

    /// Surface centroid: the area-weighted average of triangle centers.
    ///
    /// Falls back to the plain vertex average when the total area is
    /// degenerate.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        let mut weighted = Vector3::zeros();
        let mut total_area = 0.0;

        for &[i0, i1, i2] in &self.faces {
            let a = self.vertices[i0 as usize];
            let b = self.vertices[i1 as usize];
            let c = self.vertices[i2 as usize];
            let area = (b - a).cross(&(c - a)).norm() * 0.5;
            let center = (a.coords + b.coords + c.coords) / 3.0;
            weighted += center * area;
            total_area += area;
        }

        if total_area > f64::EPSILON {
            Point3::from(weighted / total_area)
        } else if self.vertices.is_empty() {
            Point3::origin()
        } else {
            #[allow(clippy::cast_precision_loss)]
            let n = self.vertices.len() as f64;
            Point3::from(self.vertices.iter().map(|p| p.coords).sum::<Vector3<f64>>() / n)
        }
    }

    /// Translate the mesh by the given vector.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }

    /// Convert from a y-up to a z-up frame.
    ///
    /// Swaps each vertex's Y and Z components. The swap is a reflection
    /// (determinant −1) and would turn the mesh inside out, so each face's
    /// winding is reversed as well, keeping normals outward.
    pub fn swap_yup_to_zup(&mut self) {
        for vertex in &mut self.vertices {
            let y = vertex.y;
            vertex.y = vertex.z;
            vertex.z = y;
        }
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }

    /// Merge another mesh into this one.
    ///
    /// The other mesh's vertices and faces are appended, with face indices
    /// offset appropriately.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, vertex counts > 4B are unsupported
    pub fn merge(&mut self, other: &Self) {
        let vertex_offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        for face in &other.faces {
            self.faces.push([
                face[0] + vertex_offset,
                face[1] + vertex_offset,
                face[2] + vertex_offset,
            ]);
        }
    }
}

/// Build a closed axis-aligned cuboid mesh.
///
/// `extents` are the full side lengths; the cuboid is centered at `center`.
/// Faces wind counter-clockwise viewed from outside.
///
/// # Example
///
/// ```
/// use part_mesh::cuboid;
/// use nalgebra::{Point3, Vector3};
/// use approx::assert_relative_eq;
///
/// let unit = cuboid(Point3::new(0.5, 0.5, 0.5), Vector3::new(1.0, 1.0, 1.0));
/// assert_eq!(unit.face_count(), 12);
/// assert_relative_eq!(unit.signed_volume(), 1.0, epsilon = 1e-12);
/// ```
#[must_use]
pub fn cuboid(center: Point3<f64>, extents: Vector3<f64>) -> TriMesh {
    let h = extents / 2.0;
    let mut mesh = TriMesh::with_capacity(8, 12);

    for &dz in &[-h.z, h.z] {
        for &dy in &[-h.y, h.y] {
            for &dx in &[-h.x, h.x] {
                mesh.vertices
                    .push(Point3::new(center.x + dx, center.y + dy, center.z + dz));
            }
        }
    }

    // Vertex layout: bit 0 = +x, bit 1 = +y, bit 2 = +z.
    mesh.faces.extend_from_slice(&[
        // Bottom (z = -h.z), normal -Z
        [0, 2, 1],
        [1, 2, 3],
        // Top (z = +h.z), normal +Z
        [4, 5, 6],
        [5, 7, 6],
        // Front (y = -h.y), normal -Y
        [0, 1, 4],
        [1, 5, 4],
        // Back (y = +h.y), normal +Y
        [2, 6, 3],
        [3, 6, 7],
        // Left (x = -h.x), normal -X
        [0, 4, 2],
        [2, 4, 6],
        // Right (x = +h.x), normal +X
        [1, 3, 5],
        [3, 7, 5],
    ]);

    mesh
}
