//! Rigid parts: one maximal connected surface piece plus derived measures.

use nalgebra::{Point3, Vector3};
use part_mesh::{split_surface_pieces, Aabb, TriMesh};

/// One rigid part of a decomposed object.
///
/// Created once by [`split_into_parts`]; the geometry is immutable except
/// for the one-time recentering translation applied during assembly
/// emission. Volume, centroid, and bounds are cached on construction and
/// kept consistent by [`translate`](Self::translate).
#[derive(Debug, Clone)]
pub struct Part {
    id: usize,
    mesh: TriMesh,
    volume: f64,
    centroid: Point3<f64>,
    bounds: Aabb,
}

impl Part {
    /// Wrap a mesh piece as a part with the given id.
    #[must_use]
    pub fn from_mesh(id: usize, mesh: TriMesh) -> Self {
        let volume = mesh.volume();
        let centroid = mesh.centroid();
        let bounds = mesh.bounds();
        Self {
            id,
            mesh,
            volume,
            centroid,
            bounds,
        }
    }

    /// Part identifier (position in the decomposition order).
    #[inline]
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// The part's surface geometry.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    /// Enclosed volume of the part.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> f64 {
        self.volume
    }

    /// Surface centroid of the part.
    #[inline]
    #[must_use]
    pub const fn centroid(&self) -> Point3<f64> {
        self.centroid
    }

    /// Axis-aligned bounds of the part.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Translate the part, keeping cached measures consistent.
    ///
    /// Used exactly once per part, when an assembly is recentered for
    /// emission.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.mesh.translate(offset);
        self.centroid += offset;
        self.bounds = Aabb::new(self.bounds.min + offset, self.bounds.max + offset);
    }
}

/// Split a mesh into its rigid parts.
///
/// Thin wrapper over [`split_surface_pieces`] that assigns ids in
/// decomposition order. Returns an empty vector for an empty mesh; the
/// pipelines treat that as an explicit error
/// ([`GraphError::EmptyDecomposition`](crate::GraphError::EmptyDecomposition)).
#[must_use]
pub fn split_into_parts(mesh: &TriMesh) -> Vec<Part> {
    split_surface_pieces(mesh)
        .into_iter()
        .enumerate()
        .map(|(id, piece)| Part::from_mesh(id, piece))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use part_mesh::cuboid;

    #[test]
    fn parts_carry_ids_in_order() {
        let mut mesh = cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0));
        mesh.merge(&cuboid(Point3::new(4.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0)));

        let parts = split_into_parts(&mesh);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].id(), 0);
        assert_eq!(parts[1].id(), 1);
        assert_relative_eq!(parts[1].centroid().x, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn translate_updates_cached_measures() {
        let mesh = cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0));
        let mut part = Part::from_mesh(0, mesh);

        part.translate(Vector3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(part.centroid().z, 2.5, epsilon = 1e-9);
        assert_relative_eq!(part.bounds().min.z, 2.0, epsilon = 1e-9);
        assert_relative_eq!(part.volume(), 1.0, epsilon = 1e-9);
    }
}
