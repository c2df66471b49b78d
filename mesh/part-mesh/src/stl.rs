//! Binary STL export.
//!
//! The decomposition pipeline exports one STL per part for the URDF link
//! descriptions to reference. Only the binary variant is written:
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::MeshResult;
use crate::TriMesh;

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Save a mesh as a binary STL file.
///
/// Face normals are recomputed from the winding; degenerate triangles get
/// a zero normal, which downstream loaders tolerate.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use part_mesh::{cuboid, save_stl};
/// use nalgebra::{Point3, Vector3};
///
/// let mesh = cuboid(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
/// save_stl(&mesh, "part_0.stl").unwrap();
/// ```
#[allow(clippy::cast_possible_truncation)]
// Truncation: face counts beyond u32::MAX are unsupported by the format
pub fn save_stl<P: AsRef<Path>>(mesh: &TriMesh, path: P) -> MeshResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    let mut header = [0u8; HEADER_SIZE];
    let tag = b"part-mesh binary STL";
    header[..tag.len()].copy_from_slice(tag);
    writer.write_all(&header)?;
    writer.write_all(&(mesh.faces.len() as u32).to_le_bytes())?;

    for &[i0, i1, i2] in &mesh.faces {
        let a = mesh.vertices[i0 as usize];
        let b = mesh.vertices[i1 as usize];
        let c = mesh.vertices[i2 as usize];

        let cross = (b - a).cross(&(c - a));
        let normal = if cross.norm() > f64::EPSILON {
            cross.normalize()
        } else {
            cross
        };

        write_vec3(&mut writer, normal.x, normal.y, normal.z)?;
        write_vec3(&mut writer, a.x, a.y, a.z)?;
        write_vec3(&mut writer, b.x, b.y, b.z)?;
        write_vec3(&mut writer, c.x, c.y, c.z)?;
        writer.write_all(&0u16.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// Write three coordinates as little-endian f32.
#[allow(clippy::cast_possible_truncation)]
// Truncation: the STL format stores single-precision floats
fn write_vec3<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> MeshResult<()> {
    writer.write_all(&(x as f32).to_le_bytes())?;
    writer.write_all(&(y as f32).to_le_bytes())?;
    writer.write_all(&(z as f32).to_le_bytes())?;
    Ok(())
}
