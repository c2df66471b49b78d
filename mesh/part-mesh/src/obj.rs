//! Wavefront OBJ file format support.
//!
//! Only the geometry records matter for part decomposition:
//!
//! ```text
//! v  x y z [w]      – vertex position (w ignored)
//! f  a b c ...      – polygon face; vertex references may be `v`,
//!                     `v/vt`, `v//vn`, or `v/vt/vn`; 1-based, negative
//!                     indices count back from the current vertex table
//! ```
//!
//! All other records (`vn`, `vt`, `o`, `g`, `s`, `usemtl`, `mtllib`,
//! comments) are skipped. Polygon faces are fan-triangulated.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, MeshResult};
use crate::TriMesh;

/// Load a mesh from a Wavefront OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a vertex or face record is
/// malformed, or a face references a vertex that does not exist.
///
/// # Example
///
/// ```no_run
/// use part_mesh::load_obj;
///
/// let mesh = load_obj("model.obj").unwrap();
/// println!("loaded {} faces", mesh.face_count());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<TriMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MeshError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MeshError::Io(e)
        }
    })?;

    let reader = BufReader::new(file);
    let mut mesh = TriMesh::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let mut coord = |axis: &str| -> MeshResult<f64> {
                    tokens
                        .next()
                        .ok_or_else(|| {
                            MeshError::invalid_content(format!(
                                "vertex record missing {axis} coordinate: '{trimmed}'"
                            ))
                        })?
                        .parse::<f64>()
                        .map_err(MeshError::from)
                };
                let x = coord("x")?;
                let y = coord("y")?;
                let z = coord("z")?;
                mesh.vertices.push(Point3::new(x, y, z));
            }
            Some("f") => {
                let face_no = mesh.faces.len();
                let mut indices = Vec::with_capacity(4);
                for token in tokens {
                    indices.push(resolve_index(token, face_no, mesh.vertices.len())?);
                }
                if indices.len() < 3 {
                    return Err(MeshError::invalid_content(format!(
                        "face record with fewer than 3 vertices: '{trimmed}'"
                    )));
                }
                // Fan triangulation for polygons.
                for i in 1..indices.len() - 1 {
                    mesh.faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
            _ => {}
        }
    }

    tracing::debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        path = %path.display(),
        "loaded OBJ mesh"
    );

    Ok(mesh)
}

/// Resolve one face vertex reference (`v`, `v/vt`, `v//vn`, `v/vt/vn`)
/// to a zero-based index into the vertex table.
fn resolve_index(token: &str, face: usize, vertex_count: usize) -> MeshResult<u32> {
    let position = token.split('/').next().unwrap_or(token);
    let raw: i64 = position.parse()?;

    #[allow(clippy::cast_possible_wrap)]
    let upper = vertex_count as i64;
    let resolved = if raw < 0 { upper + raw } else { raw - 1 };

    if resolved < 0 || resolved >= upper {
        return Err(MeshError::IndexOutOfRange {
            face,
            index: resolved,
            vertex_count,
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = resolved as u32;
    Ok(index)
}

/// Save a mesh as a Wavefront OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_obj<P: AsRef<Path>>(mesh: &TriMesh, path: P) -> MeshResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for f in &mesh.faces {
        writeln!(writer, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1)?;
    }

    writer.flush()?;
    Ok(())
}
