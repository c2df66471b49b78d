//! Versioned assembly metadata records.
//!
//! Each emitted assembly carries a small JSON record next to its URDF.
//! The schema is explicit and versioned — named numeric fields instead of
//! a free-form key-value blob — so downstream consumers can evolve it
//! without guessing.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExportResult;

/// Current metadata schema version.
pub const METADATA_VERSION: u32 = 1;

/// Per-assembly record in multi-assembly mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyMetadata {
    /// Schema version.
    pub version: u32,
    /// Simulation start position (x, y, z).
    pub start_pos: [f64; 3],
    /// Scale scalar: the assembly's volume.
    pub scale: f64,
}

impl AssemblyMetadata {
    /// Record for an assembly with the given start position and scale.
    #[must_use]
    pub const fn new(start_pos: [f64; 3], scale: f64) -> Self {
        Self {
            version: METADATA_VERSION,
            start_pos,
            scale,
        }
    }
}

/// Combined record in single-assembly legacy mode.
///
/// Legacy emission skips recentering, so the only datum the simulator
/// needs is the vertical offset that rests the object on the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyMetadata {
    /// Schema version.
    pub version: u32,
    /// Vertical ground offset.
    pub z_offset: f64,
}

impl LegacyMetadata {
    /// Record with the given ground offset.
    #[must_use]
    pub const fn new(z_offset: f64) -> Self {
        Self {
            version: METADATA_VERSION,
            z_offset,
        }
    }
}

/// Write a metadata record as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn save_metadata<T: Serialize, P: AsRef<Path>>(record: &T, path: P) -> ExportResult<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, record)?;
    Ok(())
}

/// Read a metadata record back from JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not match the
/// schema.
pub fn load_metadata<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> ExportResult<T> {
    let file = File::open(path.as_ref())?;
    let record = serde_json::from_reader(BufReader::new(file))?;
    Ok(record)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn assembly_record_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assembly_0.json");

        let record = AssemblyMetadata::new([1.5, -2.0, 0.75], 3.25);
        save_metadata(&record, &path).unwrap();
        let loaded: AssemblyMetadata = load_metadata(&path).unwrap();

        assert_eq!(loaded, record);
        assert_eq!(loaded.version, METADATA_VERSION);
    }

    #[test]
    fn legacy_record_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assembly.json");

        let record = LegacyMetadata::new(0.5);
        save_metadata(&record, &path).unwrap();
        let loaded: LegacyMetadata = load_metadata(&path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn schema_fields_are_named() {
        let json = serde_json::to_string(&AssemblyMetadata::new([0.0, 0.0, 1.0], 2.0)).unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"start_pos\""));
        assert!(json.contains("\"scale\""));
    }
}
