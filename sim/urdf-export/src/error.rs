//! Error types for assembly emission.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while emitting assemblies.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Mesh loading or decomposition failed.
    #[error(transparent)]
    Mesh(#[from] part_mesh::MeshError),

    /// Graph analysis failed.
    #[error(transparent)]
    Graph(#[from] part_graph::GraphError),

    /// XML generation failed.
    #[error("URDF generation failed: {message}")]
    Xml {
        /// Description of the failure.
        message: String,
    },

    /// Metadata serialization failed.
    #[error("metadata serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Single-assembly legacy mode requires exactly one component.
    #[error("legacy single-assembly mode needs one connected component, found {count}")]
    MultipleComponents {
        /// Number of components the object decomposed into.
        count: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Create an `Xml` error with the given message.
    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }
}
