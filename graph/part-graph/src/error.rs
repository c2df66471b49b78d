//! Error types for part-graph analysis.

use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while building or analyzing part graphs.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Mesh loading or decomposition failed.
    #[error(transparent)]
    Mesh(#[from] part_mesh::MeshError),

    /// The input mesh split into zero parts.
    ///
    /// The predicate fails closed: an object with nothing to analyze is
    /// treated as malformed input rather than as trivially rooted.
    #[error("mesh decomposed into zero parts")]
    EmptyDecomposition,

    /// A proximity threshold that cannot be used.
    #[error("invalid proximity threshold: {message}")]
    InvalidThreshold {
        /// Why the threshold was rejected.
        message: String,
    },

    /// A part's geometry was rejected by the collision library.
    #[error("part {part}: collision shape construction failed: {message}")]
    ShapeConstruction {
        /// Graph node index of the offending part.
        part: usize,
        /// The collision library's diagnostic.
        message: String,
    },

    /// The distance query returned a non-finite or negative value.
    ///
    /// Distinct from "not adjacent": a nonsensical distance must never be
    /// silently treated as "far apart".
    #[error("distance between parts {first} and {second} is not a valid distance: {distance}")]
    InvalidDistance {
        /// First graph node index.
        first: usize,
        /// Second graph node index.
        second: usize,
        /// The offending value.
        distance: f64,
    },

    /// The collision library does not support this shape pairing.
    #[error("distance query unsupported between parts {first} and {second}")]
    DistanceUnsupported {
        /// First graph node index.
        first: usize,
        /// Second graph node index.
        second: usize,
    },

    /// A spanning tree was requested over an empty component.
    #[error("cannot build a hierarchy over an empty component")]
    EmptyComponent,

    /// The requested hierarchy root is not a member of the component.
    #[error("hierarchy root {root} is not a member of the component")]
    RootNotInComponent {
        /// The requested root id.
        root: usize,
    },

    /// A component was not fully reachable from its root.
    ///
    /// Indicates the id set and the adjacency graph disagree; a valid
    /// partition can never trigger this.
    #[error("component of size {expected} only reached {reached} ids from its root")]
    DisconnectedComponent {
        /// Number of ids in the component.
        expected: usize,
        /// Number of ids the traversal reached.
        reached: usize,
    },
}

impl GraphError {
    /// Create an `InvalidThreshold` error with the given message.
    #[must_use]
    pub fn invalid_threshold(message: impl Into<String>) -> Self {
        Self::InvalidThreshold {
            message: message.into(),
        }
    }
}
