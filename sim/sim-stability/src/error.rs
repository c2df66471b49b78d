//! Error types for stability evaluation.

use thiserror::Error;

/// Result type for stability operations.
pub type StabilityResult<T> = Result<T, StabilityError>;

/// Errors that can occur while evaluating stability.
#[derive(Debug, Error)]
pub enum StabilityError {
    /// Rootedness analysis failed.
    #[error(transparent)]
    Graph(#[from] part_graph::GraphError),

    /// Assembly building or document emission failed.
    #[error(transparent)]
    Export(#[from] urdf_export::ExportError),

    /// A part's geometry was rejected by the physics engine.
    ///
    /// Surfaced during world construction, before any simulation step is
    /// attempted.
    #[error("part {part}: simulator rejected collision geometry: {message}")]
    CollisionShape {
        /// Id of the offending part.
        part: usize,
        /// The engine's diagnostic.
        message: String,
    },

    /// A fixed joint could not be inserted between two part bodies.
    #[error("could not create fixed joint between parts {parent} and {child}")]
    JointInsertion {
        /// Parent part id.
        parent: usize,
        /// Child part id.
        child: usize,
    },

    /// Configuration that cannot drive a simulation.
    #[error("invalid stability configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// I/O error (scoped export directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StabilityError {
    /// Create an `InvalidConfig` error with the given message.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
