//! Error types for export operations.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Errors that abort an export.
///
/// An export either produces a complete document or one of these; nothing
/// is emitted from a partially assembled session.
#[derive(Debug, Error)]
pub enum ExportError {
    /// NaN or negative infinity passed to the number formatter.
    #[error("cannot encode non-finite value {value}")]
    NonFiniteValue {
        /// The offending value.
        value: f64,
    },

    /// Scene data contained a non-finite number.
    #[error("{quantity} of '{object}' contains non-finite value {value}")]
    NonFiniteInput {
        /// Object the value belongs to.
        object: String,
        /// Quantity being assembled (for example `"vertices"`).
        quantity: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The same object was selected twice.
    #[error("object '{name}' is selected more than once")]
    DuplicateObject {
        /// Repeated object name.
        name: String,
    },

    /// A polygon references a vertex the mesh does not have.
    #[error("polygon {polygon} of '{object}' references vertex {corner} of {vertex_count}")]
    CornerOutOfRange {
        /// Object the polygon belongs to.
        object: String,
        /// 0-based polygon index.
        polygon: usize,
        /// 0-based vertex index referenced.
        corner: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Two blocks that must be index-aligned differ in length.
    #[error("{quantity} of '{object}' has {got} entries, expected {expected}")]
    MisalignedBlock {
        /// Object the blocks belong to.
        object: String,
        /// Quantity being combined.
        quantity: &'static str,
        /// Expected entry count.
        expected: usize,
        /// Actual entry count.
        got: usize,
    },

    /// A scene collaborator could not supply mesh or frame data.
    #[error("scene data for '{object}' is unavailable: {source}")]
    Scene {
        /// Object being read.
        object: String,
        /// The collaborator's error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// JSON escaping failed while writing the structured document.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    /// Wrap a collaborator error for `object`.
    #[must_use]
    pub fn scene(
        object: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Scene {
            object: object.into(),
            source: Box::new(source),
        }
    }
}
