//! Collaborator interfaces the exporter reads scene data through.

use crate::{PolygonMesh, TransformQuery, TransformSample};

/// Supplies already-extracted mesh data for named objects.
pub trait MeshSource {
    /// Error reported when an object's mesh cannot be read.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Mesh of `object`, fan-triangulated first when `triangulate` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is unknown or has no mesh data.
    fn mesh(&self, object: &str, triangulate: bool) -> Result<PolygonMesh, Self::Error>;
}

/// Reads per-frame transforms of named objects.
///
/// Sampling advances the host's scene state, so a pass requests frames in
/// strictly increasing order. When the pass ends, successfully or not, the
/// caller invokes [`TransformSampler::restore`] exactly once.
pub trait TransformSampler {
    /// Error reported when a frame cannot be sampled.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Transform of `object` at `frame`.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is unknown or the frame cannot be
    /// evaluated.
    fn sample(
        &mut self,
        object: &str,
        frame: i32,
        query: &TransformQuery,
    ) -> Result<TransformSample, Self::Error>;

    /// Return the scene to the frame it was at before sampling began.
    fn restore(&mut self) {}
}
