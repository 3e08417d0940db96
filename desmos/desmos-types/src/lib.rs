//! Scene-data types for the Desmos expression exporter.
//!
//! This crate holds the vocabulary shared between the exporter and whatever
//! host supplies scene data:
//!
//! - [`Axis`] / [`AxisSet`] - coordinate axes and per-axis toggles
//! - [`PolygonMesh`] / [`Polygon`] - meshes with variable-arity faces
//! - [`Transform`], [`TransformQuery`], [`TransformSample`] - per-frame transforms
//! - [`EulerOrder`], [`RotationUnit`], [`TransformSpace`] - how rotations are read
//! - [`MeshSource`] / [`TransformSampler`] - collaborator interfaces
//!
//! # Layer 0 Crate
//!
//! This crate has no host or UI dependencies. Hosts implement the two
//! collaborator traits; the exporter only calls them.
//!
//! # Coordinate System
//!
//! Values are passed through unchanged; the host's up axis is preserved.
//!
//! # Example
//!
//! ```
//! use desmos_types::{EulerOrder, Vector3};
//!
//! let angles = Vector3::new(0.1, 0.2, 0.3);
//! let rotation = EulerOrder::ZYX.compose(&angles);
//! let back = EulerOrder::ZYX.decompose(&rotation);
//! assert!((back - angles).norm() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod axis;
mod polygon;
mod traits;
mod transform;

pub use axis::{Axis, AxisSet};
pub use polygon::{Polygon, PolygonMesh};
pub use traits::{MeshSource, TransformSampler};
pub use transform::{
    EulerOrder, RotationUnit, Transform, TransformQuery, TransformSample, TransformSpace,
};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Rotation3, Vector3};
