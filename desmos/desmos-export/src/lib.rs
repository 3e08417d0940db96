//! Encode meshes and animation samples as Desmos expressions.
//!
//! This crate turns scene data (vertex coordinates, polygon corner lists,
//! per-polygon centers, normals and materials, per-frame transforms) into
//! one of two documents:
//!
//! - **Text**: one `identifier=\left[..\right]` assignment per line, pasted
//!   into the calculator by hand
//! - **Structured**: a console script that appends a hidden folder of
//!   tables to the calculator state
//!
//! Scene data is read through the [`MeshSource`] and [`TransformSampler`]
//! traits from `desmos-types`. [`StaticScene`] implements both for data
//! held in memory.
//!
//! # Pipeline
//!
//! 1. Every selected object is assembled into an [`ObjectRecord`]
//! 2. The records form an [`ExportSession`]
//! 3. The session is serialized into an [`ExportDocument`]
//!
//! Any failure aborts the export before serialization starts. A polygon
//! with more than four corners is not a failure: the document is still
//! written and [`ExportDocument::warning`] reports it.
//!
//! # Example
//!
//! ```
//! use desmos_export::{
//!     export_scene, AxisSet, ExportParams, Point3, PolygonMesh, SceneObject, StaticScene,
//! };
//!
//! let mesh = PolygonMesh::from_polygons(
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.5, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)],
//!     vec![vec![0, 1, 2]],
//! )
//! .unwrap();
//! let mut scene = StaticScene::new().with_object(SceneObject::new("Tri", mesh));
//!
//! let params = ExportParams::default().with_axes(AxisSet::new(true, true, false));
//! let document = export_scene(&mut scene, ["Tri"], &params, None).unwrap();
//!
//! assert!(document
//!     .contents
//!     .contains("Tri\nx_{1}=\\left[0,.5,0\\right]\ny_{1}=\\left[0,0,2\\right]\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod assemble;
mod error;
mod face;
mod ident;
mod number;
mod params;
mod pipeline;
mod record;
mod result;
mod scene;
mod sequence;
mod serialize;
mod session;

// Re-export main types and functions
pub use assemble::{
    ATTACHED_NORMAL_SCALE, AssembledObject, assemble_animation, assemble_geometry,
    assemble_object, attach_normals,
};
pub use error::{ExportError, ExportResult};
pub use face::{CORNER_SENTINEL, FaceTable, MAX_PLAIN_CORNERS, build_face_table};
pub use ident::{IdentifierScheme, Quantity, name_prefix, object_prefixes};
pub use number::{INFINITY_TOKEN, ROUNDED_DIGITS, format_number};
pub use params::{
    AnimationParams, ChannelParams, ExportParams, FrameRange, GeometryParams, NamingMode,
    OutputFormat, Precision,
};
pub use pipeline::{export, export_scene};
pub use record::{
    AnimationChannel, AxisBlock, MidpointBlock, NormalBlock, ObjectRecord, VertexBlock,
};
pub use result::{ExportDocument, FACE_TOO_LARGE_WARNING};
pub use scene::{Keyframe, SceneError, SceneObject, StaticScene};
pub use sequence::{
    EncodedSequence, LIST_CLOSE, LIST_OPEN, SequenceTarget, encode_column, encode_expression,
    encode_sequence,
};
pub use serialize::{
    DocumentSink, ScriptCall, ScriptValue, TEXT_HEADER_TIP, TIMESTAMP_FORMAT, TitleOverride,
    serialize, walk_session, write_script_value, write_structured, write_text,
};
pub use session::ExportSession;

pub use desmos_types::{
    Axis, AxisSet, EulerOrder, MeshSource, Polygon, PolygonMesh, RotationUnit, Transform,
    TransformQuery, TransformSample, TransformSampler, TransformSpace,
};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
