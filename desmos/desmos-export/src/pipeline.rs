//! Top-level export entry points.

use desmos_types::{MeshSource, TransformSampler};
use tracing::info;

use crate::error::ExportResult;
use crate::params::ExportParams;
use crate::result::ExportDocument;
use crate::serialize::{TitleOverride, serialize};
use crate::session::ExportSession;

/// Export `objects` using separate mesh and transform collaborators.
///
/// Nothing is serialized until every object has been assembled, so a
/// failure never yields a partial document.
///
/// # Errors
///
/// Returns the first assembly or encoding error.
pub fn export<'a, I, M, T>(
    objects: I,
    meshes: &M,
    sampler: &mut T,
    params: &ExportParams,
    title_override: Option<&TitleOverride>,
) -> ExportResult<ExportDocument>
where
    I: IntoIterator<Item = &'a str>,
    M: MeshSource + ?Sized,
    T: TransformSampler + ?Sized,
{
    log_start(params);
    let session = ExportSession::assemble(objects, meshes, sampler, params)?;
    finish(&session, title_override)
}

/// Export `objects` from a scene that supplies meshes and transforms.
///
/// # Errors
///
/// Returns the first assembly or encoding error.
///
/// # Example
///
/// ```
/// use desmos_export::{export_scene, ExportParams, PolygonMesh, Point3, SceneObject, StaticScene};
///
/// let mesh = PolygonMesh::from_polygons(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![vec![0, 1, 2]],
/// )
/// .unwrap();
/// let mut scene = StaticScene::new().with_object(SceneObject::new("Tri", mesh));
///
/// let document = export_scene(&mut scene, ["Tri"], &ExportParams::default(), None).unwrap();
/// assert!(document.contents.contains("x_{1}=\\left[0,1,0\\right]"));
/// assert!(document.contents.contains("f_{3}=\\left[3\\right]"));
/// assert_eq!(document.warning(), None);
/// ```
pub fn export_scene<'a, I, S>(
    scene: &mut S,
    objects: I,
    params: &ExportParams,
    title_override: Option<&TitleOverride>,
) -> ExportResult<ExportDocument>
where
    I: IntoIterator<Item = &'a str>,
    S: MeshSource + TransformSampler + ?Sized,
{
    log_start(params);
    let session = ExportSession::assemble_scene(objects, scene, params)?;
    finish(&session, title_override)
}

fn log_start(params: &ExportParams) {
    info!(
        format = ?params.format,
        naming = ?params.naming,
        precision = ?params.precision,
        animation = params.animation.samples_anything(),
        "Starting export"
    );
}

fn finish(
    session: &ExportSession,
    title_override: Option<&TitleOverride>,
) -> ExportResult<ExportDocument> {
    let format = session.params().format;
    let contents = serialize(session, format, title_override)?;
    let document = ExportDocument {
        format,
        contents,
        face_too_large: session.face_too_large(),
        object_count: session.len(),
    };
    info!(
        objects = document.object_count,
        bytes = document.len(),
        face_too_large = document.face_too_large,
        "Export complete"
    );
    Ok(document)
}
