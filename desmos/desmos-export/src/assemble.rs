//! Object record assembly from scene collaborators.

use desmos_types::{MeshSource, PolygonMesh, TransformSampler};
use tracing::{debug, warn};

use crate::error::{ExportError, ExportResult};
use crate::face::{FaceTable, MAX_PLAIN_CORNERS, build_face_table};
use crate::params::{AnimationParams, ExportParams, GeometryParams};
use crate::record::{AnimationChannel, AxisBlock, ObjectRecord};

/// Scale applied to normals before attaching them to their midpoints.
pub const ATTACHED_NORMAL_SCALE: f64 = 0.01;

/// An assembled record and whether any of its polygons is too large.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledObject {
    /// The finished record.
    pub record: ObjectRecord,
    /// Whether a polygon has more than four corners.
    pub face_too_large: bool,
}

/// Assemble the record for `object`.
///
/// `params` must already be normalized.
///
/// # Errors
///
/// Returns an error if a collaborator fails, a polygon references a missing
/// vertex, or scene data contains non-finite values.
pub fn assemble_object<M, T>(
    object: &str,
    meshes: &M,
    sampler: &mut T,
    params: &ExportParams,
) -> ExportResult<AssembledObject>
where
    M: MeshSource + ?Sized,
    T: TransformSampler + ?Sized,
{
    let mut assembled = assemble_geometry(object, meshes, &params.geometry)?;
    if params.animation.samples_anything() {
        assemble_animation(&mut assembled.record, sampler, &params.animation)?;
    }
    Ok(assembled)
}

/// Record for `object` holding only its geometry.
///
/// # Errors
///
/// Returns an error if the mesh cannot be read, a polygon references a
/// missing vertex, or a coordinate is non-finite.
pub fn assemble_geometry<M: MeshSource + ?Sized>(
    object: &str,
    meshes: &M,
    geometry: &GeometryParams,
) -> ExportResult<AssembledObject> {
    let mut record = ObjectRecord::new(object);
    let mut face_too_large = false;

    if geometry.vertices {
        let mesh = meshes
            .mesh(object, geometry.triangulate)
            .map_err(|e| ExportError::scene(object, e))?;
        face_too_large = fill_geometry(&mut record, &mesh, geometry)?;
        debug!(
            object,
            vertices = mesh.vertex_count(),
            polygons = mesh.polygon_count(),
            face_columns = record.faces.as_ref().map_or(0, FaceTable::column_count),
            "Assembled geometry"
        );
    }

    Ok(AssembledObject {
        record,
        face_too_large,
    })
}

fn fill_geometry(
    record: &mut ObjectRecord,
    mesh: &PolygonMesh,
    geometry: &GeometryParams,
) -> ExportResult<bool> {
    let object = record.name.clone();

    record.vertices =
        AxisBlock::from_vectors(geometry.axes, mesh.vertices.iter().map(|p| p.coords));
    check_finite(&object, "vertices", record.vertices.as_ref())?;

    if !geometry.faces {
        return Ok(false);
    }

    for (index, polygon) in mesh.polygons.iter().enumerate() {
        if let Some(&corner) = polygon
            .corners
            .iter()
            .find(|&&c| c as usize >= mesh.vertices.len())
        {
            return Err(ExportError::CornerOutOfRange {
                object,
                polygon: index,
                corner,
                vertex_count: mesh.vertices.len(),
            });
        }
    }

    let corners: Vec<&[u32]> = mesh.polygons.iter().map(|p| p.corners.as_slice()).collect();
    let (faces, too_large) = build_face_table(&corners);
    if too_large {
        warn!(
            object = %object,
            max_corners = faces.column_count(),
            limit = MAX_PLAIN_CORNERS,
            "Polygon exceeds the corner limit; consider triangulating"
        );
    }
    record.faces = Some(faces);

    if geometry.midpoints {
        record.midpoints =
            AxisBlock::from_vectors(geometry.axes, mesh.polygons.iter().map(|p| p.center.coords));
        check_finite(&object, "midpoints", record.midpoints.as_ref())?;
    }

    if geometry.normals {
        let mut normals =
            AxisBlock::from_vectors(geometry.axes, mesh.polygons.iter().map(|p| p.normal));
        check_finite(&object, "normals", normals.as_ref())?;
        if geometry.attach_normals {
            if let (Some(normals), Some(midpoints)) =
                (normals.as_mut(), record.midpoints.as_ref())
            {
                attach_normals(&object, normals, midpoints)?;
            }
        }
        record.normals = normals;
    }

    if geometry.materials {
        record.materials = Some(mesh.polygons.iter().map(|p| p.material_index).collect());
    }

    Ok(too_large)
}

/// Replace each normal component with `normal * 0.01 + midpoint`.
///
/// # Errors
///
/// Returns [`ExportError::MisalignedBlock`] if the blocks differ in axes or
/// length.
pub fn attach_normals(
    object: &str,
    normals: &mut AxisBlock,
    midpoints: &AxisBlock,
) -> ExportResult<()> {
    if normals.scale_add(ATTACHED_NORMAL_SCALE, midpoints) {
        Ok(())
    } else {
        Err(ExportError::MisalignedBlock {
            object: object.to_string(),
            quantity: "attached normals",
            expected: midpoints.len(),
            got: normals.len(),
        })
    }
}

/// Calls [`TransformSampler::restore`] when dropped.
struct SamplingPass<'a, T: TransformSampler + ?Sized> {
    sampler: &'a mut T,
}

impl<'a, T: TransformSampler + ?Sized> SamplingPass<'a, T> {
    fn begin(sampler: &'a mut T) -> Self {
        Self { sampler }
    }
}

impl<T: TransformSampler + ?Sized> Drop for SamplingPass<'_, T> {
    fn drop(&mut self) {
        self.sampler.restore();
    }
}

/// Sample the enabled animation channels of `record` over the frame range.
///
/// The sampler is restored once the pass ends, whether or not it
/// succeeded.
///
/// # Errors
///
/// Returns an error if a frame cannot be sampled or a sample is
/// non-finite.
pub fn assemble_animation<T: TransformSampler + ?Sized>(
    record: &mut ObjectRecord,
    sampler: &mut T,
    animation: &AnimationParams,
) -> ExportResult<()> {
    let mut location = AnimationChannel::new(animation.location.axes);
    let mut rotation = AnimationChannel::new(animation.rotation.axes);
    let mut scale = AnimationChannel::new(animation.scale.axes);
    let query = animation.query();

    {
        let pass = SamplingPass::begin(sampler);
        for frame in animation.frames.frames() {
            let sample = pass
                .sampler
                .sample(&record.name, frame, &query)
                .map_err(|e| ExportError::scene(record.name.as_str(), e))?;
            if let Some(channel) = location.as_mut() {
                channel.push(&sample.location);
            }
            if let Some(channel) = rotation.as_mut() {
                channel.push(&sample.rotation);
            }
            if let Some(channel) = scale.as_mut() {
                channel.push(&sample.scale);
            }
        }
    }

    if let Some(channel) = rotation.as_mut() {
        channel.scale(animation.rotation_unit.factor());
    }

    check_finite(&record.name, "location", location.as_ref())?;
    check_finite(&record.name, "rotation", rotation.as_ref())?;
    check_finite(&record.name, "scale", scale.as_ref())?;

    debug!(
        object = %record.name,
        frames = animation.frames.frame_count(),
        "Sampled animation"
    );

    record.location = location;
    record.rotation = rotation;
    record.scale = scale;
    Ok(())
}

fn check_finite(
    object: &str,
    quantity: &'static str,
    block: Option<&AxisBlock>,
) -> ExportResult<()> {
    match block.and_then(AxisBlock::first_non_finite) {
        Some(value) => Err(ExportError::NonFiniteInput {
            object: object.to_string(),
            quantity,
            value,
        }),
        None => Ok(()),
    }
}
