//! Document serializers.
//!
//! Both formats walk a session in the same order: objects in selection
//! order, then vertices, faces, midpoints, normals, materials, location,
//! rotation and scale, each quantity's axes in X, Y, Z order.

mod script;
mod structured;
mod text;

pub use script::{ScriptCall, ScriptValue, write_script_value};
pub use structured::{TIMESTAMP_FORMAT, TitleOverride, write_structured};
pub use text::{TEXT_HEADER_TIP, write_text};

use crate::error::ExportResult;
use crate::ident::{IdentifierScheme, Quantity};
use crate::params::OutputFormat;
use crate::record::{AxisBlock, ObjectRecord};
use crate::session::ExportSession;

/// Receives a session's quantities in traversal order.
pub trait DocumentSink {
    /// Start the block of object `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot accept the object.
    fn begin_object(&mut self, name: &str) -> ExportResult<()>;

    /// Emit one quantity list under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be encoded.
    fn push(&mut self, identifier: &str, values: &[f64]) -> ExportResult<()>;

    /// Close the current object block.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot close the block.
    fn end_object(&mut self) -> ExportResult<()> {
        Ok(())
    }
}

/// Feed every quantity of `session` to `sink`.
///
/// # Errors
///
/// Returns the first error reported by the sink.
pub fn walk_session<S: DocumentSink + ?Sized>(
    session: &ExportSession,
    sink: &mut S,
) -> ExportResult<()> {
    let scheme = session.identifiers();
    for (record, prefix) in session.records().iter().zip(session.prefixes()) {
        sink.begin_object(&record.name)?;
        walk_record(record, &prefix, &scheme, sink)?;
        sink.end_object()?;
    }
    Ok(())
}

fn walk_record<S: DocumentSink + ?Sized>(
    record: &ObjectRecord,
    prefix: &str,
    scheme: &IdentifierScheme,
    sink: &mut S,
) -> ExportResult<()> {
    let qualified = record.qualifies_vertices();
    let push_block = |sink: &mut S, block: Option<&AxisBlock>, quantity: Quantity| {
        push_axes(sink, block, &AxisIdent { scheme, quantity, prefix, qualified })
    };

    push_block(sink, record.vertices.as_ref(), Quantity::Vertices)?;
    if let Some(faces) = &record.faces {
        for (i, column) in faces.columns().iter().enumerate() {
            sink.push(&scheme.face(i + 1, prefix), column)?;
        }
    }
    push_block(sink, record.midpoints.as_ref(), Quantity::Midpoints)?;
    push_block(sink, record.normals.as_ref(), Quantity::Normals)?;
    if let Some(materials) = &record.materials {
        let values: Vec<f64> = materials.iter().copied().map(f64::from).collect();
        sink.push(&scheme.materials(prefix), &values)?;
    }
    push_block(sink, record.location.as_ref(), Quantity::Location)?;
    push_block(sink, record.rotation.as_ref(), Quantity::Rotation)?;
    push_block(sink, record.scale.as_ref(), Quantity::Scale)?;
    Ok(())
}

struct AxisIdent<'a> {
    scheme: &'a IdentifierScheme,
    quantity: Quantity,
    prefix: &'a str,
    qualified: bool,
}

fn push_axes<S: DocumentSink + ?Sized>(
    sink: &mut S,
    block: Option<&AxisBlock>,
    ident: &AxisIdent<'_>,
) -> ExportResult<()> {
    if let Some(block) = block {
        for (axis, values) in block.iter() {
            let identifier = ident
                .scheme
                .axis(axis, ident.quantity, ident.prefix, ident.qualified);
            sink.push(&identifier, values)?;
        }
    }
    Ok(())
}

/// Serialize `session` in `format`.
///
/// `title_override` only applies to [`OutputFormat::Structured`].
///
/// # Errors
///
/// Returns an error if a value cannot be encoded.
pub fn serialize(
    session: &ExportSession,
    format: OutputFormat,
    title_override: Option<&TitleOverride>,
) -> ExportResult<String> {
    match format {
        OutputFormat::Text => write_text(session),
        OutputFormat::Structured => write_structured(session, title_override),
    }
}
