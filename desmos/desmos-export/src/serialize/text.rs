//! Plain text expression list.

use std::fmt::Write;

use super::{DocumentSink, walk_session};
use crate::error::ExportResult;
use crate::params::Precision;
use crate::sequence::encode_expression;
use crate::session::ExportSession;

/// Usage tip printed below the title in the header comment.
pub const TEXT_HEADER_TIP: &str = "TIP: Here is an example of how to use these expressions:\n\
                                   https://www.desmos.com/calculator/u6xbg2i0xa";

struct TextSink {
    out: String,
    precision: Precision,
}

impl DocumentSink for TextSink {
    fn begin_object(&mut self, name: &str) -> ExportResult<()> {
        self.out.push_str(name);
        self.out.push('\n');
        Ok(())
    }

    fn push(&mut self, identifier: &str, values: &[f64]) -> ExportResult<()> {
        let list = encode_expression(values, self.precision)?;
        let _ = writeln!(self.out, "{identifier}={list}");
        Ok(())
    }

    fn end_object(&mut self) -> ExportResult<()> {
        self.out.push('\n');
        Ok(())
    }
}

/// Write `session` as a header comment followed by one block per object.
///
/// Each block is the object name on its own line, one
/// `identifier=\left[..\right]` line per quantity and a blank line.
///
/// # Errors
///
/// Returns an error if a value cannot be encoded.
pub fn write_text(session: &ExportSession) -> ExportResult<String> {
    let mut sink = TextSink {
        out: String::new(),
        precision: session.params().precision,
    };
    let _ = write!(
        sink.out,
        "/* {}\n{TEXT_HEADER_TIP}\n*/\n\n",
        session.params().title
    );
    walk_session(session, &mut sink)?;
    Ok(sink.out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::AssembledObject;
    use crate::params::ExportParams;
    use crate::record::{AxisBlock, ObjectRecord};
    use desmos_types::{AxisSet, Vector3};

    fn session_with(params: &ExportParams, records: Vec<ObjectRecord>) -> ExportSession {
        let mut session = ExportSession::new(params);
        for record in records {
            let pushed = session.push(AssembledObject {
                record,
                face_too_large: false,
            });
            assert!(pushed.is_ok());
        }
        session
    }

    #[test]
    fn test_header_carries_title() {
        let session = session_with(&ExportParams::default().with_title("My Scene"), Vec::new());
        let text = write_text(&session).unwrap_or_default();
        assert!(text.starts_with("/* My Scene\nTIP:"));
        assert!(text.ends_with("*/\n\n"));
    }

    #[test]
    fn test_object_block() {
        let mut record = ObjectRecord::new("Plane");
        record.vertices = AxisBlock::from_vectors(
            AxisSet::new(true, true, false),
            [Vector3::new(0.5, -1.0, 9.0), Vector3::new(2.0, 0.25, 9.0)],
        );
        let session = session_with(&ExportParams::default(), vec![record]);
        let text = write_text(&session).unwrap_or_default();
        let body = text.split_once("*/\n\n").map_or("", |(_, body)| body);
        assert_eq!(
            body,
            "Plane\nx_{1}=\\left[.5,2\\right]\ny_{1}=\\left[-1,.25\\right]\n\n"
        );
    }

    #[test]
    fn test_nan_aborts() {
        let mut record = ObjectRecord::new("Bad");
        record.location = AxisBlock::from_vectors(
            AxisSet::new(true, false, false),
            [Vector3::new(f64::NAN, 0.0, 0.0)],
        );
        let session = session_with(&ExportParams::default(), vec![record]);
        assert!(write_text(&session).is_err());
    }
}
