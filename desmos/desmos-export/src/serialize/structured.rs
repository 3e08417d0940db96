//! Calculator-state console script.

use chrono::NaiveDateTime;

use super::script::{ScriptCall, ScriptValue, write_script_value};
use super::{DocumentSink, walk_session};
use crate::error::ExportResult;
use crate::params::Precision;
use crate::sequence::encode_column;
use crate::session::ExportSession;

/// Timestamp layout of a title override, e.g. `Tue Oct 14 09:05:03 2026`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %Y";

const SCRIPT_PREAMBLE: &str = "\
// ----------------------------- WARNING -----------------------------
// Pasting code into a browser console runs it with full access to the page.
// Read this script before running it. It changes the graph that is
// currently open and the change cannot be undone.

/* USAGE
1. Open the graph in the browser and open the developer console.
2. Paste the whole script and press enter.
3. The imported tables appear in a hidden folder at the end of the
   expression list.

The script stores the generated expressions in `imported`, appends them
to the current calculator state and applies that state again.
*/

";

const SCRIPT_APPLY: &str = "\
state = Calc.getState();
for (const expression of imported) {state.expressions.list.push(expression);}
Calc.setState(state);";

/// Replaces the folder title with a file name and generation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleOverride {
    /// Name of the written file.
    pub file_name: String,
    /// Local time the document was generated.
    pub generated_at: NaiveDateTime,
}

impl TitleOverride {
    /// Override for `file_name` with an explicit timestamp.
    #[must_use]
    pub fn new(file_name: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            file_name: file_name.into(),
            generated_at,
        }
    }

    /// Override for `file_name` stamped with the current local time.
    #[must_use]
    pub fn now(file_name: impl Into<String>) -> Self {
        Self::new(file_name, chrono::Local::now().naive_local())
    }

    /// Folder title: the quoted file name, a line break and the timestamp.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "`{}`\n({})",
            self.file_name,
            self.generated_at.format(TIMESTAMP_FORMAT)
        )
    }
}

struct StructuredSink {
    nodes: Vec<ScriptValue>,
    columns: Vec<ScriptValue>,
    precision: Precision,
}

impl StructuredSink {
    fn flush_table(&mut self) {
        if let Some(ScriptValue::Object(fields)) = self.nodes.last_mut() {
            if let Some((_, ScriptValue::Array(columns))) =
                fields.iter_mut().find(|(key, _)| *key == "columns")
            {
                columns.append(&mut self.columns);
            }
        }
    }
}

impl DocumentSink for StructuredSink {
    fn begin_object(&mut self, name: &str) -> ExportResult<()> {
        self.nodes.push(ScriptValue::Object(vec![
            ("type", ScriptValue::text("text")),
            ("text", ScriptValue::text(format!("\"{name}\""))),
            ("folderId", ScriptValue::Call(ScriptCall::FolderId)),
            ("id", ScriptValue::Call(ScriptCall::GenerateId)),
        ]));
        self.nodes.push(ScriptValue::Object(vec![
            ("type", ScriptValue::text("table")),
            ("columns", ScriptValue::Array(Vec::new())),
            ("folderId", ScriptValue::Call(ScriptCall::FolderId)),
            ("id", ScriptValue::Call(ScriptCall::GenerateId)),
        ]));
        Ok(())
    }

    fn push(&mut self, identifier: &str, values: &[f64]) -> ExportResult<()> {
        self.columns.push(ScriptValue::Object(vec![
            ("latex", ScriptValue::text(identifier)),
            (
                "values",
                ScriptValue::texts(encode_column(values, self.precision)?),
            ),
            ("hidden", ScriptValue::Bool(true)),
            ("id", ScriptValue::Call(ScriptCall::GenerateId)),
        ]));
        Ok(())
    }

    fn end_object(&mut self) -> ExportResult<()> {
        self.flush_table();
        Ok(())
    }
}

fn folder_node(title: String) -> ScriptValue {
    ScriptValue::Object(vec![
        ("type", ScriptValue::text("folder")),
        ("title", ScriptValue::Text(title)),
        ("id", ScriptValue::Call(ScriptCall::FolderId)),
        ("hidden", ScriptValue::Bool(true)),
        ("collapsed", ScriptValue::Bool(true)),
    ])
}

/// Write `session` as a console script that appends a hidden folder of
/// tables to the calculator state.
///
/// The folder is titled with the session title, or with `title_override`
/// when given. Each object contributes a label node holding its quoted
/// name and a table with one hidden column per quantity.
///
/// # Errors
///
/// Returns an error if a value cannot be encoded.
pub fn write_structured(
    session: &ExportSession,
    title_override: Option<&TitleOverride>,
) -> ExportResult<String> {
    let title = title_override.map_or_else(|| session.params().title.clone(), TitleOverride::title);

    let mut sink = StructuredSink {
        nodes: vec![folder_node(title)],
        columns: Vec::new(),
        precision: session.params().precision,
    };
    walk_session(session, &mut sink)?;

    let mut out = String::from(SCRIPT_PREAMBLE);
    out.push_str("folderId = ");
    out.push_str(ScriptCall::GenerateId.expression());
    out.push_str(";\nimported = ");
    write_script_value(&ScriptValue::Array(sink.nodes), &mut out)?;
    out.push_str(";\n");
    out.push_str(SCRIPT_APPLY);
    Ok(out)
}
