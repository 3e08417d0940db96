//! JSON-like literals with unquoted call expressions.
//!
//! Calculator state nodes are plain JSON except for their identifiers,
//! which must be generated by the page at paste time. Those fields are
//! [`ScriptValue::Call`] nodes and are written as bare expressions; every
//! other string goes through JSON escaping.

use crate::error::ExportResult;

/// A call expression written unquoted into the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptCall {
    /// A fresh identifier for a node.
    GenerateId,
    /// The identifier of the enclosing folder, generated once per script.
    FolderId,
}

impl ScriptCall {
    /// Script source of the expression.
    #[must_use]
    pub const fn expression(self) -> &'static str {
        match self {
            Self::GenerateId => "Calc.controller.generateId()",
            Self::FolderId => "folderId",
        }
    }
}

/// A node of a script literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptValue {
    /// `true` or `false`.
    Bool(bool),
    /// A quoted, escaped string.
    Text(String),
    /// `[a, b, ..]`.
    Array(Vec<ScriptValue>),
    /// `{"key": value, ..}` with keys in insertion order.
    Object(Vec<(&'static str, ScriptValue)>),
    /// An unquoted call expression.
    Call(ScriptCall),
}

impl ScriptValue {
    /// Text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Array of text nodes.
    #[must_use]
    pub fn texts<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::Array(values.into_iter().map(Self::text).collect())
    }
}

/// Append `value` to `out`.
///
/// # Errors
///
/// Returns an error if a string cannot be JSON-escaped.
pub fn write_script_value(value: &ScriptValue, out: &mut String) -> ExportResult<()> {
    match value {
        ScriptValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        ScriptValue::Text(s) => out.push_str(&serde_json::to_string(s)?),
        ScriptValue::Call(call) => out.push_str(call.expression()),
        ScriptValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_script_value(item, out)?;
            }
            out.push(']');
        }
        ScriptValue::Object(fields) => {
            out.push('{');
            for (i, (key, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push_str(": ");
                write_script_value(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}
