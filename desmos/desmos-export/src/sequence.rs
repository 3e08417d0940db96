//! Encoding of ordered number lists.

use crate::error::ExportResult;
use crate::number::format_number;
use crate::params::Precision;

/// Opening delimiter of a list literal.
pub const LIST_OPEN: &str = r"\left[";

/// Closing delimiter of a list literal.
pub const LIST_CLOSE: &str = r"\right]";

/// Shape a sequence is encoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceTarget {
    /// A single bracketed list literal.
    Expression,
    /// One formatted string per value, for a table column.
    Column,
}

/// An encoded sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedSequence {
    /// `\left[v1,v2,..\right]`.
    Expression(String),
    /// Formatted values in input order.
    Column(Vec<String>),
}

/// Encode `values` for `target`. Values are never dropped or reordered.
///
/// # Errors
///
/// Returns an error if a value is NaN or negative infinity.
pub fn encode_sequence(
    values: &[f64],
    precision: Precision,
    target: SequenceTarget,
) -> ExportResult<EncodedSequence> {
    Ok(match target {
        SequenceTarget::Expression => {
            EncodedSequence::Expression(encode_expression(values, precision)?)
        }
        SequenceTarget::Column => EncodedSequence::Column(encode_column(values, precision)?),
    })
}

/// Encode `values` as a list literal.
///
/// # Errors
///
/// Returns an error if a value is NaN or negative infinity.
///
/// # Example
///
/// ```
/// use desmos_export::{encode_expression, Precision};
///
/// let list = encode_expression(&[1.0, 2.5], Precision::Rounded).unwrap();
/// assert_eq!(list, r"\left[1,2.5\right]");
/// ```
pub fn encode_expression(values: &[f64], precision: Precision) -> ExportResult<String> {
    let mut out = String::from(LIST_OPEN);
    for (i, &value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format_number(value, precision)?);
    }
    out.push_str(LIST_CLOSE);
    Ok(out)
}

/// Encode `values` as one formatted string each.
///
/// # Errors
///
/// Returns an error if a value is NaN or negative infinity.
pub fn encode_column(values: &[f64], precision: Precision) -> ExportResult<Vec<String>> {
    values
        .iter()
        .map(|&value| format_number(value, precision))
        .collect()
}
