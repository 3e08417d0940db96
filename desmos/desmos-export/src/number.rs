//! Canonical textual form of a single number.
//!
//! Rules, in order:
//!
//! 1. `+∞` becomes [`INFINITY_TOKEN`] (the face-table padding sentinel).
//! 2. Integral values print as plain integers; `-0` prints as `0`.
//! 3. Other values print with [`Precision::Full`] as the shortest round-trip
//!    decimal, or rounded to six fractional digits.
//! 4. A leading `0` before the point is dropped (`.5`, `-.5`).
//! 5. Trailing fractional zeros are dropped.
//! 6. If nothing is left after the point, the integer form is used.
//!
//! NaN and `-∞` have no representation and are rejected.

use crate::error::{ExportError, ExportResult};
use crate::params::Precision;

/// Token emitted for positive infinity.
pub const INFINITY_TOKEN: &str = r"\infty";

/// Fractional digits kept under [`Precision::Rounded`].
pub const ROUNDED_DIGITS: usize = 6;

/// Format `value` as the shortest stable text under `precision`.
///
/// For a fixed `precision` this is a pure function of `value`.
///
/// # Errors
///
/// Returns [`ExportError::NonFiniteValue`] for NaN and negative infinity.
///
/// # Example
///
/// ```
/// use desmos_export::{format_number, Precision};
///
/// assert_eq!(format_number(3.0, Precision::Rounded).unwrap(), "3");
/// assert_eq!(format_number(-0.5, Precision::Rounded).unwrap(), "-.5");
/// assert_eq!(format_number(f64::INFINITY, Precision::Full).unwrap(), r"\infty");
/// ```
#[allow(clippy::float_cmp)]
pub fn format_number(value: f64, precision: Precision) -> ExportResult<String> {
    if value == f64::INFINITY {
        return Ok(INFINITY_TOKEN.to_string());
    }
    if !value.is_finite() {
        return Err(ExportError::NonFiniteValue { value });
    }
    if value == value.round() {
        return Ok(integer_text(&format!("{value:.0}")));
    }

    let text = match precision {
        Precision::Full => format!("{value}"),
        Precision::Rounded => format!("{value:.prec$}", prec = ROUNDED_DIGITS),
    };
    if !text.contains('.') {
        return Ok(integer_text(&text));
    }

    let trimmed = text.trim_end_matches('0');
    if let Some(integer) = trimmed.strip_suffix('.') {
        return Ok(integer_text(integer));
    }

    if let Some(fraction) = trimmed.strip_prefix("0.") {
        Ok(format!(".{fraction}"))
    } else if let Some(fraction) = trimmed.strip_prefix("-0.") {
        Ok(format!("-.{fraction}"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn integer_text(text: &str) -> String {
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
