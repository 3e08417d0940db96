//! Export result types.

use std::fmt;

use crate::params::OutputFormat;

/// Message shown when a polygon has more than four corners.
pub const FACE_TOO_LARGE_WARNING: &str =
    "Detected a face with more than 4 vertices; consider enabling triangulation";

/// A finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// Format of `contents`.
    pub format: OutputFormat,
    /// The complete document.
    pub contents: String,
    /// Whether any polygon has more than four corners.
    pub face_too_large: bool,
    /// Number of exported objects.
    pub object_count: usize,
}

impl ExportDocument {
    /// Warning to show the user, if any.
    #[must_use]
    pub const fn warning(&self) -> Option<&'static str> {
        if self.face_too_large {
            Some(FACE_TOO_LARGE_WARNING)
        } else {
            None
        }
    }

    /// Conventional file extension for the document.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        self.format.extension()
    }

    /// Size of the document in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Whether the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl fmt::Display for ExportDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} object(s) as .{} ({} bytes)",
            self.object_count,
            self.extension(),
            self.contents.len()
        )?;
        if let Some(warning) = self.warning() {
            write!(f, " - {warning}")?;
        }
        Ok(())
    }
}
