//! Identifier generation.
//!
//! Every exported list is assigned to an identifier of the form
//! `<symbol>_{<label><prefix>}`, where the prefix tells objects apart and
//! the label names the quantity. Face columns use `f_{<corner><suffix>}`.

use std::collections::HashSet;

use desmos_types::Axis;
use tracing::warn;

use crate::params::NamingMode;

/// Kind of exported quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Vertex coordinates.
    Vertices,
    /// Face corner columns.
    Faces,
    /// Polygon centers.
    Midpoints,
    /// Polygon normals.
    Normals,
    /// Polygon material slots.
    Materials,
    /// Location samples.
    Location,
    /// Rotation samples.
    Rotation,
    /// Scale samples.
    Scale,
}

impl Quantity {
    /// Quantities written as per-axis `x_`/`y_`/`z_` lists.
    pub const AXIS: [Self; 6] = [
        Self::Vertices,
        Self::Midpoints,
        Self::Normals,
        Self::Location,
        Self::Rotation,
        Self::Scale,
    ];

    /// Label placed before the object prefix.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vertices => "Vertices",
            Self::Faces => "Faces",
            Self::Midpoints => "Midpoints",
            Self::Normals => "Normals",
            Self::Materials => "Materials",
            Self::Location => "Location",
            Self::Rotation => "Rotation",
            Self::Scale => "Scale",
        }
    }
}

/// Alphanumeric characters of `name`, first one upper-cased.
///
/// ```
/// use desmos_export::name_prefix;
///
/// assert_eq!(name_prefix("my cube.001"), "Mycube001");
/// ```
#[must_use]
pub fn name_prefix(name: &str) -> String {
    let mut prefix = String::with_capacity(name.len());
    for c in name.chars().filter(|c| c.is_alphanumeric()) {
        if prefix.is_empty() {
            prefix.extend(c.to_uppercase());
        } else {
            prefix.push(c);
        }
    }
    prefix
}

/// One distinct prefix per object, in session order.
///
/// [`NamingMode::Sequential`] numbers objects from 1. [`NamingMode::ByName`]
/// uses [`name_prefix`]; a name without alphanumeric characters falls back
/// to its position. When a prefix is already taken, or would turn another
/// object's identifiers into its own once a label or corner number is put
/// in front (`Cube` and `LocationCube`, `Cube` and `1Cube`), the later one
/// gets the smallest numeric suffix (`2`, `3`, ..) that clashes with nothing.
/// A clashing prefix made only of digits is first put behind `Object`.
///
/// # Example
///
/// ```
/// use desmos_export::{object_prefixes, NamingMode};
///
/// let prefixes = object_prefixes(NamingMode::ByName, ["Cube", "cube", "Sphere"]);
/// assert_eq!(prefixes, vec!["Cube", "Cube2", "Sphere"]);
/// ```
pub fn object_prefixes<'a, I>(naming: NamingMode, names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let names = names.into_iter();
    match naming {
        NamingMode::Sequential => names
            .enumerate()
            .map(|(i, _)| (i + 1).to_string())
            .collect(),
        NamingMode::ByName => {
            let natural: Vec<String> = names
                .enumerate()
                .map(|(i, name)| {
                    let prefix = name_prefix(name);
                    if prefix.is_empty() { (i + 1).to_string() } else { prefix }
                })
                .collect();
            disambiguate(natural)
        }
    }
}

const DIGIT_STEM: &str = "Object";

fn disambiguate(natural: Vec<String>) -> Vec<String> {
    let reserved: HashSet<String> = natural.iter().cloned().collect();
    let mut taken: Vec<String> = Vec::with_capacity(natural.len());

    for prefix in natural {
        if !clashes(&prefix, &taken) {
            taken.push(prefix);
            continue;
        }
        // All-digit candidates can clash with every shorter all-digit prefix.
        let stem = if prefix.bytes().all(|b| b.is_ascii_digit()) {
            format!("{DIGIT_STEM}{prefix}")
        } else {
            prefix.clone()
        };
        let free =
            |candidate: &String| !reserved.contains(candidate) && !clashes(candidate, &taken);
        let unique = if free(&stem) {
            stem
        } else {
            (2usize..)
                .map(|suffix| format!("{stem}{suffix}"))
                .find(free)
                .unwrap_or_default()
        };
        warn!(prefix = %prefix, resolved = %unique, "Object prefix collision");
        taken.push(unique);
    }
    taken
}

fn clashes(candidate: &str, taken: &[String]) -> bool {
    taken.iter().any(|other| {
        other == candidate || extends(candidate, other) || extends(other, candidate)
    })
}

// `longer` is `shorter` behind a label or a run of digits, so the two share
// an identifier such as `x_{LocationCube}` or `f_{11Cube}`.
fn extends(longer: &str, shorter: &str) -> bool {
    longer.strip_suffix(shorter).is_some_and(|head| {
        !head.is_empty()
            && (head.bytes().all(|b| b.is_ascii_digit())
                || Quantity::AXIS.iter().any(|q| q.label() == head))
    })
}

/// Builds identifiers for one session.
///
/// Face suffixes depend on how many objects the session exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierScheme {
    naming: NamingMode,
    object_count: usize,
}

impl IdentifierScheme {
    /// Scheme for a session exporting `object_count` objects.
    #[must_use]
    pub const fn new(naming: NamingMode, object_count: usize) -> Self {
        Self {
            naming,
            object_count,
        }
    }

    /// Identifier of a per-axis quantity.
    ///
    /// Unqualified vertices (`qualified == false`) omit the label; every
    /// other quantity always carries it.
    #[must_use]
    pub fn axis(&self, axis: Axis, quantity: Quantity, prefix: &str, qualified: bool) -> String {
        let label = if quantity == Quantity::Vertices && !qualified {
            ""
        } else {
            quantity.label()
        };
        format!("{}_{{{label}{prefix}}}", axis.symbol())
    }

    /// Identifier of the material list.
    #[must_use]
    pub fn materials(&self, prefix: &str) -> String {
        format!("m_{{{}{prefix}}}", Quantity::Materials.label())
    }

    /// Identifier of face column `corner` (1-based).
    #[must_use]
    pub fn face(&self, corner: usize, prefix: &str) -> String {
        let suffix = match (self.object_count > 1, self.naming) {
            (true, NamingMode::Sequential) => format!("{}{prefix}", Quantity::Faces.label()),
            (_, NamingMode::ByName) => prefix.to_string(),
            (false, NamingMode::Sequential) => String::new(),
        };
        format!("f_{{{corner}{suffix}}}")
    }
}
