//! Per-object export records.

use std::collections::BTreeMap;

use desmos_types::{Axis, AxisSet, Vector3};

use crate::face::FaceTable;

/// Index-aligned values for each enabled axis.
///
/// Used for vertices (one entry per vertex), midpoints and normals (one
/// entry per polygon) and animation channels (one entry per frame).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisBlock {
    columns: BTreeMap<Axis, Vec<f64>>,
}

/// Vertex coordinates, one entry per vertex.
pub type VertexBlock = AxisBlock;

/// Polygon centers, one entry per polygon.
pub type MidpointBlock = AxisBlock;

/// Polygon normals, one entry per polygon.
pub type NormalBlock = AxisBlock;

/// Per-frame samples of one transform channel.
pub type AnimationChannel = AxisBlock;

impl AxisBlock {
    /// Block with an empty column for every axis in `axes`.
    ///
    /// Returns `None` if `axes` is empty.
    #[must_use]
    pub fn new(axes: AxisSet) -> Option<Self> {
        if axes.is_empty() {
            return None;
        }
        Some(Self {
            columns: axes.iter().map(|axis| (axis, Vec::new())).collect(),
        })
    }

    /// Block holding the enabled components of `vectors`, in order.
    #[must_use]
    pub fn from_vectors<I>(axes: AxisSet, vectors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3<f64>>,
    {
        let mut block = Self::new(axes)?;
        for v in vectors {
            block.push(&v);
        }
        Some(block)
    }

    /// Append the enabled components of `v`.
    pub fn push(&mut self, v: &Vector3<f64>) {
        for (axis, column) in &mut self.columns {
            column.push(axis.component(v));
        }
    }

    /// Multiply every value by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for value in self.columns.values_mut().flatten() {
            *value *= factor;
        }
    }

    /// Values of `axis`, if enabled.
    #[must_use]
    pub fn get(&self, axis: Axis) -> Option<&[f64]> {
        self.columns.get(&axis).map(Vec::as_slice)
    }

    /// Enabled axes with their values, in X, Y, Z order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &[f64])> {
        self.columns.iter().map(|(&axis, values)| (axis, values.as_slice()))
    }

    /// Enabled axes.
    #[must_use]
    pub fn axes(&self) -> AxisSet {
        self.columns.keys().copied().collect()
    }

    /// Entries per axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    /// Whether the block holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First non-finite value, if any.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<f64> {
        self.columns
            .values()
            .flatten()
            .copied()
            .find(|v| !v.is_finite())
    }

    /// Combine component-wise with `other` as `self * factor + other`.
    ///
    /// Returns `false` without modifying anything if the blocks differ in
    /// axes or length.
    pub(crate) fn scale_add(&mut self, factor: f64, other: &Self) -> bool {
        if self.axes() != other.axes() || self.len() != other.len() {
            return false;
        }
        for (axis, column) in &mut self.columns {
            if let Some(offsets) = other.columns.get(axis) {
                for (value, offset) in column.iter_mut().zip(offsets) {
                    *value = *value * factor + *offset;
                }
            }
        }
        true
    }
}

/// All exported data for one object.
///
/// Built once by the assembler and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectRecord {
    /// Object name as supplied by the host.
    pub name: String,
    /// Vertex coordinates.
    pub vertices: Option<VertexBlock>,
    /// Polygon corner columns.
    pub faces: Option<FaceTable>,
    /// Polygon centers.
    pub midpoints: Option<MidpointBlock>,
    /// Polygon normals, possibly attached to the midpoints.
    pub normals: Option<NormalBlock>,
    /// Polygon material slots.
    pub materials: Option<Vec<u32>>,
    /// Location samples.
    pub location: Option<AnimationChannel>,
    /// Rotation samples, already in the output unit.
    pub rotation: Option<AnimationChannel>,
    /// Scale samples.
    pub scale: Option<AnimationChannel>,
}

impl ObjectRecord {
    /// Empty record for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether vertex identifiers need the `Vertices` label.
    #[must_use]
    pub const fn qualifies_vertices(&self) -> bool {
        self.midpoints.is_some() || self.normals.is_some()
    }
}
