//! Coordinate axes and axis selections.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three coordinate axes.
///
/// Axes order as X, Y, Z wherever more than one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All axes in canonical order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index of this axis in a 3-vector.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Lowercase symbol used in expression names (`x`, `y`, `z`).
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }

    /// Read this axis' component from a vector.
    #[inline]
    #[must_use]
    pub fn component(self, v: &Vector3<f64>) -> f64 {
        v[self.index()]
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A subset of {X, Y, Z}, each axis toggled independently.
///
/// # Example
///
/// ```
/// use desmos_types::{Axis, AxisSet};
///
/// let axes = AxisSet::new(true, false, true);
/// let picked: Vec<Axis> = axes.iter().collect();
/// assert_eq!(picked, vec![Axis::X, Axis::Z]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct AxisSet {
    /// X enabled.
    pub x: bool,
    /// Y enabled.
    pub y: bool,
    /// Z enabled.
    pub z: bool,
}

impl AxisSet {
    /// Create a selection from three toggles.
    #[inline]
    #[must_use]
    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    /// All three axes.
    #[inline]
    #[must_use]
    pub const fn all() -> Self {
        Self::new(true, true, true)
    }

    /// No axes.
    #[inline]
    #[must_use]
    pub const fn none() -> Self {
        Self::new(false, false, false)
    }

    /// Whether `axis` is enabled.
    #[inline]
    #[must_use]
    pub const fn contains(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Whether no axis is enabled.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.x || self.y || self.z)
    }

    /// Number of enabled axes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Enabled axes in X, Y, Z order.
    pub fn iter(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL.into_iter().filter(move |&axis| self.contains(axis))
    }
}

impl FromIterator<Axis> for AxisSet {
    fn from_iter<I: IntoIterator<Item = Axis>>(iter: I) -> Self {
        let mut set = Self::none();
        for axis in iter {
            match axis {
                Axis::X => set.x = true,
                Axis::Y => set.y = true,
                Axis::Z => set.z = true,
            }
        }
        set
    }
}
