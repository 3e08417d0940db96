//! Object transforms, Euler orders and rotation units.

use nalgebra::{Matrix3, Rotation3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Axis;

/// Which transform a sampler should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransformSpace {
    /// Raw channel values of the object itself.
    #[default]
    Local,
    /// Final values after parenting and constraints (world matrix).
    World,
}

/// Unit rotations are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotationUnit {
    /// Radians, as sampled.
    #[default]
    Radians,
    /// Degrees.
    Degrees,
}

impl RotationUnit {
    /// Factor applied to a radian value to express it in this unit.
    #[inline]
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Radians => 1.0,
            Self::Degrees => 180.0 / std::f64::consts::PI,
        }
    }
}

/// Order in which Euler rotations are applied.
///
/// The first named axis is applied first, so `XYZ` is `Rz * Ry * Rx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub enum EulerOrder {
    /// X, then Y, then Z.
    #[default]
    XYZ,
    /// X, then Z, then Y.
    XZY,
    /// Y, then X, then Z.
    YXZ,
    /// Y, then Z, then X.
    YZX,
    /// Z, then X, then Y.
    ZXY,
    /// Z, then Y, then X.
    ZYX,
}

impl EulerOrder {
    /// All six orders.
    pub const ALL: [Self; 6] = [
        Self::XYZ,
        Self::XZY,
        Self::YXZ,
        Self::YZX,
        Self::ZXY,
        Self::ZYX,
    ];

    /// Axes in application order.
    #[must_use]
    pub const fn axes(self) -> [Axis; 3] {
        match self {
            Self::XYZ => [Axis::X, Axis::Y, Axis::Z],
            Self::XZY => [Axis::X, Axis::Z, Axis::Y],
            Self::YXZ => [Axis::Y, Axis::X, Axis::Z],
            Self::YZX => [Axis::Y, Axis::Z, Axis::X],
            Self::ZXY => [Axis::Z, Axis::X, Axis::Y],
            Self::ZYX => [Axis::Z, Axis::Y, Axis::X],
        }
    }

    /// Whether the axis sequence is a cyclic (even) permutation of XYZ.
    #[must_use]
    pub const fn is_cyclic(self) -> bool {
        matches!(self, Self::XYZ | Self::YZX | Self::ZXY)
    }

    /// Build a rotation from per-axis angles (radians, indexed by axis).
    #[must_use]
    pub fn compose(self, angles: &Vector3<f64>) -> Rotation3<f64> {
        let [first, second, third] = self.axes();
        axis_rotation(third, angles[third.index()])
            * axis_rotation(second, angles[second.index()])
            * axis_rotation(first, angles[first.index()])
    }

    /// Recover per-axis angles (radians, indexed by axis) from a rotation.
    ///
    /// Inverse of [`EulerOrder::compose`] for middle-axis angles inside
    /// (-π/2, π/2). At gimbal lock the first-axis angle is reported as 0.
    #[must_use]
    pub fn decompose(self, rotation: &Rotation3<f64>) -> Vector3<f64> {
        let m: &Matrix3<f64> = rotation.matrix();
        let [first, second, third] = self.axes();
        let (i, j, k) = (first.index(), second.index(), third.index());
        let s = if self.is_cyclic() { 1.0 } else { -1.0 };

        let sin_b = (-s * m[(k, i)]).clamp(-1.0, 1.0);
        let b = sin_b.asin();
        let cos_b = b.cos();

        let (a, c) = if cos_b > 1e-12 {
            (
                (s * m[(k, j)]).atan2(m[(k, k)]),
                (s * m[(j, i)]).atan2(m[(i, i)]),
            )
        } else {
            // Only a + c (or a - c) is determined; put it all on the last axis.
            (0.0, (-s * m[(i, j)]).atan2(m[(j, j)]))
        };

        let mut angles = Vector3::zeros();
        angles[i] = a;
        angles[j] = b;
        angles[k] = c;
        angles
    }
}

fn axis_rotation(axis: Axis, angle: f64) -> Rotation3<f64> {
    match axis {
        Axis::X => Rotation3::from_axis_angle(&Vector3::x_axis(), angle),
        Axis::Y => Rotation3::from_axis_angle(&Vector3::y_axis(), angle),
        Axis::Z => Rotation3::from_axis_angle(&Vector3::z_axis(), angle),
    }
}

/// Location, Euler rotation and scale of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Translation.
    pub location: Vector3<f64>,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vector3<f64>,
    /// Per-axis scale.
    pub scale: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The rest transform: no translation or rotation, unit scale.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            location: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
        }
    }

    /// Rotation expressed in another Euler order.
    #[must_use]
    pub fn rotation_in(&self, order: EulerOrder) -> Vector3<f64> {
        if order == EulerOrder::XYZ {
            return self.rotation;
        }
        order.decompose(&EulerOrder::XYZ.compose(&self.rotation))
    }
}

/// What a sampler is asked to report for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransformQuery {
    /// Space for the location channel.
    pub location: TransformSpace,
    /// Space for the rotation channel.
    pub rotation: TransformSpace,
    /// Space for the scale channel.
    pub scale: TransformSpace,
    /// Euler order used when decomposing a world rotation.
    pub euler_order: EulerOrder,
}

/// Transform values read for one object at one frame.
///
/// Rotation is in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransformSample {
    /// Translation.
    pub location: Vector3<f64>,
    /// Euler angles in radians.
    pub rotation: Vector3<f64>,
    /// Per-axis scale.
    pub scale: Vector3<f64>,
}
