//! Export parameters and presets.

use desmos_types::{AxisSet, EulerOrder, RotationUnit, TransformQuery, TransformSpace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Target document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutputFormat {
    /// One `identifier=list` expression per line, pasted by hand.
    #[default]
    Text,
    /// A console script that appends tables to the calculator state.
    Structured,
}

impl OutputFormat {
    /// Conventional file extension for documents in this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Structured => "json",
        }
    }
}

/// How objects are told apart in identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NamingMode {
    /// Use the object's alphanumeric name characters.
    ByName,
    /// Number objects `1, 2, ...` in selection order.
    #[default]
    Sequential,
}

/// How many digits non-integral values keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Precision {
    /// Round to six fractional digits.
    #[default]
    Rounded,
    /// Keep the shortest round-trip representation.
    Full,
}

/// Frames to sample, `start, start + step, ..` up to and including `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameRange {
    /// First frame.
    pub start: i32,
    /// Last frame (inclusive).
    pub end: i32,
    /// Distance between sampled frames.
    pub step: u32,
}

impl Default for FrameRange {
    fn default() -> Self {
        Self {
            start: 1,
            end: 100,
            step: 1,
        }
    }
}

impl FrameRange {
    /// Create a normalized frame range.
    #[must_use]
    pub fn new(start: i32, end: i32, step: u32) -> Self {
        Self { start, end, step }.normalized()
    }

    /// Raise `end` to `start` if it lies before it, and clamp `step` to 1.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            start: self.start,
            end: self.end.max(self.start),
            step: self.step.max(1),
        }
    }

    /// Sampled frames in increasing order.
    pub fn frames(&self) -> impl Iterator<Item = i32> {
        let range = self.normalized();
        (range.start..=range.end).step_by(range.step as usize)
    }

    /// Number of sampled frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames().count()
    }
}

/// Geometry toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct GeometryParams {
    /// Export vertex coordinates.
    pub vertices: bool,
    /// Export polygon corner indices (requires vertices).
    pub faces: bool,
    /// Export polygon centers (requires faces).
    pub midpoints: bool,
    /// Export polygon normals (requires faces).
    pub normals: bool,
    /// Replace normals with `normal * 0.01 + midpoint` (requires midpoints and normals).
    pub attach_normals: bool,
    /// Export polygon material slots (requires faces).
    pub materials: bool,
    /// Ask the mesh source to triangulate first.
    pub triangulate: bool,
    /// Coordinate axes exported for vertices, midpoints and normals.
    pub axes: AxisSet,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            vertices: true,
            faces: true,
            midpoints: false,
            normals: false,
            attach_normals: false,
            materials: false,
            triangulate: false,
            axes: AxisSet::all(),
        }
    }
}

impl GeometryParams {
    /// No geometry at all.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            vertices: false,
            faces: false,
            ..Self::default()
        }
    }

    /// Clear toggles whose prerequisites are off.
    #[must_use]
    pub const fn normalized(mut self) -> Self {
        self.faces &= self.vertices;
        self.midpoints &= self.faces;
        self.normals &= self.faces;
        self.materials &= self.faces;
        self.attach_normals &= self.midpoints && self.normals;
        self
    }
}

/// Axes and space of one animation channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelParams {
    /// Sampled axes.
    pub axes: AxisSet,
    /// Local channels or world values.
    pub space: TransformSpace,
}

impl ChannelParams {
    /// Channel sampling `axes` in local space.
    #[must_use]
    pub const fn local(axes: AxisSet) -> Self {
        Self {
            axes,
            space: TransformSpace::Local,
        }
    }

    /// Channel sampling `axes` in world space.
    #[must_use]
    pub const fn world(axes: AxisSet) -> Self {
        Self {
            axes,
            space: TransformSpace::World,
        }
    }

    /// Whether any axis is sampled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.axes.is_empty()
    }
}

/// Animation sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationParams {
    /// Sample animation at all.
    pub enabled: bool,
    /// Frames to sample.
    pub frames: FrameRange,
    /// Location channel.
    pub location: ChannelParams,
    /// Rotation channel.
    pub rotation: ChannelParams,
    /// Scale channel.
    pub scale: ChannelParams,
    /// Unit rotations are written in.
    pub rotation_unit: RotationUnit,
    /// Euler order for world rotations.
    pub euler_order: EulerOrder,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            enabled: false,
            frames: FrameRange::default(),
            location: ChannelParams::local(AxisSet::all()),
            rotation: ChannelParams::local(AxisSet::all()),
            scale: ChannelParams::local(AxisSet::none()),
            rotation_unit: RotationUnit::Radians,
            euler_order: EulerOrder::XYZ,
        }
    }
}

impl AnimationParams {
    /// Enabled animation over `frames` with default channels.
    #[must_use]
    pub fn over(frames: FrameRange) -> Self {
        Self {
            enabled: true,
            frames,
            ..Self::default()
        }
    }

    /// Whether any frame will be sampled.
    #[must_use]
    pub const fn samples_anything(&self) -> bool {
        self.enabled
            && (self.location.is_enabled()
                || self.rotation.is_enabled()
                || self.scale.is_enabled())
    }

    /// Query handed to the transform sampler.
    #[must_use]
    pub const fn query(&self) -> TransformQuery {
        TransformQuery {
            location: self.location.space,
            rotation: self.rotation.space,
            scale: self.scale.space,
            euler_order: self.euler_order,
        }
    }

    /// Normalize the frame range.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.frames = self.frames.normalized();
        self
    }
}

/// Parameters for an export.
///
/// # Example
///
/// ```
/// use desmos_export::{ExportParams, NamingMode, OutputFormat};
///
/// let params = ExportParams::default()
///     .with_format(OutputFormat::Structured)
///     .with_naming(NamingMode::ByName);
/// assert_eq!(params.format.extension(), "json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportParams {
    /// Document format.
    pub format: OutputFormat,
    /// Identifier naming.
    pub naming: NamingMode,
    /// Digits kept for non-integral values.
    pub precision: Precision,
    /// Document title.
    pub title: String,
    /// Geometry toggles.
    pub geometry: GeometryParams,
    /// Animation sampling.
    pub animation: AnimationParams,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            naming: NamingMode::Sequential,
            precision: Precision::Rounded,
            title: "Blender Import".to_string(),
            geometry: GeometryParams::default(),
            animation: AnimationParams::default(),
        }
    }
}

impl ExportParams {
    /// Vertices and faces, no animation.
    #[must_use]
    pub fn geometry_only() -> Self {
        Self::default()
    }

    /// Animation over the default frame range, no geometry.
    #[must_use]
    pub fn animation_only() -> Self {
        Self {
            geometry: GeometryParams::disabled(),
            animation: AnimationParams::over(FrameRange::default()),
            ..Self::default()
        }
    }

    /// Defaults, written as a calculator-state script.
    #[must_use]
    pub fn structured() -> Self {
        Self::default().with_format(OutputFormat::Structured)
    }

    /// Parse parameters from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` does not describe `ExportParams`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::ExportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the output format.
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the naming mode.
    #[must_use]
    pub const fn with_naming(mut self, naming: NamingMode) -> Self {
        self.naming = naming;
        self
    }

    /// Set the precision.
    #[must_use]
    pub const fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Set the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the geometry axes.
    #[must_use]
    pub const fn with_axes(mut self, axes: AxisSet) -> Self {
        self.geometry.axes = axes;
        self
    }

    /// Replace the geometry toggles.
    #[must_use]
    pub const fn with_geometry(mut self, geometry: GeometryParams) -> Self {
        self.geometry = geometry;
        self
    }

    /// Replace the animation parameters.
    #[must_use]
    pub const fn with_animation(mut self, animation: AnimationParams) -> Self {
        self.animation = animation;
        self
    }

    /// Apply the silent corrections: frame range and toggle prerequisites.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            geometry: self.geometry.normalized(),
            animation: self.animation.normalized(),
            ..self.clone()
        }
    }
}
