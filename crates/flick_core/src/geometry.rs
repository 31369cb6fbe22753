//! Offsets, sizes and scroll extents

use serde::{Deserialize, Serialize};

use crate::axis::{Axis, AxisPair};

/// Scroll offset: how far the content is translated from the viewport origin.
///
/// Positive values scroll towards the end of the content, so a valid offset
/// lies in `[0, extent]` on each axis.
pub type Offset = AxisPair<f32>;

/// Velocity in pixels per millisecond
pub type Velocity = AxisPair<f32>;

impl AxisPair<f32> {
    pub const ZERO: AxisPair<f32> = AxisPair::splat(0.0);

    /// Round both components to whole pixels
    pub fn round(self) -> Self {
        self.map(f32::round)
    }

    pub fn is_finite(&self) -> bool {
        self.horizontal.is_finite() && self.vertical.is_finite()
    }
}

/// Pixel size of a viewport, content area or scrollbar track
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Length of this size along an axis
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn to_pair(self) -> AxisPair<f32> {
        AxisPair::new(self.width, self.height)
    }
}

/// Maximum valid scroll offset per axis.
///
/// Always non-negative: content smaller than its viewport yields a zero
/// extent, which disables scrolling on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Extent(AxisPair<f32>);

impl Extent {
    pub const ZERO: Extent = Extent(AxisPair::splat(0.0));

    /// Extent of `content` scrolled inside `viewport`
    pub fn from_sizes(viewport: Size, content: Size) -> Self {
        Self(AxisPair::from_fn(|axis| {
            Self::sanitize(content.along(axis) - viewport.along(axis))
        }))
    }

    /// Build an extent from raw values, flooring negative or NaN values to zero
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self(AxisPair::new(
            Self::sanitize(horizontal),
            Self::sanitize(vertical),
        ))
    }

    fn sanitize(value: f32) -> f32 {
        if value.is_nan() {
            0.0
        } else {
            value.max(0.0)
        }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        self.0[axis]
    }

    pub fn pair(&self) -> AxisPair<f32> {
        self.0
    }

    /// Axes that can scroll at all
    pub fn scrollable(&self) -> AxisPair<bool> {
        self.0.map(|extent| extent > 0.0)
    }

    /// Whether `offset` lies inside `[0, extent]` on `axis`
    pub fn contains(&self, axis: Axis, offset: f32) -> bool {
        (0.0..=self.0[axis]).contains(&offset)
    }
}
