//! Scroll axes and per-axis pairs
//!
//! Every piece of scroll state exists once per axis. [`AxisPair`] keeps the
//! two values side by side and is indexed by [`Axis`], so code that works on
//! one axis can be written once and run for both.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the two independent scroll dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Left/right scrolling
    Horizontal,
    /// Up/down scrolling
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The other axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Short label used in log output
    pub fn label(self) -> &'static str {
        match self {
            Axis::Horizontal => "x",
            Axis::Vertical => "y",
        }
    }
}

/// A value for each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxisPair<T> {
    pub horizontal: T,
    pub vertical: T,
}

impl<T> AxisPair<T> {
    pub const fn new(horizontal: T, vertical: T) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Build a pair by evaluating `f` for each axis
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            horizontal: f(Axis::Horizontal),
            vertical: f(Axis::Vertical),
        }
    }

    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> AxisPair<U> {
        AxisPair {
            horizontal: f(self.horizontal),
            vertical: f(self.vertical),
        }
    }

    /// Combine two pairs axis by axis
    pub fn zip_with<U, V>(self, other: AxisPair<U>, mut f: impl FnMut(T, U) -> V) -> AxisPair<V> {
        AxisPair {
            horizontal: f(self.horizontal, other.horizontal),
            vertical: f(self.vertical, other.vertical),
        }
    }

    pub fn as_ref(&self) -> AxisPair<&T> {
        AxisPair {
            horizontal: &self.horizontal,
            vertical: &self.vertical,
        }
    }

    /// Iterate `(axis, value)` pairs, horizontal first
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        [
            (Axis::Horizontal, &self.horizontal),
            (Axis::Vertical, &self.vertical),
        ]
        .into_iter()
    }
}

impl<T: Copy> AxisPair<T> {
    /// Same value on both axes
    pub const fn splat(value: T) -> Self {
        Self {
            horizontal: value,
            vertical: value,
        }
    }
}

impl AxisPair<bool> {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }

    pub fn all(&self) -> bool {
        self.horizontal && self.vertical
    }
}

impl<T> Index<Axis> for AxisPair<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        self.get(axis)
    }
}

impl<T> IndexMut<Axis> for AxisPair<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        self.get_mut(axis)
    }
}
