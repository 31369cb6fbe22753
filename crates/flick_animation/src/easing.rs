//! Cubic timing curves
//!
//! A [`TimingFunction`] is a CSS-style `cubic-bezier(x1, y1, x2, y2)` curve
//! anchored at `(0, 0)` and `(1, 1)`. It maps the linear progress of an
//! animation to eased progress.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a set of control points cannot form a timing curve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimingError {
    /// A control value is NaN or infinite
    #[error("timing function control point {index} is not finite ({value})")]
    NotFinite { index: usize, value: f32 },

    /// The x coordinates must stay in [0, 1] to keep the curve a function of time
    #[error("timing function x control point {index} must be within [0, 1], got {value}")]
    XOutOfRange { index: usize, value: f32 },
}

/// Cubic bezier easing curve.
///
/// Serializes as the four control values `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f32; 4]", into = "[f32; 4]")]
pub struct TimingFunction {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl TimingFunction {
    /// Straight line, progress equals time
    pub const LINEAR: TimingFunction = TimingFunction {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };

    /// Decelerating curve used for flicks
    pub const FLICK: TimingFunction = TimingFunction {
        x1: 0.0,
        y1: 0.3,
        x2: 0.6,
        y2: 1.0,
    };

    /// Accelerating curve used to pull overscrolled content back
    pub const SNAP_BACK: TimingFunction = TimingFunction {
        x1: 0.4,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };

    /// Create a curve from its two inner control points
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self, TimingError> {
        Self::from_points([x1, y1, x2, y2])
    }

    /// Create a curve from `[x1, y1, x2, y2]`
    pub fn from_points(points: [f32; 4]) -> Result<Self, TimingError> {
        for (index, value) in points.into_iter().enumerate() {
            if !value.is_finite() {
                return Err(TimingError::NotFinite { index, value });
            }
            if index % 2 == 0 && !(0.0..=1.0).contains(&value) {
                return Err(TimingError::XOutOfRange { index, value });
            }
        }
        let [x1, y1, x2, y2] = points;
        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn points(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Eased progress for a linear `fraction` of elapsed time.
    ///
    /// Fractions outside [0, 1] are clamped.
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }

        let (ax, bx, cx) = coefficients(self.x1, self.x2);
        let (ay, by, cy) = coefficients(self.y1, self.y2);

        let t = solve_curve_x(ax, bx, cx, fraction);
        sample_curve(ay, by, cy, t)
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl TryFrom<[f32; 4]> for TimingFunction {
    type Error = TimingError;

    fn try_from(points: [f32; 4]) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<TimingFunction> for [f32; 4] {
    fn from(timing: TimingFunction) -> Self {
        timing.points()
    }
}

/// Polynomial coefficients of one bezier coordinate with endpoints 0 and 1
fn coefficients(p1: f32, p2: f32) -> (f32, f32, f32) {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (a, b, c)
}

fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
    ((a * t + b) * t + c) * t
}

fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
    (3.0 * a * t + 2.0 * b) * t + c
}

/// Find the curve parameter whose x coordinate equals `x`
fn solve_curve_x(a: f32, b: f32, c: f32, x: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    // Newton-Raphson first, it converges in a few steps for typical curves
    let mut t = x;
    for _ in 0..8 {
        let error = sample_curve(a, b, c, t) - x;
        if error.abs() < EPSILON {
            return t;
        }
        let slope = sample_derivative(a, b, c, t);
        if slope.abs() < EPSILON {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }

    // Flat spots stall Newton, fall back to bisection
    let mut low = 0.0;
    let mut high = 1.0;
    t = x;
    for _ in 0..32 {
        let error = sample_curve(a, b, c, t) - x;
        if error.abs() < EPSILON {
            break;
        }
        if error > 0.0 {
            high = t;
        } else {
            low = t;
        }
        t = 0.5 * (low + high);
    }
    t
}
