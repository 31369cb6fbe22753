//! Flick planning
//!
//! Models the content as sliding on with a velocity that decays
//! geometrically every millisecond:
//!
//! ```text
//! v(t) = v0 × f^t                         f = friction per ms
//! duration: |v0| × f^T = min_speed   →    T = ln(min_speed / |v0|) / ln f
//! distance: Σ v0 × f^t for t in 1..=T →   v0 × f / (1 − f) × (1 − f^T)
//!                                       = f / (1 − f) × (v0 − sign(v0) × min_speed)
//! ```
//!
//! The distance shrinks to zero as the speed approaches `min_speed` and grows
//! with `|v0|`, so faster flicks always travel further.

use flick_animation::{AxisTrack, TimingFunction, Trajectory, TrajectoryKind};
use flick_core::{AxisPair, Extent, Offset, Velocity};

use crate::boundary::BoundaryPolicy;
use crate::config::FlickingConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlickPlanner {
    friction: f32,
    min_speed: f32,
    timing: TimingFunction,
    boundary: BoundaryPolicy,
}

impl FlickPlanner {
    pub fn new(flicking: &FlickingConfig, boundary: BoundaryPolicy) -> Self {
        Self {
            friction: flicking.friction,
            min_speed: flicking.min_speed,
            timing: flicking.timing_func,
            boundary,
        }
    }

    /// Whether `velocity` (px/ms) is fast enough to flick
    pub fn qualifies(&self, velocity: f32) -> bool {
        velocity.is_finite() && velocity.abs() >= self.min_speed
    }

    /// Distance the content travels, signed like `velocity`
    pub fn distance(&self, velocity: f32) -> f32 {
        if !self.qualifies(velocity) {
            return 0.0;
        }
        let decay = self.friction / (1.0 - self.friction);
        decay * (velocity - velocity.signum() * self.min_speed)
    }

    /// Milliseconds until the speed drops to the minimum
    pub fn duration(&self, velocity: f32) -> f32 {
        if !self.qualifies(velocity) {
            return 0.0;
        }
        ((self.min_speed / velocity.abs()).ln() / self.friction.ln()).max(0.0)
    }

    /// Plan the flick for a pointer released at `exit_velocity`.
    ///
    /// The offset moves against the pointer, so the target is
    /// `current − distance`, damped by the boundary policy if it lands past an
    /// edge. Returns `None` when no axis is fast enough or nothing would move.
    pub fn plan(&self, exit_velocity: Velocity, current: Offset, extent: Extent) -> Option<Trajectory> {
        let tracks = AxisPair::from_fn(|axis| {
            let velocity = exit_velocity[axis];
            let extent = extent.get(axis);
            if !self.qualifies(velocity) || extent <= 0.0 {
                return None;
            }

            let from = current[axis];
            let target = self
                .boundary
                .clamp(from - self.distance(velocity), extent, false);
            if target == from {
                return None;
            }

            Some(AxisTrack::new(
                from,
                target,
                self.duration(velocity),
                self.timing,
            ))
        });

        let trajectory = Trajectory::new(TrajectoryKind::Flick, tracks)?;
        tracing::debug!(
            "FlickPlanner: velocity=({:.3}, {:.3}) px/ms, distance=({:.1}, {:.1}), duration={:.0}ms",
            exit_velocity.horizontal,
            exit_velocity.vertical,
            trajectory.distance().horizontal,
            trajectory.distance().vertical,
            trajectory.duration_ms()
        );
        Some(trajectory)
    }
}
