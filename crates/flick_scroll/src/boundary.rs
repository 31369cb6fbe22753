//! Boundary policy
//!
//! Decides what happens to offsets outside `[0, extent]`. Without elasticity
//! they are clamped hard. With elasticity the overshoot is damped: by
//! `factor_drag` while the finger drags, and by `factor_flick` (capped at
//! `max` pixels) when a flick carries the content past the edge. Once the
//! gesture is over, an out-of-bounds offset is returned with a snap-back
//! trajectory.

use flick_animation::{AxisTrack, Trajectory, TrajectoryKind};
use flick_core::{Axis, AxisPair, Extent, Offset};

use crate::config::{ElasticityConfig, SnapBackConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPolicy {
    elastic: bool,
    elasticity: ElasticityConfig,
    snap_back: SnapBackConfig,
}

impl BoundaryPolicy {
    pub fn new(elastic: bool, elasticity: ElasticityConfig, snap_back: SnapBackConfig) -> Self {
        Self {
            elastic,
            elasticity,
            snap_back,
        }
    }

    pub fn is_elastic(&self) -> bool {
        self.elastic
    }

    /// Offset actually applied for a `proposed` offset on one axis
    pub fn clamp(&self, proposed: f32, extent: f32, dragging: bool) -> f32 {
        let extent = extent.max(0.0);
        if !self.elastic {
            return proposed.min(extent).max(0.0);
        }

        let overshoot = overshoot(proposed, extent);
        if overshoot == 0.0 {
            return proposed;
        }
        let boundary = nearest_boundary(proposed, extent);

        if dragging {
            boundary + overshoot * self.elasticity.factor_drag
        } else {
            let damped = (overshoot.abs() * self.elasticity.factor_flick).min(self.elasticity.max);
            boundary + overshoot.signum() * damped
        }
    }

    /// Undamped offset that [`clamp`](Self::clamp) maps back to `applied`
    /// while dragging.
    ///
    /// A drag that grabs content already past an edge starts from here, so the
    /// content does not jump under the finger.
    pub fn drag_origin(&self, applied: f32, extent: f32) -> f32 {
        let extent = extent.max(0.0);
        if !self.elastic {
            return applied.min(extent).max(0.0);
        }
        let overshoot = overshoot(applied, extent);
        if overshoot == 0.0 {
            return applied;
        }
        let boundary = nearest_boundary(applied, extent);
        if self.elasticity.factor_drag > 0.0 {
            boundary + overshoot / self.elasticity.factor_drag
        } else {
            boundary
        }
    }

    /// [`clamp`](Self::clamp) applied to both axes
    pub fn clamp_offset(&self, proposed: Offset, extent: Extent, dragging: bool) -> Offset {
        AxisPair::from_fn(|axis| self.clamp(proposed[axis], extent.get(axis), dragging))
    }

    pub fn is_out_of_bounds(&self, offset: Offset, extent: Extent) -> bool {
        Axis::ALL
            .into_iter()
            .any(|axis| !extent.contains(axis, offset[axis]))
    }

    /// Trajectory returning `offset` inside the bounds, `None` if already inside
    pub fn snap_back(&self, offset: Offset, extent: Extent) -> Option<Trajectory> {
        let tracks = AxisPair::from_fn(|axis| {
            let value = offset[axis];
            let extent = extent.get(axis);
            let overshoot = overshoot(value, extent);
            (overshoot != 0.0).then(|| {
                AxisTrack::new(
                    value,
                    nearest_boundary(value, extent),
                    self.snap_back_duration(overshoot),
                    self.snap_back.timing_func,
                )
            })
        });
        let trajectory = Trajectory::new(TrajectoryKind::SnapBack, tracks)?;
        tracing::debug!(
            "BoundaryPolicy: snap back from ({:.1}, {:.1}) over {:.0}ms",
            offset.horizontal,
            offset.vertical,
            trajectory.duration_ms()
        );
        Some(trajectory)
    }

    /// Snap-back duration for a bounce `overshoot` pixels deep
    pub fn snap_back_duration(&self, overshoot: f32) -> f32 {
        let default_time = self.snap_back.default_time;
        if self.snap_back.always_default_time || self.elasticity.max <= 0.0 {
            return default_time;
        }
        let depth = (overshoot.abs() / self.elasticity.max).min(1.0);
        default_time * depth
    }
}

/// Signed distance past the nearest edge, zero when inside `[0, extent]`
pub fn overshoot(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        value
    } else if value > extent {
        value - extent
    } else {
        0.0
    }
}

/// The edge closest to `value`
pub fn nearest_boundary(value: f32, extent: f32) -> f32 {
    if value > extent {
        extent
    } else if value < 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(elastic: bool) -> BoundaryPolicy {
        BoundaryPolicy::new(
            elastic,
            ElasticityConfig::default(),
            SnapBackConfig::default(),
        )
    }

    #[test]
    fn test_hard_clamp_stays_in_bounds() {
        let policy = policy(false);
        for proposed in [-500.0, -0.1, 0.0, 123.0, 600.0, 600.1, 5000.0] {
            for dragging in [true, false] {
                let applied = policy.clamp(proposed, 600.0, dragging);
                assert!((0.0..=600.0).contains(&applied), "{proposed} -> {applied}");
            }
        }
    }

    #[test]
    fn test_elastic_inside_unchanged() {
        let policy = policy(true);
        assert_eq!(policy.clamp(250.0, 600.0, true), 250.0);
        assert_eq!(policy.clamp(0.0, 600.0, false), 0.0);
    }

    #[test]
    fn test_elastic_drag_damping() {
        let policy = policy(true);
        for overshoot in [1.0, 20.0, 75.0, 400.0] {
            assert_eq!(policy.clamp(600.0 + overshoot, 600.0, true), 600.0 + overshoot * 0.5);
            assert_eq!(policy.clamp(-overshoot, 600.0, true), -overshoot * 0.5);
        }
    }

    #[test]
    fn test_elastic_flick_damping_capped() {
        let policy = policy(true);
        // 0.2 factor below the cap
        assert!((policy.clamp(700.0, 600.0, false) - 620.0).abs() < 1e-4);
        // Capped at 100px
        assert_eq!(policy.clamp(2000.0, 600.0, false), 700.0);
        assert_eq!(policy.clamp(-2000.0, 600.0, false), -100.0);
    }

    #[test]
    fn test_drag_origin_inverts_drag_damping() {
        let policy = policy(true);
        assert_eq!(policy.drag_origin(300.0, 600.0), 300.0);
        assert_eq!(policy.drag_origin(620.0, 600.0), 640.0);
        assert_eq!(policy.drag_origin(-15.0, 600.0), -30.0);
        assert_eq!(policy.clamp(policy.drag_origin(-15.0, 600.0), 600.0, true), -15.0);

        assert_eq!(self::policy(false).drag_origin(620.0, 600.0), 600.0);
    }

    #[test]
    fn test_snap_back_to_nearest_edge() {
        let policy = policy(true);
        let extent = Extent::new(0.0, 600.0);

        assert!(policy.snap_back(Offset::new(0.0, 300.0), extent).is_none());

        let trajectory = policy.snap_back(Offset::new(0.0, 650.0), extent).unwrap();
        assert_eq!(trajectory.kind(), TrajectoryKind::SnapBack);
        assert!(trajectory.track(Axis::Horizontal).is_none());
        let track = trajectory.track(Axis::Vertical).unwrap();
        assert_eq!(track.from, 650.0);
        assert_eq!(track.to, 600.0);
        assert_eq!(track.duration_ms, 400.0);

        let trajectory = policy.snap_back(Offset::new(0.0, -30.0), extent).unwrap();
        assert_eq!(trajectory.target(Offset::new(0.0, -30.0)), Offset::ZERO);
    }

    #[test]
    fn test_snap_back_duration_scales_with_depth() {
        let policy = BoundaryPolicy::new(
            true,
            ElasticityConfig::default(),
            SnapBackConfig {
                always_default_time: false,
                ..Default::default()
            },
        );
        assert_eq!(policy.snap_back_duration(50.0), 200.0);
        assert_eq!(policy.snap_back_duration(-25.0), 100.0);
        // Never longer than the default
        assert_eq!(policy.snap_back_duration(500.0), 400.0);
        assert!(policy.snap_back_duration(10.0) < policy.snap_back_duration(20.0));
    }

    #[test]
    fn test_out_of_bounds_detection() {
        let policy = policy(true);
        let extent = Extent::new(100.0, 600.0);
        assert!(!policy.is_out_of_bounds(Offset::new(100.0, 0.0), extent));
        assert!(policy.is_out_of_bounds(Offset::new(100.5, 0.0), extent));
        assert!(policy.is_out_of_bounds(Offset::new(0.0, -1.0), extent));
    }
}
