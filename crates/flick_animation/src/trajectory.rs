//! Scroll trajectories
//!
//! A [`Trajectory`] describes where the offset goes after the pointer is
//! released: one independent [`AxisTrack`] per moving axis, each with its own
//! duration and timing curve. Trajectories are computed once and never
//! modified; playback only reads them.

use flick_core::{Axis, AxisPair, Offset};
use serde::Serialize;

use crate::easing::TimingFunction;

/// What produced a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryKind {
    /// Momentum after a flick gesture
    Flick,
    /// Return of an overscrolled offset to the nearest boundary
    SnapBack,
}

/// Motion of a single axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTrack {
    /// Offset when the track starts
    pub from: f32,
    /// Offset when the track ends
    pub to: f32,
    /// Track length in milliseconds
    pub duration_ms: f32,
    /// Easing applied over the duration
    pub timing: TimingFunction,
}

impl AxisTrack {
    pub fn new(from: f32, to: f32, duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            timing,
        }
    }

    /// Signed distance covered by this track
    pub fn distance(&self) -> f32 {
        self.to - self.from
    }

    /// Offset `elapsed_ms` after the track started
    pub fn sample(&self, elapsed_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 || elapsed_ms >= self.duration_ms {
            return self.to;
        }
        let progress = self.timing.transform(elapsed_ms / self.duration_ms);
        self.from + self.distance() * progress
    }

    pub fn is_finished(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

/// Offset-over-time plan for one or both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trajectory {
    kind: TrajectoryKind,
    tracks: AxisPair<Option<AxisTrack>>,
}

impl Trajectory {
    /// Build a trajectory, returns `None` when no axis moves
    pub fn new(kind: TrajectoryKind, tracks: AxisPair<Option<AxisTrack>>) -> Option<Self> {
        if tracks.horizontal.is_none() && tracks.vertical.is_none() {
            return None;
        }
        Some(Self { kind, tracks })
    }

    pub fn kind(&self) -> TrajectoryKind {
        self.kind
    }

    pub fn track(&self, axis: Axis) -> Option<&AxisTrack> {
        self.tracks[axis].as_ref()
    }

    pub fn tracks(&self) -> &AxisPair<Option<AxisTrack>> {
        &self.tracks
    }

    /// Signed distance per axis (zero for axes without a track)
    pub fn distance(&self) -> AxisPair<f32> {
        self.tracks
            .map(|track| track.map_or(0.0, |track| track.distance()))
    }

    /// Duration of the longest track
    pub fn duration_ms(&self) -> f32 {
        self.tracks
            .iter()
            .filter_map(|(_, track)| track.as_ref())
            .map(|track| track.duration_ms)
            .fold(0.0, f32::max)
    }

    /// Final offset, axes without a track keep their value from `origin`
    pub fn target(&self, origin: Offset) -> Offset {
        origin.zip_with(self.tracks, |value, track| {
            track.map_or(value, |track| track.to)
        })
    }

    /// Offset `elapsed_ms` into playback
    pub fn sample(&self, origin: Offset, elapsed_ms: f32) -> Offset {
        origin.zip_with(self.tracks, |value, track| {
            track.map_or(value, |track| track.sample(elapsed_ms))
        })
    }

    pub fn is_finished(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.duration_ms()
    }
}
