//! Rendering surface and size provider seams
//!
//! The scroller never draws. It pushes offsets and scrollbar metrics into a
//! [`RenderSurface`] and reads sizes from a [`SizeProvider`] when asked to
//! refresh its extents.

use flick_animation::{Completion, Trajectory};
use flick_core::{AxisPair, Offset, Size};
use serde::{Deserialize, Serialize};

use crate::scrollbar::ScrollbarMetrics;

/// Receives everything a scroller wants shown
pub trait RenderSurface {
    /// Translate the content; called in the same step as the offset changes
    fn apply_offset(&mut self, offset: Offset);

    /// Updated indicator geometry, only called when scrollbars are enabled
    fn apply_scrollbars(&mut self, _metrics: &AxisPair<ScrollbarMetrics>) {}

    /// A trajectory started playing. Frames still arrive through
    /// [`apply_offset`](Self::apply_offset).
    fn play_trajectory(&mut self, _trajectory: &Trajectory) {}

    /// Called exactly once for every trajectory passed to
    /// [`play_trajectory`](Self::play_trajectory)
    fn trajectory_finished(&mut self, _completion: &Completion) {}
}

/// Source of viewport and content sizes
pub trait SizeProvider {
    fn viewport_size(&self) -> Size;

    fn content_size(&self) -> Size;

    /// Scrollbar track size, the viewport by default
    fn track_size(&self) -> Size {
        self.viewport_size()
    }

    /// Size of one indicator end cap
    fn scrollbar_end_cap(&self) -> f32 {
        0.0
    }
}

/// Fixed sizes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticSizes {
    pub viewport: Size,
    pub content: Size,
    /// Defaults to the viewport when unset
    pub track: Option<Size>,
    pub end_cap: f32,
}

impl StaticSizes {
    pub fn new(viewport: Size, content: Size) -> Self {
        Self {
            viewport,
            content,
            ..Default::default()
        }
    }

    pub fn with_track(mut self, track: Size) -> Self {
        self.track = Some(track);
        self
    }

    pub fn with_end_cap(mut self, end_cap: f32) -> Self {
        self.end_cap = end_cap;
        self
    }
}

impl SizeProvider for StaticSizes {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn content_size(&self) -> Size {
        self.content
    }

    fn track_size(&self) -> Size {
        self.track.unwrap_or(self.viewport)
    }

    fn scrollbar_end_cap(&self) -> f32 {
        self.end_cap
    }
}

/// A call received by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SurfaceCall {
    ApplyOffset { offset: Offset },
    ApplyScrollbars { metrics: AxisPair<ScrollbarMetrics> },
    PlayTrajectory { trajectory: Trajectory },
    TrajectoryFinished { completion: Completion },
}

/// Surface that records every call, for tests and offline simulation
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Every applied offset, oldest first
    pub fn offsets(&self) -> impl Iterator<Item = Offset> + '_ {
        self.calls.iter().filter_map(|call| match call {
            SurfaceCall::ApplyOffset { offset } => Some(*offset),
            _ => None,
        })
    }

    pub fn last_offset(&self) -> Option<Offset> {
        self.offsets().last()
    }

    pub fn last_scrollbars(&self) -> Option<AxisPair<ScrollbarMetrics>> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::ApplyScrollbars { metrics } => Some(*metrics),
            _ => None,
        })
    }

    pub fn completions(&self) -> impl Iterator<Item = Completion> + '_ {
        self.calls.iter().filter_map(|call| match call {
            SurfaceCall::TrajectoryFinished { completion } => Some(*completion),
            _ => None,
        })
    }

    pub fn played(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::PlayTrajectory { .. }))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn apply_offset(&mut self, offset: Offset) {
        self.calls.push(SurfaceCall::ApplyOffset { offset });
    }

    fn apply_scrollbars(&mut self, metrics: &AxisPair<ScrollbarMetrics>) {
        self.calls.push(SurfaceCall::ApplyScrollbars { metrics: *metrics });
    }

    fn play_trajectory(&mut self, trajectory: &Trajectory) {
        self.calls.push(SurfaceCall::PlayTrajectory {
            trajectory: *trajectory,
        });
    }

    fn trajectory_finished(&mut self, completion: &Completion) {
        self.calls.push(SurfaceCall::TrajectoryFinished {
            completion: *completion,
        });
    }
}
