//! Scroller inputs and the events they produce

use flick_animation::Completion;
use flick_core::{AxisPair, Offset, Velocity};
use serde::Serialize;
use smallvec::SmallVec;

use crate::gesture::Sample;

/// Pointer input routed through [`Scroller::handle`](crate::Scroller::handle)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Pointer pressed
    Start(Sample),
    /// Pointer moved while pressed
    Move(Sample),
    /// Pointer released
    End(Sample),
    /// Gesture taken away by the platform (no release position)
    Cancel,
}

impl PointerInput {
    /// Timestamp of the input, `None` for a cancel
    pub fn timestamp(&self) -> Option<f64> {
        match self {
            PointerInput::Start(sample) | PointerInput::Move(sample) | PointerInput::End(sample) => {
                Some(sample.timestamp)
            }
            PointerInput::Cancel => None,
        }
    }
}

/// Something observable that happened inside a scroller
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScrollEvent {
    /// A playing trajectory was preempted; the offset froze where it was
    TrajectoryAborted { completion: Completion },
    /// Pointer down, drag would start from `offset`
    TrackingStarted { offset: Offset },
    /// Drag threshold exceeded on the `axes` that scroll from now on
    ScrollStarted { axes: AxisPair<bool> },
    /// The offset changed
    Scrolled { offset: Offset },
    /// Pointer released without scrolling
    Tap,
    /// Pointer released without momentum
    DragEnded { offset: Offset },
    /// Pointer released with momentum
    FlickStarted {
        velocity: Velocity,
        target: Offset,
        duration_ms: f32,
    },
    /// Returning an overscrolled offset into the bounds
    SnapBackStarted { target: Offset, duration_ms: f32 },
    /// A trajectory reached its end
    TrajectoryCompleted { completion: Completion },
    /// Gesture cancelled or stopped
    Cancelled { offset: Offset },
}

/// Events produced by a single scroller call, rarely more than two
pub type ScrollEvents = SmallVec<[ScrollEvent; 2]>;
