//! Gesture state machine
//!
//! ```text
//!               POINTER_DOWN            THRESHOLD
//!     Idle ───────────────────► Tracking ─────────► Scrolling
//!      ▲  ▲                        │                 │   │
//!      │  │ RELEASE (tap)          │                 │   │ FLICK
//!      │  └────────────────────────┘                 │   ▼
//!      │             RELEASE (drag end)              │  Flicking ──┐
//!      ├─────────────────────────────────────────────┘   │         │
//!      │                 TRAJECTORY_COMPLETE             │         │ SNAP_BACK
//!      ├─────────────────────────────────────────────────┘         │ (ended past an edge)
//!      │                                                           ▼
//!      └──────────────────── TRAJECTORY_COMPLETE ─────────── SnappingBack
//! ```
//!
//! `Tracking` and `Scrolling` also go straight to `SnappingBack` when released
//! past an edge (content grabbed mid snap-back and let go). `POINTER_DOWN` re-grabs from any state, `CANCEL` and `STOP` return to
//! `Idle` from any state.

/// Current phase of a scroller's gesture handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    /// No pointer down, nothing animating
    #[default]
    Idle,
    /// Pointer down, movement still under the threshold
    Tracking,
    /// Threshold exceeded, offset follows the pointer
    Scrolling,
    /// Released with momentum, flick trajectory playing
    Flicking,
    /// Returning an overscrolled offset to the nearest edge
    SnappingBack,
}

impl GestureState {
    /// Returns true if a pointer is down
    pub fn is_pointer_down(&self) -> bool {
        matches!(self, GestureState::Tracking | GestureState::Scrolling)
    }

    /// Returns true if a trajectory is playing
    pub fn is_animating(&self) -> bool {
        matches!(self, GestureState::Flicking | GestureState::SnappingBack)
    }

    /// Returns true unless idle
    pub fn is_active(&self) -> bool {
        !matches!(self, GestureState::Idle)
    }
}

/// Inputs driving [`GestureState`] transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    /// A new gesture starts (also preempts animations)
    PointerDown,
    /// Cumulative movement exceeded the drag threshold
    ThresholdExceeded,
    /// Pointer released without momentum or snap-back
    Release,
    /// Pointer released with enough velocity
    Flick,
    /// The offset ended up past an edge
    SnapBack,
    /// The playing trajectory reached its end
    TrajectoryComplete,
    /// The gesture was interrupted externally
    Cancel,
    /// Animations stopped by a direct offset write
    Stop,
}

impl GestureState {
    /// Next state for `event`, or `None` when the event is ignored here
    pub fn on_event(&self, event: GestureEvent) -> Option<Self> {
        use GestureEvent::*;
        use GestureState::*;

        match (self, event) {
            // Any state: new gesture, cancellation or a forced stop
            (_, PointerDown) => Some(Tracking),
            (Idle, Cancel | Stop) => None,
            (_, Cancel | Stop) => Some(Idle),

            // Tracking: becomes a scroll, or was a tap
            (Tracking, ThresholdExceeded) => Some(Scrolling),
            (Tracking, Release) => Some(Idle),
            (Tracking, SnapBack) => Some(SnappingBack),

            // Scrolling: released into momentum, snap-back or rest
            (Scrolling, Flick) => Some(Flicking),
            (Scrolling, SnapBack) => Some(SnappingBack),
            (Scrolling, Release) => Some(Idle),

            // Flicking: settles, or bounced past an edge
            (Flicking, TrajectoryComplete) => Some(Idle),
            (Flicking, SnapBack) => Some(SnappingBack),

            // SnappingBack: back inside the bounds
            (SnappingBack, TrajectoryComplete) => Some(Idle),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_then_flick_cycle() {
        let mut state = GestureState::Idle;
        for (event, expected) in [
            (GestureEvent::PointerDown, GestureState::Tracking),
            (GestureEvent::ThresholdExceeded, GestureState::Scrolling),
            (GestureEvent::Flick, GestureState::Flicking),
            (GestureEvent::TrajectoryComplete, GestureState::Idle),
        ] {
            state = state.on_event(event).unwrap();
            assert_eq!(state, expected);
        }
    }

    #[test]
    fn test_tap_returns_to_idle() {
        let state = GestureState::Tracking;
        assert_eq!(state.on_event(GestureEvent::Release), Some(GestureState::Idle));
        assert_eq!(state.on_event(GestureEvent::Flick), None);
    }

    #[test]
    fn test_snap_back_paths() {
        assert_eq!(
            GestureState::Scrolling.on_event(GestureEvent::SnapBack),
            Some(GestureState::SnappingBack)
        );
        assert_eq!(
            GestureState::Tracking.on_event(GestureEvent::SnapBack),
            Some(GestureState::SnappingBack)
        );
        assert_eq!(
            GestureState::Flicking.on_event(GestureEvent::SnapBack),
            Some(GestureState::SnappingBack)
        );
        assert_eq!(
            GestureState::SnappingBack.on_event(GestureEvent::TrajectoryComplete),
            Some(GestureState::Idle)
        );
    }

    #[test]
    fn test_regrab_and_cancel_from_any_state() {
        for state in [
            GestureState::Tracking,
            GestureState::Scrolling,
            GestureState::Flicking,
            GestureState::SnappingBack,
        ] {
            assert_eq!(
                state.on_event(GestureEvent::PointerDown),
                Some(GestureState::Tracking)
            );
            assert_eq!(state.on_event(GestureEvent::Cancel), Some(GestureState::Idle));
        }
        assert_eq!(GestureState::Idle.on_event(GestureEvent::Cancel), None);
    }
}
