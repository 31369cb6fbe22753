//! Gesture tracking
//!
//! Turns raw pointer samples into a drag displacement and an exit velocity.
//!
//! Only the two most recent samples are retained (`previous` and `current`),
//! so the exit velocity reflects the very end of the gesture: a drag that
//! slows down before release produces a slow flick no matter how fast it was
//! earlier.

use flick_core::{Axis, AxisPair, Velocity};

use crate::state::GestureState;

/// Pointer position at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Pointer position in pixels
    pub position: AxisPair<f32>,
    /// Milliseconds on a monotonic clock
    pub timestamp: f64,
}

impl Sample {
    pub fn new(x: f32, y: f32, timestamp: f64) -> Self {
        Self {
            position: AxisPair::new(x, y),
            timestamp,
        }
    }
}

/// What a move sample did to the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Not tracking, or the sample was out of order
    Ignored,
    /// Still under the threshold
    Tracking,
    /// This sample crossed the threshold; the locked axes scroll from now on
    ScrollStarted(AxisPair<bool>),
    /// Already scrolling
    Scrolling,
}

/// How a gesture ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// Released without ever crossing the threshold
    Tap,
    /// Released without momentum
    DragEnd,
    /// Released while moving; pointer velocity in px/ms on the locked axes
    Flick { velocity: Velocity },
}

/// Tracks a single pointer gesture
#[derive(Debug, Clone)]
pub struct GestureTracker {
    threshold: f32,
    trigger_threshold: f32,
    phase: GestureState,
    origin: Option<Sample>,
    previous: Option<Sample>,
    current: Option<Sample>,
    tracked: AxisPair<bool>,
    locked: AxisPair<bool>,
}

impl GestureTracker {
    /// `threshold` in pixels, `trigger_threshold` in milliseconds
    pub fn new(threshold: f32, trigger_threshold: f32) -> Self {
        Self {
            threshold,
            trigger_threshold,
            phase: GestureState::Idle,
            origin: None,
            previous: None,
            current: None,
            tracked: AxisPair::splat(false),
            locked: AxisPair::splat(false),
        }
    }

    /// Idle, Tracking or Scrolling
    pub fn phase(&self) -> GestureState {
        self.phase
    }

    /// Axes that scroll for the rest of this gesture
    pub fn locked_axes(&self) -> AxisPair<bool> {
        self.locked
    }

    /// Start a gesture at `sample`, only `tracked` axes can start scrolling
    pub fn on_sample_start(&mut self, sample: Sample, tracked: AxisPair<bool>) {
        self.phase = GestureState::Tracking;
        self.origin = Some(sample);
        self.previous = None;
        self.current = Some(sample);
        self.tracked = tracked;
        self.locked = AxisPair::splat(false);
        tracing::trace!(
            "GestureTracker: start at ({:.1}, {:.1}) t={:.1}",
            sample.position.horizontal,
            sample.position.vertical,
            sample.timestamp
        );
    }

    /// Feed a move sample
    pub fn on_sample(&mut self, sample: Sample) -> SampleOutcome {
        if !self.phase.is_pointer_down() {
            return SampleOutcome::Ignored;
        }

        if let Some(current) = self.current {
            if sample.timestamp <= current.timestamp {
                tracing::trace!(
                    "GestureTracker: ignoring sample at t={:.1}, not after t={:.1}",
                    sample.timestamp,
                    current.timestamp
                );
                return SampleOutcome::Ignored;
            }
        }

        self.previous = self.current;
        self.current = Some(sample);

        if self.phase == GestureState::Scrolling {
            return SampleOutcome::Scrolling;
        }

        let displacement = self.displacement();
        let crossed = AxisPair::from_fn(|axis| {
            self.tracked[axis] && displacement[axis].abs() > self.threshold
        });
        if !crossed.any() {
            return SampleOutcome::Tracking;
        }

        self.phase = GestureState::Scrolling;
        self.locked = crossed;
        tracing::debug!(
            "GestureTracker: threshold {:.1}px exceeded, displacement=({:.1}, {:.1}), locked x={} y={}",
            self.threshold,
            displacement.horizontal,
            displacement.vertical,
            crossed.horizontal,
            crossed.vertical
        );
        SampleOutcome::ScrollStarted(crossed)
    }

    /// Pointer travel since the gesture started
    pub fn displacement(&self) -> AxisPair<f32> {
        match (self.origin, self.current) {
            (Some(origin), Some(current)) => current
                .position
                .zip_with(origin.position, |now, start| now - start),
            _ => AxisPair::splat(0.0),
        }
    }

    /// Pointer velocity on the locked axes for a release at `release_time`.
    ///
    /// Zero when fewer than two samples were retained or the pointer rested
    /// longer than the trigger threshold before the release.
    pub fn velocity(&self, release_time: f64) -> Velocity {
        let (Some(previous), Some(current)) = (self.previous, self.current) else {
            return Velocity::ZERO;
        };

        let rest = release_time - current.timestamp;
        if rest > f64::from(self.trigger_threshold) {
            tracing::trace!(
                "GestureTracker: stale release after {:.1}ms, no velocity",
                rest
            );
            return Velocity::ZERO;
        }

        let elapsed = (current.timestamp - previous.timestamp) as f32;
        if elapsed <= 0.0 {
            return Velocity::ZERO;
        }

        AxisPair::from_fn(|axis: Axis| {
            if self.locked[axis] {
                (current.position[axis] - previous.position[axis]) / elapsed
            } else {
                0.0
            }
        })
    }

    /// Finish the gesture with the release sample.
    ///
    /// Returns `None` when no gesture was being tracked.
    pub fn on_sample_end(&mut self, sample: Sample) -> Option<GestureEnd> {
        let end = match self.phase {
            GestureState::Tracking => GestureEnd::Tap,
            GestureState::Scrolling => {
                let velocity = self.velocity(sample.timestamp);
                if velocity.horizontal != 0.0 || velocity.vertical != 0.0 {
                    GestureEnd::Flick { velocity }
                } else {
                    GestureEnd::DragEnd
                }
            }
            _ => return None,
        };

        tracing::trace!("GestureTracker: end {:?}", end);
        self.reset();
        Some(end)
    }

    /// Drop the gesture without producing a flick
    pub fn cancel(&mut self) {
        if self.phase.is_pointer_down() {
            tracing::trace!("GestureTracker: cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = GestureState::Idle;
        self.origin = None;
        self.previous = None;
        self.current = None;
        self.locked = AxisPair::splat(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_tracker() -> GestureTracker {
        let mut tracker = GestureTracker::new(5.0, 150.0);
        tracker.on_sample_start(Sample::new(0.0, 0.0, 0.0), AxisPair::new(false, true));
        tracker
    }

    #[test]
    fn test_threshold_crossing() {
        let mut tracker = vertical_tracker();

        assert_eq!(
            tracker.on_sample(Sample::new(0.0, 3.0, 10.0)),
            SampleOutcome::Tracking
        );
        assert_eq!(tracker.phase(), GestureState::Tracking);

        // Cumulative 13px
        assert_eq!(
            tracker.on_sample(Sample::new(0.0, 13.0, 20.0)),
            SampleOutcome::ScrollStarted(AxisPair::new(false, true))
        );
        assert_eq!(tracker.phase(), GestureState::Scrolling);
        assert_eq!(tracker.displacement().vertical, 13.0);
    }

    #[test]
    fn test_untracked_axis_never_locks() {
        let mut tracker = vertical_tracker();
        assert_eq!(
            tracker.on_sample(Sample::new(50.0, 2.0, 10.0)),
            SampleOutcome::Tracking
        );
    }

    #[test]
    fn test_axis_lock_not_reevaluated() {
        let mut tracker = GestureTracker::new(5.0, 150.0);
        tracker.on_sample_start(Sample::new(0.0, 0.0, 0.0), AxisPair::splat(true));

        tracker.on_sample(Sample::new(0.0, 10.0, 10.0));
        assert_eq!(tracker.locked_axes(), AxisPair::new(false, true));

        // Moving sideways later does not unlock the horizontal axis
        assert_eq!(
            tracker.on_sample(Sample::new(40.0, 20.0, 20.0)),
            SampleOutcome::Scrolling
        );
        assert_eq!(tracker.locked_axes(), AxisPair::new(false, true));
    }

    #[test]
    fn test_velocity_from_last_two_samples() {
        let mut tracker = vertical_tracker();
        tracker.on_sample(Sample::new(0.0, 10.0, 10.0));
        tracker.on_sample(Sample::new(0.0, 20.0, 20.0));
        tracker.on_sample(Sample::new(0.0, 60.0, 30.0));

        // Only the last pair counts: 40px over 10ms
        let velocity = tracker.velocity(35.0);
        assert_eq!(velocity.vertical, 4.0);
        assert_eq!(velocity.horizontal, 0.0);

        match tracker.on_sample_end(Sample::new(0.0, 60.0, 35.0)) {
            Some(GestureEnd::Flick { velocity }) => assert_eq!(velocity.vertical, 4.0),
            other => panic!("expected flick, got {other:?}"),
        }
        assert_eq!(tracker.phase(), GestureState::Idle);
    }

    #[test]
    fn test_stale_release_has_no_velocity() {
        let mut tracker = vertical_tracker();
        tracker.on_sample(Sample::new(0.0, 10.0, 10.0));
        tracker.on_sample(Sample::new(0.0, 30.0, 20.0));

        assert_eq!(
            tracker.on_sample_end(Sample::new(0.0, 30.0, 200.0)),
            Some(GestureEnd::DragEnd)
        );
    }

    #[test]
    fn test_out_of_order_sample_ignored() {
        let mut tracker = vertical_tracker();
        tracker.on_sample(Sample::new(0.0, 10.0, 10.0));

        assert_eq!(
            tracker.on_sample(Sample::new(0.0, 500.0, 10.0)),
            SampleOutcome::Ignored
        );
        assert_eq!(tracker.displacement().vertical, 10.0);
    }

    #[test]
    fn test_tap_and_cancel() {
        let mut tracker = vertical_tracker();
        tracker.on_sample(Sample::new(0.0, 2.0, 10.0));
        assert_eq!(
            tracker.on_sample_end(Sample::new(0.0, 2.0, 20.0)),
            Some(GestureEnd::Tap)
        );

        let mut tracker = vertical_tracker();
        tracker.on_sample(Sample::new(0.0, 20.0, 10.0));
        tracker.cancel();
        assert_eq!(tracker.phase(), GestureState::Idle);
        assert_eq!(tracker.on_sample_end(Sample::new(0.0, 20.0, 20.0)), None);
        assert_eq!(
            tracker.on_sample(Sample::new(0.0, 30.0, 30.0)),
            SampleOutcome::Ignored
        );
    }
}
