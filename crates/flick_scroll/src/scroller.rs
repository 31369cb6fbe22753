//! The scroller
//!
//! One [`Scroller`] per scrollable element. It owns the offset, the gesture
//! in progress and the playing trajectory, and is driven entirely from
//! outside:
//!
//! - pointer input through [`Scroller::handle`]
//! - animation frames through [`Scroller::tick`]
//! - size changes through [`Scroller::refresh_extents`]
//!
//! Every call runs to completion synchronously and reports what happened as
//! [`ScrollEvents`]. Offsets are pushed to the [`RenderSurface`] in the same
//! call that changes them.

use flick_animation::{Trajectory, TrajectoryKind, TrajectoryPlayer};
use flick_core::{AxisPair, Extent, Offset, Size};

use crate::boundary::BoundaryPolicy;
use crate::config::{ScrollConfig, ScrollerOptions};
use crate::error::Result;
use crate::flick::FlickPlanner;
use crate::gesture::{GestureEnd, GestureTracker, Sample, SampleOutcome};
use crate::input::{PointerInput, ScrollEvent, ScrollEvents};
use crate::offset::OffsetModel;
use crate::scrollbar::ScrollbarMetrics;
use crate::state::{GestureEvent, GestureState};
use crate::surface::{RenderSurface, SizeProvider};

/// Sizes read from the last [`SizeProvider`]
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    viewport: Size,
    content: Size,
    track: Size,
    end_cap: f32,
}

impl Layout {
    fn read<P: SizeProvider + ?Sized>(provider: &P) -> Self {
        Self {
            viewport: provider.viewport_size(),
            content: provider.content_size(),
            track: provider.track_size(),
            end_cap: provider.scrollbar_end_cap(),
        }
    }
}

/// Momentum scroller for a single element
#[derive(Debug)]
pub struct Scroller<S: RenderSurface> {
    config: ScrollConfig,
    options: ScrollerOptions,
    state: GestureState,
    model: OffsetModel,
    tracker: GestureTracker,
    boundary: BoundaryPolicy,
    planner: FlickPlanner,
    player: TrajectoryPlayer,
    layout: Option<Layout>,
    scrollable: AxisPair<bool>,
    /// Offset the current drag measures its displacement from
    drag_origin: Offset,
    scrollbars: AxisPair<ScrollbarMetrics>,
    /// Latest time seen from samples or ticks
    clock: f64,
    surface: S,
}

impl<S: RenderSurface> Scroller<S> {
    /// Create a scroller, rejecting invalid configuration.
    ///
    /// Nothing can scroll until [`refresh_extents`](Self::refresh_extents)
    /// has been called once.
    pub fn new(config: ScrollConfig, options: ScrollerOptions, surface: S) -> Result<Self> {
        config.validate()?;
        let boundary = BoundaryPolicy::new(options.elastic, config.elasticity, config.snap_back);

        Ok(Self {
            config,
            options,
            state: GestureState::Idle,
            model: OffsetModel::new(),
            tracker: GestureTracker::new(config.threshold, config.flicking.trigger_threshold),
            boundary,
            planner: FlickPlanner::new(&config.flicking, boundary),
            player: TrajectoryPlayer::new(),
            layout: None,
            scrollable: AxisPair::splat(false),
            drag_origin: Offset::ZERO,
            scrollbars: AxisPair::default(),
            clock: 0.0,
            surface,
        })
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn options(&self) -> ScrollerOptions {
        self.options
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn current_offset(&self) -> Offset {
        self.model.current_offset()
    }

    pub fn current_offset_rounded(&self) -> Offset {
        self.model.current_offset_rounded()
    }

    pub fn max_extent(&self) -> Extent {
        self.model.max_extent()
    }

    /// Axes with a positive extent
    pub fn scrollable_axes(&self) -> AxisPair<bool> {
        self.scrollable
    }

    /// Returns true while a trajectory is playing
    pub fn is_animating(&self) -> bool {
        self.player.is_playing()
    }

    /// Indicator geometry as of the last offset change
    pub fn scrollbar_metrics(&self) -> &AxisPair<ScrollbarMetrics> {
        &self.scrollbars
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Single entry point for pointer input
    pub fn handle(&mut self, input: PointerInput) -> ScrollEvents {
        if let Some(timestamp) = input.timestamp() {
            self.advance_clock(timestamp);
        }

        match input {
            PointerInput::Start(sample) => self.on_start(sample),
            PointerInput::Move(sample) => self.on_move(sample),
            PointerInput::End(sample) => self.on_end(sample),
            PointerInput::Cancel => self.halt(self.clock, GestureEvent::Cancel),
        }
    }

    /// Advance the playing trajectory to `now` (ms) and apply the frame
    pub fn tick(&mut self, now: f64) -> ScrollEvents {
        self.advance_clock(now);
        let mut events = ScrollEvents::new();

        let Some(frame) = self.player.advance(now) else {
            return events;
        };
        if frame.offset != self.model.current_offset() {
            self.apply(frame.offset);
            events.push(ScrollEvent::Scrolled {
                offset: frame.offset,
            });
        }

        let Some(completion) = frame.completion else {
            return events;
        };
        self.surface.trajectory_finished(&completion);
        events.push(ScrollEvent::TrajectoryCompleted { completion });

        // A flick that ran past an edge bounces back
        let bounce = match completion.kind {
            TrajectoryKind::Flick => self
                .boundary
                .snap_back(frame.offset, self.model.max_extent()),
            TrajectoryKind::SnapBack => None,
        };
        match bounce {
            Some(trajectory) => self.start_snap_back(trajectory, now, &mut events),
            None => {
                self.transition(GestureEvent::TrajectoryComplete);
            }
        }
        events
    }

    /// Re-read sizes from `provider`.
    ///
    /// Returns `false` without touching anything when the sizes are unchanged
    /// and `force` is not set. Otherwise the extents and scrollable axes are
    /// recomputed, a playing trajectory is stopped and the offset is clamped
    /// into the new bounds.
    pub fn refresh_extents<P: SizeProvider + ?Sized>(&mut self, provider: &P, force: bool) -> bool {
        let layout = Layout::read(provider);
        if !force && self.layout == Some(layout) {
            tracing::trace!("Scroller: sizes unchanged, skipping refresh");
            return false;
        }

        self.layout = Some(layout);
        let extent = self.model.recompute_extents(layout.viewport, layout.content);
        self.scrollable = extent.scrollable();

        if self.player.is_playing() {
            // The surface still hears about the abort, callers only get `true`
            let mut events = ScrollEvents::new();
            self.abort_trajectory(self.clock, &mut events);
            self.transition(GestureEvent::Stop);
        }

        let offset = hard_clamp(self.model.current_offset(), extent);
        self.apply(offset);
        true
    }

    /// Jump to `offset`, clamped into the bounds.
    ///
    /// Ends any gesture and stops any trajectory first.
    pub fn scroll_to(&mut self, offset: Offset, now: f64) -> ScrollEvents {
        let mut events = self.halt(now, GestureEvent::Stop);
        if !offset.is_finite() {
            tracing::warn!(
                "Scroller: ignoring scroll to non-finite offset ({}, {})",
                offset.horizontal,
                offset.vertical
            );
            return events;
        }

        let target = hard_clamp(offset, self.model.max_extent());
        if target != self.model.current_offset() {
            self.apply(target);
            events.push(ScrollEvent::Scrolled { offset: target });
        }
        events
    }

    /// Scroll so the content point `(x, y)` sits in the middle of the viewport
    pub fn center_at(&mut self, x: f32, y: f32, now: f64) -> ScrollEvents {
        let viewport = self.layout.map_or(Size::ZERO, |layout| layout.viewport);
        self.scroll_to(
            Offset::new(x - viewport.width / 2.0, y - viewport.height / 2.0),
            now,
        )
    }

    /// Center the content in the viewport
    pub fn center(&mut self, now: f64) -> ScrollEvents {
        let content = self.layout.map_or(Size::ZERO, |layout| layout.content);
        self.center_at(content.width / 2.0, content.height / 2.0, now)
    }

    /// Stop any gesture or trajectory, freezing the offset where it is
    pub fn stop(&mut self, now: f64) -> ScrollEvents {
        self.halt(now, GestureEvent::Stop)
    }

    fn on_start(&mut self, sample: Sample) -> ScrollEvents {
        let mut events = ScrollEvents::new();
        self.abort_trajectory(sample.timestamp, &mut events);
        self.transition(GestureEvent::PointerDown);

        let offset = self.model.current_offset();
        let extent = self.model.max_extent();
        let boundary = self.boundary;
        self.drag_origin =
            AxisPair::from_fn(|axis| boundary.drag_origin(offset[axis], extent.get(axis)));
        self.tracker.on_sample_start(sample, self.scrollable);

        events.push(ScrollEvent::TrackingStarted { offset });
        events
    }

    fn on_move(&mut self, sample: Sample) -> ScrollEvents {
        let mut events = ScrollEvents::new();
        match self.tracker.on_sample(sample) {
            SampleOutcome::Ignored | SampleOutcome::Tracking => {}
            SampleOutcome::ScrollStarted(axes) => {
                self.transition(GestureEvent::ThresholdExceeded);
                events.push(ScrollEvent::ScrollStarted { axes });
                self.drag(&mut events);
            }
            SampleOutcome::Scrolling => self.drag(&mut events),
        }
        events
    }

    /// Follow the pointer on the locked axes
    fn drag(&mut self, events: &mut ScrollEvents) {
        let displacement = self.tracker.displacement();
        let locked = self.tracker.locked_axes();
        let extent = self.model.max_extent();
        let current = self.model.current_offset();

        // Content moves with the finger, so the offset moves against it
        let offset = AxisPair::from_fn(|axis| {
            if locked[axis] {
                self.boundary.clamp(
                    self.drag_origin[axis] - displacement[axis],
                    extent.get(axis),
                    true,
                )
            } else {
                current[axis]
            }
        });

        if offset != current {
            self.apply(offset);
            events.push(ScrollEvent::Scrolled { offset });
        }
    }

    fn on_end(&mut self, sample: Sample) -> ScrollEvents {
        let mut events = ScrollEvents::new();
        let Some(end) = self.tracker.on_sample_end(sample) else {
            return events;
        };

        let now = sample.timestamp;
        let offset = self.model.current_offset();
        let extent = self.model.max_extent();

        if end == GestureEnd::Tap {
            events.push(ScrollEvent::Tap);
        }

        // Overscrolled content returns before any momentum is considered
        if let Some(trajectory) = self.boundary.snap_back(offset, extent) {
            self.start_snap_back(trajectory, now, &mut events);
            return events;
        }

        match end {
            GestureEnd::Tap => {
                self.transition(GestureEvent::Release);
            }
            GestureEnd::DragEnd => {
                self.transition(GestureEvent::Release);
                events.push(ScrollEvent::DragEnded { offset });
            }
            GestureEnd::Flick { velocity } => match self.planner.plan(velocity, offset, extent) {
                Some(trajectory) => {
                    self.transition(GestureEvent::Flick);
                    events.push(ScrollEvent::FlickStarted {
                        velocity,
                        target: trajectory.target(offset),
                        duration_ms: trajectory.duration_ms(),
                    });
                    self.play(trajectory, now, &mut events);
                }
                None => {
                    self.transition(GestureEvent::Release);
                    events.push(ScrollEvent::DragEnded { offset });
                }
            },
        }
        events
    }

    /// Cancel the gesture and any trajectory, then settle inside the bounds
    fn halt(&mut self, now: f64, event: GestureEvent) -> ScrollEvents {
        self.advance_clock(now);
        let mut events = ScrollEvents::new();
        self.tracker.cancel();
        self.abort_trajectory(now, &mut events);

        if self.transition(event) {
            let offset = hard_clamp(self.model.current_offset(), self.model.max_extent());
            if offset != self.model.current_offset() {
                self.apply(offset);
                events.push(ScrollEvent::Scrolled { offset });
            }
            events.push(ScrollEvent::Cancelled { offset });
        }
        events
    }

    fn start_snap_back(&mut self, trajectory: Trajectory, now: f64, events: &mut ScrollEvents) {
        self.transition(GestureEvent::SnapBack);
        events.push(ScrollEvent::SnapBackStarted {
            target: trajectory.target(self.model.current_offset()),
            duration_ms: trajectory.duration_ms(),
        });
        self.play(trajectory, now, events);
    }

    fn play(&mut self, trajectory: Trajectory, now: f64, events: &mut ScrollEvents) {
        let origin = self.model.current_offset();
        if let Some(completion) = self.player.play(trajectory, origin, now) {
            self.surface.trajectory_finished(&completion);
            events.push(ScrollEvent::TrajectoryAborted { completion });
        }
        self.surface.play_trajectory(&trajectory);
    }

    /// Abort the playing trajectory, freezing the offset at its position at `now`
    fn abort_trajectory(&mut self, now: f64, events: &mut ScrollEvents) {
        if let Some(completion) = self.player.abort(now) {
            self.apply(completion.offset);
            self.surface.trajectory_finished(&completion);
            events.push(ScrollEvent::TrajectoryAborted { completion });
        }
    }

    fn transition(&mut self, event: GestureEvent) -> bool {
        match self.state.on_event(event) {
            Some(next) => {
                if next != self.state {
                    tracing::debug!("Scroller: {:?} -> {:?} on {:?}", self.state, next, event);
                }
                self.state = next;
                true
            }
            None => {
                tracing::trace!("Scroller: {:?} ignored in {:?}", event, self.state);
                false
            }
        }
    }

    fn apply(&mut self, offset: Offset) {
        self.model.set_offset(offset);
        self.surface.apply_offset(offset);
        self.update_scrollbars();
    }

    fn update_scrollbars(&mut self) {
        if !self.options.scrollbars {
            return;
        }
        let Some(layout) = self.layout else {
            return;
        };

        self.scrollbars = ScrollbarMetrics::for_axes(
            self.model.current_offset(),
            self.model.max_extent(),
            layout.viewport,
            layout.track,
            self.config.scroll_handle_min_size,
            layout.end_cap,
        );
        self.surface.apply_scrollbars(&self.scrollbars);
    }

    fn advance_clock(&mut self, now: f64) {
        if now > self.clock {
            self.clock = now;
        }
    }
}

fn hard_clamp(offset: Offset, extent: Extent) -> Offset {
    offset.zip_with(extent.pair(), |value, extent| value.min(extent).max(0.0))
}
