//! Frame-driven trajectory playback
//!
//! The [`TrajectoryPlayer`] owns at most one playing trajectory and turns it
//! into offsets on demand. It is clocked from outside: the caller passes the
//! current time (milliseconds, same clock as the pointer samples) to
//! [`TrajectoryPlayer::advance`] once per animation frame.
//!
//! Each started trajectory produces exactly one [`Completion`]: either from
//! `advance` once the last track has finished, or from `abort` / a new `play`
//! when it is preempted.

use flick_core::Offset;
use serde::Serialize;

use crate::trajectory::{Trajectory, TrajectoryKind};

/// End of a trajectory's playback
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Completion {
    /// Which kind of trajectory ended
    pub kind: TrajectoryKind,
    /// True when preempted before reaching the end
    pub aborted: bool,
    /// Last played offset (the target when not aborted)
    pub offset: Offset,
    /// Playback time at completion
    pub elapsed_ms: f32,
}

/// One rendered animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Offset to show this frame
    pub offset: Offset,
    /// Set on the frame that finishes the trajectory
    pub completion: Option<Completion>,
}

#[derive(Debug, Clone, Copy)]
struct Playback {
    trajectory: Trajectory,
    origin: Offset,
    started_at: f64,
}

impl Playback {
    fn elapsed(&self, now: f64) -> f32 {
        (now - self.started_at).max(0.0) as f32
    }
}

/// Plays one trajectory at a time
#[derive(Debug, Clone, Default)]
pub struct TrajectoryPlayer {
    playback: Option<Playback>,
}

impl TrajectoryPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `trajectory` from `origin` at time `now`.
    ///
    /// A trajectory still playing is aborted first and its completion returned.
    pub fn play(&mut self, trajectory: Trajectory, origin: Offset, now: f64) -> Option<Completion> {
        let preempted = self.abort(now);
        tracing::debug!(
            "TrajectoryPlayer: play {:?} for {:.0}ms, distance=({:.1}, {:.1})",
            trajectory.kind(),
            trajectory.duration_ms(),
            trajectory.distance().horizontal,
            trajectory.distance().vertical,
        );
        self.playback = Some(Playback {
            trajectory,
            origin,
            started_at: now,
        });
        preempted
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// The trajectory currently playing
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.playback.as_ref().map(|playback| &playback.trajectory)
    }

    /// Offset the playing trajectory has at `now`, without advancing
    pub fn sample(&self, now: f64) -> Option<Offset> {
        self.playback.as_ref().map(|playback| {
            playback
                .trajectory
                .sample(playback.origin, playback.elapsed(now))
        })
    }

    /// Produce the frame for `now`.
    ///
    /// Returns `None` when nothing is playing. The frame that reaches the end
    /// of the trajectory carries its completion and clears the player.
    pub fn advance(&mut self, now: f64) -> Option<Frame> {
        let playback = self.playback?;
        let elapsed = playback.elapsed(now);

        if playback.trajectory.is_finished(elapsed) {
            self.playback = None;
            let offset = playback.trajectory.target(playback.origin);
            tracing::debug!(
                "TrajectoryPlayer: {:?} completed after {:.0}ms",
                playback.trajectory.kind(),
                elapsed
            );
            return Some(Frame {
                offset,
                completion: Some(Completion {
                    kind: playback.trajectory.kind(),
                    aborted: false,
                    offset,
                    elapsed_ms: elapsed,
                }),
            });
        }

        Some(Frame {
            offset: playback.trajectory.sample(playback.origin, elapsed),
            completion: None,
        })
    }

    /// Stop playback at `now`, freezing the offset where it was
    pub fn abort(&mut self, now: f64) -> Option<Completion> {
        let playback = self.playback.take()?;
        let elapsed = playback.elapsed(now);
        let offset = playback.trajectory.sample(playback.origin, elapsed);
        tracing::debug!(
            "TrajectoryPlayer: {:?} aborted after {:.0}ms at ({:.1}, {:.1})",
            playback.trajectory.kind(),
            elapsed,
            offset.horizontal,
            offset.vertical
        );
        Some(Completion {
            kind: playback.trajectory.kind(),
            aborted: true,
            offset,
            elapsed_ms: elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::TimingFunction;
    use crate::trajectory::AxisTrack;
    use flick_core::AxisPair;

    fn linear_flick(from: f32, to: f32, duration_ms: f32) -> Trajectory {
        Trajectory::new(
            TrajectoryKind::Flick,
            AxisPair::new(
                None,
                Some(AxisTrack::new(from, to, duration_ms, TimingFunction::LINEAR)),
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_plays_to_completion_once() {
        let mut player = TrajectoryPlayer::new();
        assert!(player
            .play(linear_flick(0.0, 100.0, 100.0), Offset::ZERO, 1000.0)
            .is_none());

        let mid = player.advance(1050.0).unwrap();
        assert!(mid.completion.is_none());
        assert!((mid.offset.vertical - 50.0).abs() < 1e-3);

        let last = player.advance(1120.0).unwrap();
        let completion = last.completion.unwrap();
        assert!(!completion.aborted);
        assert_eq!(completion.offset, Offset::new(0.0, 100.0));

        // Completion is reported a single time
        assert!(player.advance(1200.0).is_none());
        assert!(player.abort(1200.0).is_none());
        assert!(!player.is_playing());
    }

    #[test]
    fn test_abort_freezes_offset() {
        let mut player = TrajectoryPlayer::new();
        player.play(linear_flick(0.0, 200.0, 400.0), Offset::ZERO, 0.0);

        let completion = player.abort(200.0).unwrap();
        assert!(completion.aborted);
        assert!((completion.offset.vertical - 100.0).abs() < 1e-3);
        assert!(!player.is_playing());
    }

    #[test]
    fn test_play_preempts_running_trajectory() {
        let mut player = TrajectoryPlayer::new();
        player.play(linear_flick(0.0, 200.0, 400.0), Offset::ZERO, 0.0);

        let preempted = player
            .play(linear_flick(10.0, 0.0, 100.0), Offset::ZERO, 100.0)
            .unwrap();
        assert!(preempted.aborted);
        assert!((preempted.offset.vertical - 50.0).abs() < 1e-3);
        assert!(player.is_playing());
    }
}
