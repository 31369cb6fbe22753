//! Flick Animation
//!
//! Timing curves and playback for scroll trajectories.
//!
//! # Features
//!
//! - **Timing Functions**: CSS-style cubic bezier easing with validated control points
//! - **Trajectories**: Immutable per-axis offset plans with independent durations
//! - **Playback**: Frame-clocked player that reports exactly one completion per trajectory

pub mod easing;
pub mod player;
pub mod trajectory;

pub use easing::{TimingError, TimingFunction};
pub use player::{Completion, Frame, TrajectoryPlayer};
pub use trajectory::{AxisTrack, Trajectory, TrajectoryKind};
