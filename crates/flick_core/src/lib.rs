//! Flick Core
//!
//! Shared value types for the Flick scrolling crates:
//!
//! - **Axes**: [`Axis`] and the per-axis container [`AxisPair`]
//! - **Geometry**: [`Offset`], [`Velocity`], [`Size`] and the non-negative [`Extent`]
//!
//! Offsets are a plain pair of reals. Only translation is ever applied to the
//! content, so no transform matrices are involved.

pub mod axis;
pub mod geometry;

pub use axis::{Axis, AxisPair};
pub use geometry::{Extent, Offset, Size, Velocity};
