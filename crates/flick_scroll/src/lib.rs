//! Flick Scroll
//!
//! Touch-style momentum scrolling: drag thresholds, flick momentum under a
//! friction model, elastic edges with snap-back, and scrollbar metrics.
//!
//! # Example
//!
//! ```rust
//! use flick_core::Size;
//! use flick_scroll::{
//!     PointerInput, RecordingSurface, Sample, ScrollConfig, Scroller, ScrollerOptions,
//!     StaticSizes,
//! };
//!
//! let mut scroller = Scroller::new(
//!     ScrollConfig::default(),
//!     ScrollerOptions::elastic(),
//!     RecordingSurface::new(),
//! )
//! .unwrap();
//! scroller.refresh_extents(
//!     &StaticSizes::new(Size::new(300.0, 300.0), Size::new(300.0, 900.0)),
//!     false,
//! );
//!
//! scroller.handle(PointerInput::Start(Sample::new(0.0, 200.0, 0.0)));
//! scroller.handle(PointerInput::Move(Sample::new(0.0, 180.0, 16.0)));
//! scroller.handle(PointerInput::Move(Sample::new(0.0, 150.0, 32.0)));
//! scroller.handle(PointerInput::End(Sample::new(0.0, 150.0, 40.0)));
//!
//! // One call per animation frame until the flick settles
//! let mut now = 40.0;
//! while scroller.is_animating() {
//!     now += 16.0;
//!     scroller.tick(now);
//! }
//! assert!(scroller.current_offset().vertical > 50.0);
//! assert_eq!(scroller.current_offset().horizontal, 0.0);
//! ```

pub mod boundary;
pub mod config;
pub mod error;
pub mod flick;
pub mod gesture;
pub mod input;
pub mod offset;
pub mod scrollbar;
pub mod scroller;
pub mod state;
pub mod surface;

pub use boundary::BoundaryPolicy;
pub use config::{ElasticityConfig, FlickingConfig, ScrollConfig, ScrollerOptions, SnapBackConfig};
pub use error::{ConfigError, Result};
pub use flick::FlickPlanner;
pub use gesture::{GestureEnd, GestureTracker, Sample, SampleOutcome};
pub use input::{PointerInput, ScrollEvent, ScrollEvents};
pub use offset::OffsetModel;
pub use scrollbar::ScrollbarMetrics;
pub use scroller::Scroller;
pub use state::{GestureEvent, GestureState};
pub use surface::{RecordingSurface, RenderSurface, SizeProvider, StaticSizes, SurfaceCall};
