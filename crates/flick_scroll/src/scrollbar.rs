//! Scrollbar metrics
//!
//! Indicator size and position derived from the offset/extent ratio. Nothing
//! here is stored between frames: the scroller recomputes the metrics after
//! every offset change and hands them to the render surface.
//!
//! Indicators may be drawn in three parts (two end caps and a stretched
//! middle). `end_cap` is the size of one cap and `middle_scale` the length
//! left for the middle segment.

use flick_core::{AxisPair, Extent, Offset, Size};
use serde::Serialize;

use crate::boundary::overshoot;

/// Indicator geometry for one axis, in pixels along the track
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollbarMetrics {
    /// False when the axis cannot scroll
    pub visible: bool,
    pub track_length: f32,
    pub indicator_length: f32,
    /// Distance of the indicator from the start of the track
    pub indicator_offset: f32,
    pub end_cap: f32,
    /// Length of the middle segment between the end caps
    pub middle_scale: f32,
}

impl ScrollbarMetrics {
    /// Metrics for a plain (uncapped) indicator
    pub fn recompute(offset: f32, extent: f32, viewport_px: f32, track_px: f32, min_indicator: f32) -> Self {
        Self::recompute_capped(offset, extent, viewport_px, track_px, min_indicator, 0.0)
    }

    /// Metrics for an indicator drawn with `end_cap` pixel caps on both ends
    pub fn recompute_capped(
        offset: f32,
        extent: f32,
        viewport_px: f32,
        track_px: f32,
        min_indicator: f32,
        end_cap: f32,
    ) -> Self {
        let track_length = track_px.max(0.0);
        let end_cap = end_cap.max(0.0);
        if !(extent > 0.0 && viewport_px > 0.0 && track_length > 0.0) {
            return Self {
                visible: false,
                track_length,
                end_cap,
                ..Default::default()
            };
        }

        let content = viewport_px + extent;
        // The track always wins over the minimum size
        let min_length = min_indicator.max(2.0 * end_cap).min(track_length);
        let fit = |length: f32| length.max(min_length).min(track_length);

        let mut indicator_length = fit((track_length * viewport_px / content).round());

        // Past an edge the indicator shrinks and sticks to that end
        let overshoot = overshoot(offset, extent);
        if overshoot != 0.0 {
            indicator_length = fit((indicator_length - overshoot.abs()).round());
        }

        let travel = track_length - indicator_length;
        let indicator_offset = if overshoot < 0.0 {
            0.0
        } else if overshoot > 0.0 {
            travel
        } else {
            (offset / extent * travel).round().min(travel).max(0.0)
        };

        Self {
            visible: true,
            track_length,
            indicator_length,
            indicator_offset,
            end_cap,
            middle_scale: (indicator_length - 2.0 * end_cap).max(0.0),
        }
    }

    /// Room the indicator has to move in
    pub fn travel(&self) -> f32 {
        self.track_length - self.indicator_length
    }

    /// Metrics for both axes
    pub fn for_axes(
        offset: Offset,
        extent: Extent,
        viewport: Size,
        track: Size,
        min_indicator: f32,
        end_cap: f32,
    ) -> AxisPair<Self> {
        AxisPair::from_fn(|axis| {
            Self::recompute_capped(
                offset[axis],
                extent.get(axis),
                viewport.along(axis),
                track.along(axis),
                min_indicator,
                end_cap,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportional_indicator() {
        // 300px viewport over 900px content
        let top = ScrollbarMetrics::recompute(0.0, 600.0, 300.0, 300.0, 25.0);
        assert!(top.visible);
        assert_eq!(top.indicator_length, 100.0);
        assert_eq!(top.indicator_offset, 0.0);

        let middle = ScrollbarMetrics::recompute(300.0, 600.0, 300.0, 300.0, 25.0);
        assert_eq!(middle.indicator_offset, 100.0);

        let bottom = ScrollbarMetrics::recompute(600.0, 600.0, 300.0, 300.0, 25.0);
        assert_eq!(bottom.indicator_offset, 200.0);
        assert_eq!(bottom.travel(), 200.0);
    }

    #[test]
    fn test_indicator_stays_in_track() {
        for (extent, viewport, track, min) in [
            (600.0, 300.0, 300.0, 25.0),
            (50_000.0, 300.0, 280.0, 25.0),
            (10.0, 500.0, 480.0, 25.0),
            (400.0, 100.0, 20.0, 25.0),
        ] {
            for step in 0..=20 {
                let offset = extent * step as f32 / 20.0;
                let metrics = ScrollbarMetrics::recompute(offset, extent, viewport, track, min);
                assert!(metrics.indicator_length <= metrics.track_length);
                assert!(metrics.indicator_offset >= 0.0);
                assert!(
                    metrics.indicator_offset + metrics.indicator_length <= metrics.track_length,
                    "extent={extent} offset={offset} -> {metrics:?}"
                );
            }
        }
    }

    #[test]
    fn test_minimum_length() {
        let metrics = ScrollbarMetrics::recompute(0.0, 100_000.0, 300.0, 300.0, 25.0);
        assert_eq!(metrics.indicator_length, 25.0);

        // Minimum larger than the track
        let metrics = ScrollbarMetrics::recompute(0.0, 400.0, 100.0, 20.0, 25.0);
        assert_eq!(metrics.indicator_length, 20.0);
        assert_eq!(metrics.indicator_offset, 0.0);
    }

    #[test]
    fn test_hidden_without_extent() {
        let metrics = ScrollbarMetrics::recompute(0.0, 0.0, 300.0, 300.0, 25.0);
        assert!(!metrics.visible);
        assert_eq!(metrics.indicator_length, 0.0);
        assert_eq!(metrics.indicator_offset, 0.0);
    }

    #[test]
    fn test_overscroll_squeezes_indicator() {
        let before = ScrollbarMetrics::recompute(-30.0, 600.0, 300.0, 300.0, 25.0);
        assert_eq!(before.indicator_length, 70.0);
        assert_eq!(before.indicator_offset, 0.0);

        let after = ScrollbarMetrics::recompute(630.0, 600.0, 300.0, 300.0, 25.0);
        assert_eq!(after.indicator_length, 70.0);
        assert_eq!(after.indicator_offset, 230.0);

        // Never below the minimum
        let deep = ScrollbarMetrics::recompute(-500.0, 600.0, 300.0, 300.0, 25.0);
        assert_eq!(deep.indicator_length, 25.0);
    }

    #[test]
    fn test_end_caps() {
        let metrics = ScrollbarMetrics::recompute_capped(0.0, 600.0, 300.0, 300.0, 10.0, 8.0);
        assert_eq!(metrics.end_cap, 8.0);
        assert_eq!(metrics.middle_scale, 84.0);

        // Caps raise the minimum length
        let metrics =
            ScrollbarMetrics::recompute_capped(-500.0, 600.0, 300.0, 300.0, 10.0, 8.0);
        assert_eq!(metrics.indicator_length, 16.0);
        assert_eq!(metrics.middle_scale, 0.0);
    }

    #[test]
    fn test_for_axes() {
        let metrics = ScrollbarMetrics::for_axes(
            Offset::new(0.0, 300.0),
            Extent::new(0.0, 600.0),
            Size::new(300.0, 300.0),
            Size::new(300.0, 300.0),
            25.0,
            0.0,
        );
        assert!(!metrics.horizontal.visible);
        assert!(metrics.vertical.visible);
        assert_eq!(metrics.vertical.indicator_offset, 100.0);
    }
}
