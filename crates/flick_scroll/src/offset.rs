//! Offset model
//!
//! Holds the scroll offset and the extents it is measured against. Writes are
//! not validated here; the scroller runs every offset through the
//! [`BoundaryPolicy`](crate::BoundaryPolicy) first.

use flick_core::{Extent, Offset, Size};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OffsetModel {
    offset: Offset,
    extent: Extent,
}

impl OffsetModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_offset(&self) -> Offset {
        self.offset
    }

    /// Current offset rounded to whole pixels
    pub fn current_offset_rounded(&self) -> Offset {
        self.offset.round()
    }

    pub fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
    }

    pub fn max_extent(&self) -> Extent {
        self.extent
    }

    /// Recompute the extents for new viewport/content sizes
    pub fn recompute_extents(&mut self, viewport: Size, content: Size) -> Extent {
        self.extent = Extent::from_sizes(viewport, content);
        tracing::debug!(
            "OffsetModel: extents ({:.0}, {:.0}) for viewport {:.0}x{:.0}, content {:.0}x{:.0}",
            self.extent.pair().horizontal,
            self.extent.pair().vertical,
            viewport.width,
            viewport.height,
            content.width,
            content.height
        );
        self.extent
    }
}
