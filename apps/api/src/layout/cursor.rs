//! Page cursor: the single mutable write position threaded through one composition.
//!
//! Page breaks happen at three kinds of check point, never continuously:
//! - `write` checks before placing a block,
//! - `settle` checks after a unit of content has been written,
//! - `reserve` lets the caller protect a header from being orphaned.
//!
//! A block taller than a whole page still breaks first, then runs past the
//! bottom margin of the page it lands on.

use serde::Serialize;

use crate::layout::font_metrics::PageGeometry;

/// Where a write landed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Allocation {
    pub page_index: usize,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct PageCursor {
    page_index: usize,
    y: f32,
    page_height: f32,
    margin: f32,
}

impl PageCursor {
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            page_index: 0,
            y: geometry.margin,
            page_height: geometry.height,
            margin: geometry.margin,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Lowest y a write may end at without triggering a break.
    pub fn limit(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Places a block of `height` at the current position and moves past it.
    ///
    /// Opens a new page first when the block would end below the limit.
    pub fn write(&mut self, height: f32) -> Allocation {
        if self.y + height > self.limit() {
            self.new_page();
        }
        let allocation = Allocation {
            page_index: self.page_index,
            y: self.y,
        };
        self.y += height;
        allocation
    }

    /// Adds spacing between units. Never breaks.
    pub fn gap(&mut self, units: f32) {
        self.y += units;
    }

    /// Whether at least `lookahead` units remain before the bottom of the page.
    pub fn reserve(&self, lookahead: f32) -> bool {
        self.page_height - self.y >= lookahead
    }

    /// Post-unit check. Returns true when a page was opened.
    pub fn settle(&mut self) -> bool {
        if self.y > self.limit() {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Forces a page break.
    pub fn new_page(&mut self) {
        self.page_index += 1;
        self.y = self.margin;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
