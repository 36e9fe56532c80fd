#![forbid(unsafe_code)]

//! Pixel-precise pagination over a fixed-row-height list.
//!
//! The scroll position is a pair: the first visible row and a sub-row pixel
//! offset. A negative offset means the first row is partially scrolled off
//! the top. Every mutation goes through [`Viewport::scroll_by`], which
//! normalizes the pair and clamps it to the list ends.
//!
//! # Invariants
//!
//! 1. `first_visible <= last_page(total).0`
//! 2. `-row_height < pixel_offset <= 0` after normalization
//! 3. `total <= visible_rows()` implies `first_visible == 0 && pixel_offset == 0`

use std::ops::Range;

/// Which list end a scroll ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEdge {
    /// Clamped at the first row.
    Top,
    /// Clamped at the last page.
    Bottom,
}

/// Scroll position and geometry of the list area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    first_visible: usize,
    pixel_offset: i32,
    row_height: i32,
    height: i32,
}

impl Viewport {
    /// Create a viewport at the top of the list.
    ///
    /// `row_height` is clamped to at least one pixel.
    #[must_use]
    pub fn new(row_height: i32, height: i32) -> Self {
        Self {
            first_visible: 0,
            pixel_offset: 0,
            row_height: row_height.max(1),
            height: height.max(0),
        }
    }

    /// Index of the first (possibly partial) visible row.
    #[must_use]
    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Pixel offset of the first row relative to the top of the area.
    #[must_use]
    pub fn pixel_offset(&self) -> i32 {
        self.pixel_offset
    }

    /// Fixed row height in pixels.
    #[must_use]
    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    /// Height of the list area in pixels.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of whole rows that fit.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        (self.height / self.row_height) as usize
    }

    /// Offset of the first row when the last row sits flush with the bottom.
    ///
    /// Zero when the height is a whole number of rows, otherwise negative:
    /// the partial row shows up at the top instead.
    #[must_use]
    pub fn bottom_offset(&self) -> i32 {
        let remainder = self.height % self.row_height;
        if remainder == 0 {
            0
        } else {
            remainder - self.row_height
        }
    }

    /// Whether `total` rows overflow the area.
    #[must_use]
    pub fn can_scroll(&self, total: usize) -> bool {
        total > self.visible_rows()
    }

    /// The resting position at the end of the list.
    #[must_use]
    pub fn last_page(&self, total: usize) -> (usize, i32) {
        if !self.can_scroll(total) {
            return (0, 0);
        }
        let bottom = self.bottom_offset();
        let partial = usize::from(bottom != 0);
        (total - self.visible_rows() - partial, bottom)
    }

    /// Return to the top of the list.
    pub fn reset(&mut self) {
        self.first_visible = 0;
        self.pixel_offset = 0;
    }

    /// Change the area height, keeping the position where possible.
    pub fn set_height(&mut self, height: i32, total: usize) {
        self.height = height.max(0);
        self.scroll_by(0, total);
    }

    /// Move the content by `delta` pixels (positive moves it down, toward
    /// the top of the list) and clamp.
    ///
    /// Returns the edge the scroll was clamped at, if any.
    pub fn scroll_by(&mut self, delta: i32, total: usize) -> Option<ScrollEdge> {
        if !self.can_scroll(total) {
            self.reset();
            return None;
        }

        let rh = self.row_height;
        self.pixel_offset = self.pixel_offset.saturating_add(delta);

        while self.first_visible > 0 && self.pixel_offset > 0 {
            self.first_visible -= 1;
            self.pixel_offset -= rh;
        }
        if self.first_visible == 0 && self.pixel_offset > 0 {
            self.pixel_offset = 0;
            return Some(ScrollEdge::Top);
        }

        let (last_first, last_offset) = self.last_page(total);
        while self.first_visible < last_first && self.pixel_offset <= -rh {
            self.first_visible += 1;
            self.pixel_offset += rh;
        }
        if self.first_visible > last_first
            || (self.first_visible == last_first && self.pixel_offset <= last_offset)
        {
            self.first_visible = last_first;
            self.pixel_offset = last_offset;
            return Some(ScrollEdge::Bottom);
        }
        None
    }

    /// Rows intersecting the area, as logical indices.
    #[must_use]
    pub fn render_range(&self, total: usize) -> Range<usize> {
        if !self.can_scroll(total) {
            return 0..total;
        }
        let covered = self.height - self.pixel_offset;
        let rows = (covered + self.row_height - 1) / self.row_height;
        let end = (self.first_visible + rows.max(0) as usize).min(total);
        self.first_visible..end
    }

    /// Top of logical row `index`, relative to the top of the area.
    #[must_use]
    pub fn row_top(&self, index: usize) -> i32 {
        let rows = index as i64 - self.first_visible as i64;
        (i64::from(self.pixel_offset) + rows * i64::from(self.row_height))
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Resolve a y offset within the area to a logical row.
    ///
    /// Walks forward from the first visible row until the offset is
    /// consumed. Returns `None` past the last row.
    #[must_use]
    pub fn row_at(&self, y: i32, total: usize) -> Option<usize> {
        if y < 0 || y >= self.height {
            return None;
        }
        let mut top = self.pixel_offset;
        let mut index = self.first_visible;
        while top + self.row_height <= y {
            top += self.row_height;
            index += 1;
        }
        (index < total).then_some(index)
    }
}
