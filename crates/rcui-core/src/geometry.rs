#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for widget placement and hit testing.
///
/// Uses framebuffer pixel coordinates (0-indexed, origin at top-left).
/// Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle. Negative sizes are clamped to zero.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if a y coordinate falls within the vertical extent.
    #[inline]
    pub const fn contains_y(&self, y: i32) -> bool {
        y >= self.y && y < self.bottom()
    }

    /// Split off a band of `height` pixels from the top.
    ///
    /// Returns `(top, rest)`. The band is clamped to the rectangle, so
    /// `rest` may be empty.
    pub fn split_top(&self, height: i32) -> (Rect, Rect) {
        let band = height.max(0).min(self.height.max(0));
        let top = Rect::new(self.x, self.y, self.width, band);
        let rest = Rect::new(self.x, self.y + band, self.width, self.height - band);
        (top, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_sizes_clamp_to_zero() {
        let r = Rect::new(5, 5, -3, -1);
        assert_eq!(r.width, 0);
        assert_eq!(r.height, 0);
        assert!(r.is_empty());
    }

    #[test]
    fn edges_are_exclusive() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert!(r.contains(10, 20));
        assert!(!r.contains(110, 20));
        assert!(!r.contains(10, 70));
        assert!(r.contains_y(69));
        assert!(!r.contains_y(19));
    }

    #[test]
    fn split_top_partitions_height() {
        let r = Rect::new(0, 100, 480, 400);
        let (header, body) = r.split_top(48);
        assert_eq!(header, Rect::new(0, 100, 480, 48));
        assert_eq!(body, Rect::new(0, 148, 480, 352));
    }

    #[test]
    fn split_top_larger_than_rect() {
        let r = Rect::new(0, 0, 10, 30);
        let (header, body) = r.split_top(50);
        assert_eq!(header.height, 30);
        assert!(body.is_empty());
        assert_eq!(body.y, 30);
    }
}
