#![forbid(unsafe_code)]

//! Canonical touch event types.
//!
//! The recovery console input layer reports a single pointer. Each report
//! carries the gesture phase and the framebuffer position of the contact.
//!
//! # Design Notes
//!
//! - Coordinates are framebuffer pixels, 0-indexed from the top-left
//! - `Hold` and `Repeat` are synthesized by the input layer while a
//!   contact stays down; widgets are free to ignore them
//! - A `Release` carries the last known position of the contact

/// The phase of a touch report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEventKind {
    /// Contact went down.
    Start,

    /// Contact moved while down.
    Drag,

    /// Contact lifted.
    Release,

    /// Contact held in place past the long-press delay.
    Hold,

    /// Key-repeat style report while held.
    Repeat,
}

impl TouchEventKind {
    /// Whether this phase ends a gesture.
    #[must_use]
    pub const fn ends_gesture(self) -> bool {
        matches!(self, Self::Release)
    }
}

/// A single touch report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchEvent {
    /// The gesture phase.
    pub kind: TouchEventKind,

    /// X coordinate in pixels.
    pub x: i32,

    /// Y coordinate in pixels.
    pub y: i32,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub const fn new(kind: TouchEventKind, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }

    /// Contact went down at `(x, y)`.
    #[must_use]
    pub const fn start(x: i32, y: i32) -> Self {
        Self::new(TouchEventKind::Start, x, y)
    }

    /// Contact moved to `(x, y)`.
    #[must_use]
    pub const fn drag(x: i32, y: i32) -> Self {
        Self::new(TouchEventKind::Drag, x, y)
    }

    /// Contact lifted at `(x, y)`.
    #[must_use]
    pub const fn release(x: i32, y: i32) -> Self {
        Self::new(TouchEventKind::Release, x, y)
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}
