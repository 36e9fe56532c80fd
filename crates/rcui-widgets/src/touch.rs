#![forbid(unsafe_code)]

//! Touch gesture recognition for scrolling lists.
//!
//! [`TouchTracker`] turns the raw touch stream into list intents. It does
//! not own the viewport; the widget applies each [`TouchOutcome`].
//!
//! # State Machine
//!
//! ```text
//!            Start                 Drag (past debounce)
//!   Idle ───────────▶ Touching ─────────────────────────▶ Dragging
//!    ▲                   │                                   │
//!    └──── Release ──────┴──────────── Release ──────────────┘
//! ```
//!
//! A touch that never moves past the debounce threshold is a tap. A touch
//! that does is a scroll, and its release may become a fling.
//!
//! # Invariants
//!
//! 1. A tap is only reported if the gesture started on a content row and
//!    every drag stayed within the debounce threshold.
//! 2. Drags inside the threshold never report a scroll.
//! 3. A touch that lands during a fling can scroll but never tap.

use rcui_core::event::{TouchEvent, TouchEventKind};
use rcui_core::geometry::Rect;

use crate::kinetic::release_velocity;

/// Smallest debounce threshold in pixels.
pub const MIN_DEBOUNCE: i32 = 6;

/// Debounce threshold for a given row height: a third of a row, at least
/// [`MIN_DEBOUNCE`].
#[must_use]
pub const fn debounce_for_row_height(row_height: i32) -> i32 {
    let third = row_height / 3;
    if third > MIN_DEBOUNCE {
        third
    } else {
        MIN_DEBOUNCE
    }
}

/// Gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchPhase {
    /// No contact.
    #[default]
    Idle,
    /// Contact down, not yet moved past the debounce threshold.
    Touching,
    /// Contact is scrolling the list.
    Dragging,
}

/// What the widget should do in response to a touch report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// Nothing to do.
    Ignored,
    /// A gesture began; any fling in progress must stop.
    Began,
    /// Move the content by this many pixels.
    Scroll(i32),
    /// A tap at this y offset within the content area.
    Tap(i32),
    /// Start momentum with this velocity.
    Fling(i32),
    /// A scroll gesture ended without momentum.
    Settled,
}

/// Per-gesture bookkeeping, created on touch-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSession {
    /// Y of the last applied scroll (or of the touch-down).
    pub origin_y: i32,
    /// Most recent accepted drag position.
    pub previous_y: Option<i32>,
    /// The accepted drag position before `previous_y`.
    pub previous_previous_y: Option<i32>,
    /// Content-relative y of the row under the touch-down, while the
    /// gesture still counts as a tap.
    pub pending_tap: Option<i32>,
}

impl TouchSession {
    fn begin(y: i32, pending_tap: Option<i32>) -> Self {
        Self {
            origin_y: y,
            previous_y: Some(y),
            previous_previous_y: Some(y),
            pending_tap,
        }
    }

    fn record(&mut self, y: i32) {
        self.previous_previous_y = self.previous_y;
        self.previous_y = Some(y);
    }

    fn forget_history(&mut self) {
        self.previous_y = None;
        self.previous_previous_y = None;
    }

    fn release_velocity(&self) -> Option<i32> {
        match (self.previous_y, self.previous_previous_y) {
            (Some(prev), Some(prev2)) => release_velocity(prev, prev2),
            _ => None,
        }
    }
}

/// Touch state machine for one list widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchTracker {
    phase: TouchPhase,
    session: Option<TouchSession>,
    debounce: i32,
}

impl TouchTracker {
    /// Create a tracker with the given debounce threshold in pixels.
    #[must_use]
    pub fn new(debounce: i32) -> Self {
        Self {
            phase: TouchPhase::Idle,
            session: None,
            debounce: debounce.max(0),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TouchPhase {
        self.phase
    }

    /// The live session, if a contact is down.
    #[must_use]
    pub fn session(&self) -> Option<&TouchSession> {
        self.session.as_ref()
    }

    /// Debounce threshold in pixels.
    #[must_use]
    pub fn debounce(&self) -> i32 {
        self.debounce
    }

    /// Drop any gesture in progress.
    pub fn reset(&mut self) {
        self.phase = TouchPhase::Idle;
        self.session = None;
    }

    /// Feed one touch report.
    ///
    /// `content` is the row area (below the header). `flinging` tells the
    /// tracker whether momentum is running at touch-down.
    pub fn handle(&mut self, event: TouchEvent, content: Rect, flinging: bool) -> TouchOutcome {
        let outcome = match event.kind {
            TouchEventKind::Start => self.on_start(event.y, content, flinging),
            TouchEventKind::Drag => self.on_drag(event.y, content),
            TouchEventKind::Release => self.on_release(),
            TouchEventKind::Hold | TouchEventKind::Repeat => TouchOutcome::Ignored,
        };
        if event.kind.ends_gesture() {
            self.reset();
        }
        outcome
    }

    fn on_start(&mut self, y: i32, content: Rect, flinging: bool) -> TouchOutcome {
        let pending_tap = if flinging { None } else { hit_test(y, content) };
        self.session = Some(TouchSession::begin(y, pending_tap));
        self.phase = TouchPhase::Touching;
        TouchOutcome::Began
    }

    fn on_drag(&mut self, y: i32, content: Rect) -> TouchOutcome {
        let debounce = self.debounce;
        let Some(session) = self.session.as_mut() else {
            return TouchOutcome::Ignored;
        };

        if hit_test(y, content).is_none() {
            session.forget_history();
            session.pending_tap = None;
            self.phase = TouchPhase::Dragging;
            return TouchOutcome::Ignored;
        }

        if session.pending_tap.is_some() && (y - session.origin_y).abs() < debounce {
            return TouchOutcome::Ignored;
        }

        session.record(y);
        session.pending_tap = None;
        let delta = y - session.origin_y;
        session.origin_y = y;
        self.phase = TouchPhase::Dragging;
        TouchOutcome::Scroll(delta)
    }

    fn on_release(&mut self) -> TouchOutcome {
        let Some(session) = self.session else {
            return TouchOutcome::Ignored;
        };
        if let Some(tap) = session.pending_tap {
            return TouchOutcome::Tap(tap);
        }
        match session.release_velocity() {
            Some(velocity) => TouchOutcome::Fling(velocity),
            None => TouchOutcome::Settled,
        }
    }
}

/// Map a screen y to an offset within `content`.
///
/// The content area is half-open: its first pixel row is the first row
/// below the header band, its bottom edge is excluded. The x coordinate is
/// not considered.
#[must_use]
pub fn hit_test(y: i32, content: Rect) -> Option<i32> {
    content.contains_y(y).then(|| y - content.y)
}
