#![forbid(unsafe_code)]

//! Momentum scrolling.
//!
//! A fling sets a signed velocity in pixels per tick. Each [`Momentum::tick`]
//! moves the viewport by that velocity (capped at two and a half rows),
//! then shrinks its magnitude by a fixed step. The curve is linear
//! deceleration, so a fling of velocity `v` settles in at most
//! `v / SPEED_DECREMENT + 1` ticks.

use crate::viewport::Viewport;

/// Velocity lost per tick, in pixels.
pub const SPEED_DECREMENT: i32 = 6;

/// Velocities below this magnitude stop the fling.
pub const SPEED_FLOOR: i32 = 10;

/// Release velocity multiplier applied when a fling starts.
pub const FLING_MULTIPLIER: i32 = 6;

/// Momentum state for a viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Momentum {
    velocity: i32,
}

impl Momentum {
    /// A resting momentum.
    #[must_use]
    pub const fn new() -> Self {
        Self { velocity: 0 }
    }

    /// Current velocity in pixels per tick.
    #[must_use]
    pub const fn velocity(&self) -> i32 {
        self.velocity
    }

    /// Whether a fling is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.velocity != 0
    }

    /// Start a fling. Velocity is kept within `±i32::MAX`.
    pub fn fling(&mut self, velocity: i32) {
        self.velocity = velocity.max(-i32::MAX);
    }

    /// Stop immediately.
    pub fn cancel(&mut self) {
        self.velocity = 0;
    }

    /// Largest displacement applied in one tick for `row_height`.
    #[must_use]
    pub const fn max_step(row_height: i32) -> i32 {
        row_height * 5 / 2
    }

    /// Advance one tick. Returns `true` if the viewport was touched.
    pub fn tick(&mut self, viewport: &mut Viewport, total: usize) -> bool {
        if self.velocity == 0 {
            return false;
        }
        if !viewport.can_scroll(total) {
            self.velocity = 0;
            return false;
        }

        let cap = Self::max_step(viewport.row_height());
        let step = self.velocity.clamp(-cap, cap);
        let edge = viewport.scroll_by(step, total);

        let slowed = self.velocity.saturating_abs() - SPEED_DECREMENT;
        self.velocity = self.velocity.signum() * slowed.max(0);

        if edge.is_some() || self.velocity.abs() < SPEED_FLOOR {
            self.velocity = 0;
        }
        true
    }
}

/// Velocity for a release, given the last two recorded drag positions.
///
/// Slow releases produce no fling.
#[must_use]
pub fn release_velocity(previous: i32, previous_previous: i32) -> Option<i32> {
    let velocity = previous.saturating_sub(previous_previous);
    (velocity.unsigned_abs() > SPEED_FLOOR.unsigned_abs())
        .then(|| velocity.saturating_mul(FLING_MULTIPLIER))
}
