// File: crates/easel-core/src/animate.rs
// Summary: Mark transitions: linear-in-time interpolation with retargeting.
// Notes:
// - Time is injected everywhere as `now_ms`; this module never reads a clock,
//   so animation is driven the same way by a demo loop or a test literal.

use crate::geometry::MarkGeometry;

/// An in-flight interpolation from one mark geometry to another.
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    pub from: MarkGeometry,
    pub to: MarkGeometry,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl Transition {
    pub fn new(from: MarkGeometry, to: MarkGeometry, start_ms: f64, duration_ms: f64) -> Self {
        Self { from, to, start_ms, duration_ms }
    }

    /// Sampled geometry at `now_ms`. Progress clamps to [0, 1]; a zero
    /// duration snaps to the target.
    pub fn at(&self, now_ms: f64) -> MarkGeometry {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.from.lerp(&self.to, t)
    }

    /// Restart toward `to` from the geometry currently on screen. The mark
    /// converges to the most recent target; stale targets are discarded, so
    /// superseded transitions never stack or oscillate.
    pub fn retarget(&mut self, now_ms: f64, to: MarkGeometry, duration_ms: f64) {
        self.from = self.at(now_ms);
        self.to = to;
        self.start_ms = now_ms;
        self.duration_ms = duration_ms;
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.duration_ms <= 0.0 || now_ms >= self.start_ms + self.duration_ms
    }
}
