// File: crates/easel-core/src/geometry.rs
// Summary: Lightweight geometry types for pixel math and mark interpolation.

use crate::color::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    pub fn right(&self) -> f64 { self.x + self.width }
    pub fn bottom(&self) -> f64 { self.y + self.height }
}

/// Full visual state of one mark. Bars use x/y/width/height, points use
/// x/y/radius; unused fields stay zero and interpolate as zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub color: Rgba,
}

impl MarkGeometry {
    /// Linear interpolation over every field; `t` is clamped to [0, 1].
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            x: lerp_f64(self.x, other.x, t),
            y: lerp_f64(self.y, other.y, t),
            width: lerp_f64(self.width, other.width, t),
            height: lerp_f64(self.height, other.height, t),
            radius: lerp_f64(self.radius, other.radius, t),
            color: self.color.lerp(other.color, t),
        }
    }

    pub fn rect(&self) -> RectF {
        RectF::new(self.x, self.y, self.width, self.height)
    }
}

#[inline]
fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
