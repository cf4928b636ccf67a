//! Axis-aligned bounding boxes and the center-to-center orientation helper
//!
//! Every entity positions itself with a `Rect`: a center point plus a
//! width/height pair. Overlap is the strict AABB test, so rects that merely
//! share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle addressed by its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Square rect, the shape most entities use.
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::new(center, Vec2::splat(side))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Left edge x. Screen coordinates: y grows downward.
    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Move the rect by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Strict AABB overlap: true only when the interiors intersect.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Unit direction vector from `origin`'s center to `target`'s center.
///
/// When the two centers exactly coincide there is no direction to report;
/// the zero vector is returned and callers hold position for that tick.
pub fn orientation_from(origin: &Rect, target: &Rect) -> Vec2 {
    let diff = target.center - origin.center;
    let norm = diff.length();
    if norm == 0.0 { Vec2::ZERO } else { diff / norm }
}
