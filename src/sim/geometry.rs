//! Axis-aligned rectangle geometry
//!
//! Platforms are plain rectangles in screen space (Y grows downward), so the
//! only circle test needed is closest-point-by-clamping.

use glam::Vec2;

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Closest point on (or in) the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }

    /// Whether `x` lies within the horizontal extent, edges included
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        self.min.x <= x && x <= self.max().x
    }
}

/// Circle vs rectangle overlap (touching does not count)
#[inline]
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) < radius * radius
}
