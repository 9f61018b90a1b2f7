//! Axis-aligned box collision
//!
//! Every entity is a rectangle; collision is open-interval overlap, so boxes
//! that only share an edge never collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Grow horizontally by `dx` on both sides
    pub fn widened(&self, dx: f32) -> Self {
        Self {
            min: Vec2::new(self.min.x - dx, self.min.y),
            size: Vec2::new(self.size.x + 2.0 * dx, self.size.y),
        }
    }

    /// Whether the box has fully left the `[0, width]` strip
    pub fn fully_outside_x(&self, width: f32) -> bool {
        self.min.x >= width || self.max().x <= 0.0
    }
}

/// Open-interval overlap test
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.min.x < b.min.x + b.size.x
        && a.min.x + a.size.x > b.min.x
        && a.min.y < b.min.y + b.size.y
        && a.min.y + a.size.y > b.min.y
}
