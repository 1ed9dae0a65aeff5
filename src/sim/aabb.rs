//! Horizontal-plane bounding boxes
//!
//! Footprints live in the x/z plane only; height never takes part in
//! collision.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned footprint in the x/z plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x_min: f32,
    pub x_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Aabb {
    /// Footprint around a world-space center with per-axis half-extents (x, z)
    pub fn around(center: Vec3, half: Vec2) -> Self {
        Self {
            x_min: center.x - half.x,
            x_max: center.x + half.x,
            z_min: center.z - half.y,
            z_max: center.z + half.y,
        }
    }

    /// Strict interval overlap on both axes; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let left = self.x_min < other.x_max;
        let right = self.x_max > other.x_min;
        let top = self.z_max > other.z_min;
        let bottom = self.z_min < other.z_max;
        left && right && top && bottom
    }
}
