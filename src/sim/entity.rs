//! Capability shared by everything that moves on the playfield

use glam::Vec3;

use super::aabb::Aabb;
use super::turtle::FloatCycle;

/// Per-frame inputs every entity update may read
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Elapsed simulated time in ms (already sanitized)
    pub dt_ms: f32,
    /// Shared turtle phase for this frame
    pub float_cycle: FloatCycle,
}

/// A world-space entity with a footprint and a per-frame update
pub trait PositionedEntity {
    /// Current world-space center
    fn center(&self) -> Vec3;

    /// Footprint derived from the center, not stored
    fn bounds(&self) -> Aabb;

    /// Advance this entity by one frame
    fn update_position(&mut self, frame: &Frame);
}
