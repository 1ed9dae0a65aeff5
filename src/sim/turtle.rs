//! Turtle dive cycle
//!
//! A single phase counter shared by every turtle. Turtles rest at their
//! float height for most of the cycle, then dip below the surface and come
//! back up once per cycle.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::frame_units;

/// Shared float phase in frame units, wraps at [`FLOAT_CYCLE_LEN`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatCycle(f32);

impl FloatCycle {
    pub fn new(start: f32) -> Self {
        Self(start.rem_euclid(FLOAT_CYCLE_LEN))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Advance by `rate` cycle units per ms
    pub fn advance(&mut self, dt_ms: f32, rate: f32) {
        self.0 = (self.0 + rate * dt_ms).rem_euclid(FLOAT_CYCLE_LEN);
    }

    /// Whether turtles are holding still this frame
    pub fn is_resting(&self) -> bool {
        self.0 > FLOAT_REST.0 && self.0 < FLOAT_REST.1
    }

    /// Vertical velocity per frame unit at the current phase
    pub fn bob_rate(&self) -> f32 {
        if self.is_resting() {
            0.0
        } else {
            BOB_AMPLITUDE * (4.0 * std::f32::consts::PI * self.0 / FLOAT_CYCLE_LEN).cos()
        }
    }

    /// Vertical offset to apply for a frame of `dt_ms`
    pub fn bob_offset(&self, dt_ms: f32) -> f32 {
        self.bob_rate() * frame_units(dt_ms)
    }
}

/// Turtles are safe to stand on only while surfaced
#[inline]
pub fn is_above_water(y: f32) -> bool {
    y > SURFACE_Y
}
