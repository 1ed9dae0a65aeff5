//! Frogger 3D - lane-crossing simulation core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (lane motion, player spring, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `camera`: Follow camera easing and view/projection matrices
//! - `instances`: Per-entity transforms packed for the renderer
//! - `input`: Key codes to tick input

pub mod camera;
pub mod input;
pub mod instances;
pub mod sim;
pub mod tuning;

pub use camera::FollowCamera;
pub use input::KeyCommand;
pub use instances::{EntityInstance, collect_instances};
pub use tuning::{RowFilter, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Frames per simulated millisecond (1 frame unit ~= one 60 Hz frame)
    pub const FRAMES_PER_MS: f32 = 0.06;

    /// Player start cell
    pub const START_CELL: Vec3 = Vec3::new(6.5, 0.25, 0.5);
    /// Player half-extent on both horizontal axes
    pub const PLAYER_HALF_EXTENT: f32 = 0.25;

    /// Grid limits for target cells (cell centers sit on half-integers)
    pub const GRID_MIN: f32 = 0.5;
    pub const GRID_MAX: f32 = 12.5;
    /// Last row reachable by a plain forward hop
    pub const LAST_ROW_Z: f32 = 11.5;
    /// Row holding the home slots
    pub const HOME_ROW_Z: f32 = 12.5;
    /// Crossing this z counts as reaching a home
    pub const SCORE_Z: f32 = 12.499;

    /// Home slot x positions, left to right in world x
    pub const HOME_XS: [f32; 5] = [2.5, 4.5, 6.5, 8.5, 10.5];
    pub const HOME_SLOTS: usize = 5;
    /// How far off a home center the player may be and still claim it
    pub const HOME_TOLERANCE: f32 = 0.25;

    /// Spare frogs left behind in filled homes
    pub const SPARE_COUNT: usize = 4;
    pub const SPARE_PARK: Vec3 = Vec3::new(6.5, 0.0, -10.0);

    /// Road band (exclusive z range)
    pub const ROAD_Z: (f32, f32) = (0.75, 6.25);
    /// Water band (exclusive z range)
    pub const WATER_Z: (f32, f32) = (7.0, 12.0);
    /// World x limits inside the water band
    pub const WORLD_X_MIN: f32 = 0.0;
    pub const WORLD_X_MAX: f32 = 13.0;
    /// Max z distance for a car to be checked against the player
    pub const ROW_PROXIMITY: f32 = 0.5;

    /// Turtle float cycle length (frame units)
    pub const FLOAT_CYCLE_LEN: f32 = 250.0;
    /// Resting window inside the float cycle (exclusive)
    pub const FLOAT_REST: (f32, f32) = (31.0, 156.0);
    pub const BOB_AMPLITUDE: f32 = 0.00625;
    /// Turtles at or below this height are submerged
    pub const SURFACE_Y: f32 = -0.1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert elapsed milliseconds to 60 Hz frame units
#[inline]
pub fn frame_units(dt_ms: f32) -> f32 {
    dt_ms * consts::FRAMES_PER_MS
}
