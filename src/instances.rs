//! Per-entity transforms packed for the renderer
//!
//! The simulation hands the draw layer one instance per visible model: a
//! column-major model matrix plus a kind and tint tag. The struct is
//! `Pod`, so a slice goes straight into a vertex or storage buffer.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::sim::{CarColor, GameState, ObstacleKind};

/// Model kinds (must match shader)
pub mod kind {
    pub const CAR: u32 = 0;
    pub const LOG: u32 = 1;
    pub const TURTLE: u32 = 2;
    pub const FROG: u32 = 3;
    pub const SPARE: u32 = 4;
}

// Model space to world scale per kind
const CAR_SCALE: Vec3 = Vec3::splat(0.25);
const LOG_SCALE: Vec3 = Vec3::ONE;
const TURTLE_SCALE: Vec3 = Vec3::new(0.325, 0.25, 0.25);
const FROG_SCALE: Vec3 = Vec3::splat(0.055);

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct EntityInstance {
    pub model: [[f32; 4]; 4], // offset 0
    pub kind: u32,            // offset 64
    /// Car paint index, 0 for everything else
    pub tint: u32, // offset 68
    _pad: [u32; 2], // pad to 80 bytes
}

impl EntityInstance {
    pub fn new(kind: u32, tint: u32, center: Vec3, yaw: f32, scale: Vec3) -> Self {
        let model =
            Mat4::from_scale_rotation_translation(scale, Quat::from_rotation_y(yaw), center);
        Self {
            model: model.to_cols_array_2d(),
            kind,
            tint,
            _pad: [0; 2],
        }
    }

    pub fn translation(&self) -> Vec3 {
        Mat4::from_cols_array_2d(&self.model).w_axis.truncate()
    }
}

fn tint_of(color: CarColor) -> u32 {
    match color {
        CarColor::Red => 0,
        CarColor::Blue => 1,
        CarColor::Green => 2,
        CarColor::Yellow => 3,
    }
}

/// One instance per car, log, turtle, spare marker and the player, in that order
pub fn collect_instances(state: &GameState) -> Vec<EntityInstance> {
    let mut out = Vec::with_capacity(
        state.cars.len() + state.logs.len() + state.turtles.len() + state.spares.len() + 1,
    );

    for obstacle in state.obstacles() {
        let instance = match obstacle.kind {
            ObstacleKind::Car { color } => EntityInstance::new(
                kind::CAR,
                tint_of(color),
                obstacle.center,
                obstacle.yaw(),
                CAR_SCALE,
            ),
            ObstacleKind::Log => {
                EntityInstance::new(kind::LOG, 0, obstacle.center, 0.0, LOG_SCALE)
            }
            ObstacleKind::Turtle => {
                EntityInstance::new(kind::TURTLE, 0, obstacle.center, 0.0, TURTLE_SCALE)
            }
        };
        out.push(instance);
    }

    for spare in &state.spares {
        out.push(EntityInstance::new(kind::SPARE, 0, spare.center, spare.yaw, FROG_SCALE));
    }

    out.push(EntityInstance::new(
        kind::FROG,
        0,
        state.player.center,
        state.player.yaw,
        FROG_SCALE,
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SPARE_PARK, START_CELL};

    #[test]
    fn test_layout_is_80_bytes() {
        assert_eq!(std::mem::size_of::<EntityInstance>(), 80);
    }

    #[test]
    fn test_one_instance_per_model() {
        let state = GameState::new(3);
        let instances = collect_instances(&state);
        assert_eq!(instances.len(), 13 + 10 + 6 + 4 + 1);

        let player = instances.last().copied().expect("player instance");
        assert_eq!(player.kind, kind::FROG);
        assert!(player.translation().abs_diff_eq(START_CELL, 1e-6));

        let spares: Vec<_> = instances.iter().filter(|i| i.kind == kind::SPARE).collect();
        assert_eq!(spares.len(), 4);
        assert!(spares.iter().all(|s| s.translation().abs_diff_eq(SPARE_PARK, 1e-6)));

        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), instances.len() * 80);
    }

    #[test]
    fn test_westbound_cars_are_turned_around() {
        let state = GameState::new(3);
        let instances = collect_instances(&state);
        // Lane 1 drives toward -x; its x axis points backwards
        let first = Mat4::from_cols_array_2d(&instances[0].model);
        assert!(first.x_axis.x < 0.0);
        assert_eq!(instances[0].kind, kind::CAR);
    }
}
