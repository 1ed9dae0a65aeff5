//! Player vs obstacle collision
//!
//! The player's z picks a band: on the road any car contact is fatal, in
//! the river the player must be standing on a log or a surfaced turtle,
//! and everywhere else is safe ground. Riding hands the platform's speed
//! back as drift.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::entity::PositionedEntity;
use super::obstacle::Obstacle;
use super::player::Player;
use crate::consts::*;
use crate::tuning::{RowFilter, Tuning};

/// Horizontal strip of the playfield the player is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Road,
    Water,
    Neutral,
}

impl Band {
    pub fn of(z: f32) -> Band {
        if z > ROAD_Z.0 && z < ROAD_Z.1 {
            Band::Road
        } else if z > WATER_Z.0 && z < WATER_Z.1 {
            Band::Water
        } else {
            Band::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Hit by a car
    Vehicle,
    /// In the river with nothing underfoot
    Drowned,
    /// Carried off the side of the river
    OutOfBounds,
}

/// Result of one collision pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    Clear,
    /// Standing on a log or turtle; drift is per ms
    Riding { drift: Vec3 },
    Fatal(DeathCause),
}

impl CollisionOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CollisionOutcome::Fatal(_))
    }

    /// Drift to hand to the player (zero unless riding)
    pub fn drift(&self) -> Vec3 {
        match self {
            CollisionOutcome::Riding { drift } => *drift,
            _ => Vec3::ZERO,
        }
    }
}

/// Platform drift direction from the row it occupies: odd rows carry
/// toward +x, even rows toward -x.
fn drift_sign(bounds: &Aabb) -> f32 {
    if bounds.z_min.floor().rem_euclid(2.0) == 1.0 {
        1.0
    } else {
        -1.0
    }
}

fn hits_car(player: &Aabb, player_z: f32, cars: &[Obstacle], filter: RowFilter) -> bool {
    cars.iter()
        .filter(|car| car.is_solid())
        .filter(|car| match filter {
            RowFilter::Proximity => (player_z - car.row()).abs() <= ROW_PROXIMITY,
            RowFilter::AllCars => true,
        })
        .any(|car| player.overlaps(&car.bounds()))
}

/// First platform under the player, as drift. Logs are checked before
/// turtles, each in spawn order.
fn find_platform(
    player: &Aabb,
    logs: &[Obstacle],
    turtles: &[Obstacle],
    tuning: &Tuning,
) -> Option<Vec3> {
    let on_log = logs.iter().map(|log| log.bounds()).find(|b| player.overlaps(b));
    if let Some(bounds) = on_log {
        return Some(Vec3::new(drift_sign(&bounds) * tuning.log_speed, 0.0, 0.0));
    }

    turtles
        .iter()
        .filter(|turtle| turtle.above_water())
        .map(|turtle| turtle.bounds())
        .find(|b| player.overlaps(b))
        .map(|bounds| Vec3::new(drift_sign(&bounds) * tuning.turtle_speed, 0.0, 0.0))
}

/// Resolve the player against every obstacle class
pub fn check_collision(
    player: &Player,
    cars: &[Obstacle],
    logs: &[Obstacle],
    turtles: &[Obstacle],
    tuning: &Tuning,
) -> CollisionOutcome {
    let bounds = player.bounds();
    let z = player.center.z;

    match Band::of(z) {
        Band::Road => {
            if hits_car(&bounds, z, cars, tuning.row_filter) {
                CollisionOutcome::Fatal(DeathCause::Vehicle)
            } else {
                CollisionOutcome::Clear
            }
        }
        Band::Water => {
            if bounds.x_min <= WORLD_X_MIN || bounds.x_max >= WORLD_X_MAX {
                return CollisionOutcome::Fatal(DeathCause::OutOfBounds);
            }
            match find_platform(&bounds, logs, turtles, tuning) {
                Some(drift) => CollisionOutcome::Riding { drift },
                None => CollisionOutcome::Fatal(DeathCause::Drowned),
            }
        }
        Band::Neutral => CollisionOutcome::Clear,
    }
}
