//! Blast ability
//!
//! An optional mode that lets the player launch nearby cars off the road.
//! Launched cars arc upward under gravity for a short burst, then get
//! parked off the playfield until the next reset.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::state::Countdown;
use crate::consts::SPARE_PARK;
use crate::frame_units;

/// Gravity applied to launched cars, per frame unit squared
const BLAST_GRAVITY: f32 = -0.2;
/// Length of the launch arc in frame units
const BLAST_FRAMES: f32 = 15.0;

/// Damage state of a car
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Wreck {
    #[default]
    Intact,
    /// Flying; velocity is per frame unit
    Exploding { velocity: Vec3, elapsed: f32 },
    /// Off the playfield for the rest of the session
    Parked,
}

impl Wreck {
    /// Step a launched car and return its next state
    pub fn advance(self, center: &mut Vec3, dt_ms: f32) -> Wreck {
        let Wreck::Exploding {
            mut velocity,
            elapsed,
        } = self
        else {
            return self;
        };

        let f = frame_units(dt_ms);
        velocity.y += BLAST_GRAVITY * f;
        *center += velocity * f;

        let elapsed = elapsed + f;
        if elapsed >= BLAST_FRAMES {
            center.x = SPARE_PARK.x;
            center.z = SPARE_PARK.z;
            Wreck::Parked
        } else {
            Wreck::Exploding { velocity, elapsed }
        }
    }
}

/// Blast mode toggle and recharge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlastState {
    pub enabled: bool,
    pub cooldown: Countdown,
}

impl BlastState {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        log::debug!("Blast mode {}", if self.enabled { "on" } else { "off" });
    }

    pub fn ready(&self) -> bool {
        self.enabled && !self.cooldown.is_active()
    }

    /// Remaining recharge as a 0-1 fraction (1 = just fired)
    pub fn recharge_fraction(&self, total_ms: f32) -> f32 {
        self.cooldown.fraction(total_ms)
    }
}

/// Launch every intact car within `radius` of `origin` on the x/z plane.
/// Returns how many cars were launched.
pub fn launch_cars(cars: &mut [Obstacle], origin: Vec3, radius: f32) -> u32 {
    let mut launched = 0;
    for car in cars.iter_mut() {
        if !matches!(car.kind, ObstacleKind::Car { .. }) || !car.is_solid() {
            continue;
        }
        let dx = car.center.x - origin.x;
        let dz = car.center.z - origin.z;
        if (dx * dx + dz * dz).sqrt() < radius {
            car.wreck = Wreck::Exploding {
                velocity: Vec3::new(dx, 1.0, dz),
                elapsed: 0.0,
            };
            launched += 1;
        }
    }
    launched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Frame, PositionedEntity};
    use crate::sim::lane::car_motion;
    use crate::sim::obstacle::CarColor;
    use crate::sim::turtle::FloatCycle;
    use crate::tuning::Tuning;

    fn car_at(x: f32, z: f32) -> Obstacle {
        Obstacle::new(
            0,
            ObstacleKind::Car {
                color: CarColor::Red,
            },
            1,
            Vec3::new(x, 0.35, z),
            car_motion(1, &Tuning::default()),
        )
    }

    #[test]
    fn test_launch_only_nearby_cars() {
        let mut cars = vec![car_at(6.0, 1.5), car_at(12.0, 1.5)];
        let launched = launch_cars(&mut cars, Vec3::new(6.5, 0.25, 0.5), 3.0);
        assert_eq!(launched, 1);
        assert!(matches!(cars[0].wreck, Wreck::Exploding { .. }));
        assert_eq!(cars[1].wreck, Wreck::Intact);
    }

    #[test]
    fn test_launched_car_parks_off_field() {
        let mut car = car_at(6.0, 1.5);
        car.wreck = Wreck::Exploding {
            velocity: Vec3::new(-0.5, 1.0, 1.0),
            elapsed: 0.0,
        };
        let frame = Frame {
            dt_ms: 1000.0 / 60.0,
            float_cycle: FloatCycle::new(75.0),
        };
        for _ in 0..20 {
            car.update_position(&frame);
        }
        assert_eq!(car.wreck, Wreck::Parked);
        assert_eq!(car.center.z, SPARE_PARK.z);
        assert!(!car.is_solid());
    }

    #[test]
    fn test_ready_needs_mode_and_recharge() {
        let mut blast = BlastState::default();
        assert!(!blast.ready());
        blast.toggle();
        assert!(blast.ready());
        blast.cooldown.start(100.0);
        assert!(!blast.ready());
        blast.cooldown.tick(100.0);
        assert!(blast.ready());
    }
}
