//! Player motion controller
//!
//! The player owns a discrete target cell and a continuous rendered
//! center. Move commands shift the target by one cell; every frame a
//! damped spring pulls the center toward the target. While riding a log or
//! turtle the target itself drifts with the platform, so the spring drags
//! the player along smoothly.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::entity::{Frame, PositionedEntity};
use super::state::HomeSlots;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{frame_units, normalize_angle};

/// Which way the player model faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Absolute yaw of this facing about the vertical axis
    pub fn yaw(&self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Facing::Up => 0.0,
            Facing::Left => FRAC_PI_2,
            Facing::Down => PI,
            Facing::Right => -FRAC_PI_2,
        }
    }

    /// One-shot rotation needed to turn from `self` to `to`
    pub fn turn_to(&self, to: Facing) -> f32 {
        normalize_angle(to.yaw() - self.yaw())
    }
}

/// A discrete hop command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Forward,
    Left,
    Down,
    Right,
}

impl Move {
    pub fn facing(&self) -> Facing {
        match self {
            Move::Forward => Facing::Up,
            Move::Left => Facing::Left,
            Move::Down => Facing::Down,
            Move::Right => Facing::Right,
        }
    }
}

/// Spring constants copied out of the tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub tension: f32,
    pub friction: f32,
    pub precision: f32,
}

impl Spring {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            tension: tuning.tension,
            friction: tuning.friction,
            precision: tuning.precision,
        }
    }
}

/// The player-controlled frog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Rendered position
    pub center: Vec3,
    /// Cell the spring pulls toward
    pub target: Vec3,
    pub facing: Facing,
    /// Accumulated model yaw. Usually `facing.yaw()`, but a reset under
    /// timeout skips the half turn from down, so the two can disagree.
    pub yaw: f32,
    /// Spring integrator state, per frame unit
    pub velocity: Vec3,
    /// Platform velocity inherited while riding, per ms
    pub drift: Vec3,
    pub spring: Spring,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            center: START_CELL,
            target: START_CELL,
            facing: Facing::Up,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            drift: Vec3::ZERO,
            spring: Spring::from_tuning(tuning),
        }
    }

    fn turn(&mut self, to: Facing) {
        if self.facing != to {
            self.yaw = normalize_angle(self.yaw + self.facing.turn_to(to));
            self.facing = to;
        }
    }

    /// Dispatch a hop. Returns true if the target cell changed.
    pub fn apply_move(&mut self, mv: Move, homes: &mut HomeSlots) -> bool {
        match mv {
            Move::Forward => self.move_forward(homes),
            Move::Left => self.move_left(),
            Move::Down => self.move_down(),
            Move::Right => self.move_right(),
        }
    }

    /// Hop one row forward, or into a free home from the last row
    pub fn move_forward(&mut self, homes: &mut HomeSlots) -> bool {
        let moved = if self.target.z < LAST_ROW_Z {
            self.target = Vec3::new(self.target.x, START_CELL.y, self.target.z + 1.0);
            true
        } else if self.target.z == LAST_ROW_Z {
            match homes.claim_at(self.center.x) {
                Some(slot) => {
                    log::debug!("Claimed home slot {slot}");
                    self.target = Vec3::new(HOME_XS[slot], START_CELL.y, HOME_ROW_Z);
                    true
                }
                None => false,
            }
        } else {
            false
        };
        self.turn(Facing::Up);
        moved
    }

    /// Hop one column toward +x
    pub fn move_left(&mut self) -> bool {
        let moved = self.target.x < GRID_MAX && self.target.z < HOME_ROW_Z;
        if moved {
            self.target = Vec3::new(self.target.x + 1.0, START_CELL.y, self.target.z);
        }
        self.turn(Facing::Left);
        moved
    }

    /// Hop one row back
    pub fn move_down(&mut self) -> bool {
        let moved = self.target.z > GRID_MIN && self.target.z < HOME_ROW_Z;
        if moved {
            self.target = Vec3::new(self.target.x, START_CELL.y, self.target.z - 1.0);
        }
        self.turn(Facing::Down);
        moved
    }

    /// Hop one column toward -x
    pub fn move_right(&mut self) -> bool {
        let moved = self.target.x > GRID_MIN && self.target.z < HOME_ROW_Z;
        if moved {
            self.target = Vec3::new(self.target.x - 1.0, START_CELL.y, self.target.z);
        }
        self.turn(Facing::Right);
        moved
    }

    /// Spring step for this frame, in frame units. Zero once converged.
    fn spring_velocity(&mut self) -> Vec3 {
        let error = Vec3::new(self.target.x - self.center.x, 0.0, self.target.z - self.center.z);
        if error.length() < self.spring.precision {
            return Vec3::ZERO;
        }

        let spring_force = error * self.spring.tension;
        let friction_force = self.velocity * -self.spring.friction;
        self.velocity += spring_force + friction_force;
        self.velocity
    }

    /// Snap back to the start cell facing forward.
    ///
    /// With `timeout_active` a player facing down keeps its model yaw; only
    /// the logical facing flips to up.
    pub fn reset_position(&mut self, timeout_active: bool) {
        self.center = START_CELL;
        self.target = START_CELL;
        self.velocity = Vec3::ZERO;
        self.drift = Vec3::ZERO;

        if self.facing != Facing::Up {
            if timeout_active && self.facing == Facing::Down {
                self.facing = Facing::Up;
            } else {
                self.turn(Facing::Up);
            }
        }
    }

    /// Distance left to the target on the ground plane
    pub fn remaining(&self) -> f32 {
        Vec2::new(self.target.x - self.center.x, self.target.z - self.center.z).length()
    }
}

impl PositionedEntity for Player {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn bounds(&self) -> Aabb {
        Aabb::around(self.center, Vec2::splat(PLAYER_HALF_EXTENT))
    }

    fn update_position(&mut self, frame: &Frame) {
        self.target += self.drift * frame.dt_ms;
        let step = self.spring_velocity();
        self.center += step * frame_units(frame.dt_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::turtle::FloatCycle;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    fn frame() -> Frame {
        Frame {
            dt_ms: 1000.0 / 60.0,
            float_cycle: FloatCycle::new(75.0),
        }
    }

    fn player() -> Player {
        Player::new(&Tuning::default())
    }

    fn settle(p: &mut Player, frames: usize) {
        for _ in 0..frames {
            p.update_position(&frame());
        }
    }

    #[test]
    fn test_forward_hop_advances_one_row() {
        let mut p = player();
        let mut homes = HomeSlots::default();
        assert!(p.move_forward(&mut homes));
        assert_eq!(p.target, Vec3::new(6.5, 0.25, 1.5));
        assert_eq!(p.facing, Facing::Up);
    }

    #[test]
    fn test_lateral_limits() {
        let mut p = player();
        p.target.x = GRID_MAX;
        assert!(!p.move_left());
        assert_eq!(p.target.x, GRID_MAX);
        assert_eq!(p.facing, Facing::Left, "facing still turns on a blocked hop");

        p.target.x = GRID_MIN;
        assert!(!p.move_right());
        assert_eq!(p.target.x, GRID_MIN);

        p.target.z = GRID_MIN;
        assert!(!p.move_down());
        assert_eq!(p.target.z, GRID_MIN);
    }

    #[test]
    fn test_no_lateral_moves_in_home_row() {
        let mut p = player();
        p.target = Vec3::new(4.5, 0.25, HOME_ROW_Z);
        assert!(!p.move_left());
        assert!(!p.move_right());
        assert!(!p.move_down());
        assert_eq!(p.target, Vec3::new(4.5, 0.25, HOME_ROW_Z));
    }

    #[test]
    fn test_home_claim_needs_alignment() {
        let mut p = player();
        let mut homes = HomeSlots::default();
        p.target = Vec3::new(5.5, 0.25, LAST_ROW_Z);
        p.center = p.target;
        assert!(!p.move_forward(&mut homes));
        assert_eq!(p.target.z, LAST_ROW_Z);

        p.center.x = 4.6;
        assert!(p.move_forward(&mut homes));
        assert_eq!(p.target, Vec3::new(4.5, 0.25, HOME_ROW_Z));
        assert_eq!(homes.pending(), Some(1));
    }

    #[test]
    fn test_filled_home_cannot_be_claimed() {
        let mut p = player();
        let mut homes = HomeSlots::default();
        homes.filled[2] = true;
        p.target = Vec3::new(6.5, 0.25, LAST_ROW_Z);
        p.center = p.target;
        assert!(!p.move_forward(&mut homes));
        assert_eq!(p.target.z, LAST_ROW_Z);
    }

    #[test]
    fn test_turn_angles() {
        assert_eq!(Facing::Up.turn_to(Facing::Left), PI / 2.0);
        assert_eq!(Facing::Up.turn_to(Facing::Right), -PI / 2.0);
        assert!((Facing::Up.turn_to(Facing::Down).abs() - PI).abs() < 1e-6);
        assert!((Facing::Right.turn_to(Facing::Down) + PI / 2.0).abs() < 1e-6);
        assert!((Facing::Left.turn_to(Facing::Right).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_tracks_facing() {
        let mut p = player();
        p.move_left();
        assert!((p.yaw - PI / 2.0).abs() < 1e-6);
        p.move_down();
        assert!((p.yaw.abs() - PI).abs() < 1e-6);
        p.move_right();
        assert!((p.yaw + PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_spring_converges_without_overshoot() {
        let mut p = player();
        let mut homes = HomeSlots::default();
        p.move_forward(&mut homes);

        let mut last = p.remaining();
        let mut frames = 0;
        while p.remaining() >= 0.001 {
            p.update_position(&frame());
            let now = p.remaining();
            assert!(now <= last + 1e-6, "distance grew from {last} to {now}");
            assert!(p.center.z <= p.target.z + 1e-4, "overshot to {}", p.center.z);
            last = now;
            frames += 1;
            assert!(frames < 120, "did not converge");
        }
    }

    #[test]
    fn test_converged_player_stays_put() {
        let mut p = player();
        settle(&mut p, 10);
        assert_eq!(p.center, START_CELL);
    }

    #[test]
    fn test_drift_moves_target_and_drags_center() {
        let mut p = player();
        p.drift = Vec3::new(0.0021, 0.0, 0.0);
        settle(&mut p, 60);
        assert!((p.target.x - (6.5 + 0.0021 * 1000.0)).abs() < 1e-3);
        assert!(p.center.x > 6.5 + 1.0);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut p = player();
        let mut homes = HomeSlots::default();
        p.move_forward(&mut homes);
        p.move_left();
        p.drift = Vec3::new(0.1, 0.0, 0.0);
        settle(&mut p, 5);

        p.reset_position(false);
        assert_eq!(p.center, START_CELL);
        assert_eq!(p.target, START_CELL);
        assert_eq!(p.velocity, Vec3::ZERO);
        assert_eq!(p.drift, Vec3::ZERO);
        assert_eq!(p.facing, Facing::Up);
        assert!(p.yaw.abs() < 1e-6);
    }

    #[test]
    fn test_reset_under_timeout_skips_half_turn() {
        let mut p = player();
        p.move_down();
        p.reset_position(true);
        assert_eq!(p.facing, Facing::Up);
        assert!((p.yaw.abs() - PI).abs() < 1e-6, "model keeps facing down");

        let mut p = player();
        p.move_left();
        p.reset_position(true);
        assert!(p.yaw.abs() < 1e-6, "quarter turns still apply");
    }

    proptest! {
        #[test]
        fn reset_is_idempotent(
            moves in proptest::collection::vec(0u8..4, 0..12),
            frames in 0usize..30,
            timeout in any::<bool>(),
        ) {
            let mut p = player();
            let mut homes = HomeSlots::default();
            for m in moves {
                let mv = match m {
                    0 => Move::Forward,
                    1 => Move::Left,
                    2 => Move::Down,
                    _ => Move::Right,
                };
                p.apply_move(mv, &mut homes);
            }
            settle(&mut p, frames);

            p.reset_position(timeout);
            let once = p.clone();
            p.reset_position(timeout);
            prop_assert_eq!(p.center, once.center);
            prop_assert_eq!(p.target, once.target);
            prop_assert_eq!(p.velocity, once.velocity);
            prop_assert_eq!(p.facing, once.facing);
            prop_assert_eq!(p.yaw, once.yaw);
        }
    }
}
