//! Lane motion and level layout
//!
//! Every obstacle slides along x at a fixed signed speed and wraps to the
//! far edge once it leaves the visible range. Speed, direction, wrap edge
//! and wrap span are all chosen per lane when the obstacle is placed.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{CarColor, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Direction of travel along world x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    PosX,
    NegX,
}

impl Heading {
    pub fn sign(&self) -> f32 {
        match self {
            Heading::PosX => 1.0,
            Heading::NegX => -1.0,
        }
    }
}

/// Horizontal translation with wraparound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneMotion {
    pub heading: Heading,
    /// Speed magnitude in units per ms
    pub speed: f32,
    /// Leaving past this x triggers the wrap
    pub wrap_edge: f32,
    /// Distance jumped back on wrap
    pub wrap_span: f32,
}

impl LaneMotion {
    /// Signed velocity in units per ms
    pub fn velocity(&self) -> f32 {
        self.heading.sign() * self.speed
    }

    /// Translate `x` by one frame and wrap it back into range
    pub fn step(&self, x: f32, dt_ms: f32) -> f32 {
        let x = x + self.velocity() * dt_ms;
        match self.heading {
            Heading::PosX if x > self.wrap_edge => x - self.wrap_span,
            Heading::NegX if x < self.wrap_edge => x + self.wrap_span,
            _ => x,
        }
    }

    /// Range an obstacle occupies once it has wrapped at least once
    pub fn range(&self) -> (f32, f32) {
        match self.heading {
            Heading::PosX => (self.wrap_edge - self.wrap_span, self.wrap_edge),
            Heading::NegX => (self.wrap_edge, self.wrap_edge + self.wrap_span),
        }
    }
}

// Car lanes: z = 1.5 + (lane - 1), spawned leftward from x = 13.5
pub const CAR_HALF: Vec2 = Vec2::new(0.75, 0.31773);
const CAR_Y: f32 = 0.35;
const CAR_SPAWN_X: f32 = 13.5;
const CAR_SPACING: [f32; 5] = [3.667, 5.0, 2.0, 6.667, 3.0];
const CAR_WRAP: f32 = 14.0;

// Log lanes: z = 7.5 + (lane - 1)
pub const LOG_HALF: Vec2 = Vec2::new(2.0, 0.5);
const LOG_Y: f32 = -0.1;
const LOG_SPACING: [f32; 5] = [3.0, 5.0, 11.0, 4.0, 7.0];
const LOG_WRAP: f32 = 17.0;

// Turtle lanes share rows with log lanes 1 and 4
pub const TURTLE_HALF: Vec2 = Vec2::new(0.65, 0.5);
const TURTLE_Y: f32 = -0.075;
const TURTLE_Z: [f32; 2] = [7.5, 10.5];
const TURTLE_SPAWN_X: f32 = 9.0;
const TURTLE_WRAP: f32 = 13.8;

/// Odd car lanes drive toward -x
pub fn car_motion(lane: u8, tuning: &Tuning) -> LaneMotion {
    let speed = tuning.car_speeds[usize::from(lane - 1)];
    if lane % 2 == 1 {
        LaneMotion {
            heading: Heading::NegX,
            speed,
            wrap_edge: -0.5,
            wrap_span: CAR_WRAP,
        }
    } else {
        LaneMotion {
            heading: Heading::PosX,
            speed,
            wrap_edge: 13.5,
            wrap_span: CAR_WRAP,
        }
    }
}

/// Odd log lanes float toward +x
pub fn log_motion(lane: u8, tuning: &Tuning) -> LaneMotion {
    if lane % 2 == 1 {
        LaneMotion {
            heading: Heading::PosX,
            speed: tuning.log_speed,
            wrap_edge: 15.0,
            wrap_span: LOG_WRAP,
        }
    } else {
        LaneMotion {
            heading: Heading::NegX,
            speed: tuning.log_speed,
            wrap_edge: -2.0,
            wrap_span: LOG_WRAP,
        }
    }
}

/// First turtle lane swims toward +x, second toward -x
pub fn turtle_motion(lane: u8, tuning: &Tuning) -> LaneMotion {
    if lane == 1 {
        LaneMotion {
            heading: Heading::PosX,
            speed: tuning.turtle_speed,
            wrap_edge: 13.15,
            wrap_span: TURTLE_WRAP,
        }
    } else {
        LaneMotion {
            heading: Heading::NegX,
            speed: tuning.turtle_speed,
            wrap_edge: -0.65,
            wrap_span: TURTLE_WRAP,
        }
    }
}

/// Hands out stable obstacle slots in spawn order
#[derive(Debug, Default)]
pub struct SlotCounter(u32);

impl SlotCounter {
    pub fn next(&mut self) -> u32 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// Place every car; colours come from a PCG stream seeded by `seed`
pub fn spawn_cars(tuning: &Tuning, seed: u64, slots: &mut SlotCounter) -> Vec<Obstacle> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut cars = Vec::new();
    for (i, &count) in tuning.car_counts.iter().enumerate() {
        let lane = i as u8 + 1;
        for offset in 1..=count {
            let center = Vec3::new(
                CAR_SPAWN_X - f32::from(offset) * CAR_SPACING[i],
                CAR_Y,
                1.5 + i as f32,
            );
            let color = CarColor::from_roll(rng.random::<f32>());
            cars.push(Obstacle::new(
                slots.next(),
                ObstacleKind::Car { color },
                lane,
                center,
                car_motion(lane, tuning),
            ));
        }
    }
    cars
}

pub fn spawn_logs(tuning: &Tuning, slots: &mut SlotCounter) -> Vec<Obstacle> {
    let mut logs = Vec::new();
    for (i, &count) in tuning.log_counts.iter().enumerate() {
        let lane = i as u8 + 1;
        for offset in 1..=count {
            let center = Vec3::new(f32::from(offset) * LOG_SPACING[i], LOG_Y, 7.5 + i as f32);
            logs.push(Obstacle::new(
                slots.next(),
                ObstacleKind::Log,
                lane,
                center,
                log_motion(lane, tuning),
            ));
        }
    }
    logs
}

pub fn spawn_turtles(tuning: &Tuning, slots: &mut SlotCounter) -> Vec<Obstacle> {
    let mut turtles = Vec::new();
    for (i, &count) in tuning.turtle_counts.iter().enumerate() {
        let lane = i as u8 + 1;
        for offset in 1..=count {
            let center = Vec3::new(f32::from(offset) + TURTLE_SPAWN_X, TURTLE_Y, TURTLE_Z[i]);
            turtles.push(Obstacle::new(
                slots.next(),
                ObstacleKind::Turtle,
                lane,
                center,
                turtle_motion(lane, tuning),
            ));
        }
    }
    turtles
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lane_directions_alternate() {
        let tuning = Tuning::default();
        assert_eq!(car_motion(1, &tuning).heading, Heading::NegX);
        assert_eq!(car_motion(2, &tuning).heading, Heading::PosX);
        assert_eq!(log_motion(1, &tuning).heading, Heading::PosX);
        assert_eq!(log_motion(2, &tuning).heading, Heading::NegX);
        assert_eq!(turtle_motion(1, &tuning).heading, Heading::PosX);
        assert_eq!(turtle_motion(2, &tuning).heading, Heading::NegX);
    }

    #[test]
    fn test_wrap_teleports_to_far_edge() {
        let motion = car_motion(1, &Tuning::default());
        let x = motion.step(-0.49, 16.0);
        assert!(x > 13.0, "expected wrap to far edge, got {x}");

        let motion = log_motion(1, &Tuning::default());
        let x = motion.step(14.99, 16.0);
        assert!(x < -1.9, "expected wrap to near edge, got {x}");
    }

    #[test]
    fn test_spawn_counts_and_slots() {
        let tuning = Tuning::default();
        let mut slots = SlotCounter::default();
        let cars = spawn_cars(&tuning, 7, &mut slots);
        let logs = spawn_logs(&tuning, &mut slots);
        let turtles = spawn_turtles(&tuning, &mut slots);
        assert_eq!(cars.len(), 13);
        assert_eq!(logs.len(), 10);
        assert_eq!(turtles.len(), 6);

        let ids: Vec<u32> = cars
            .iter()
            .chain(&logs)
            .chain(&turtles)
            .map(|o| o.index)
            .collect();
        assert_eq!(ids, (0..29).collect::<Vec<_>>());
    }

    #[test]
    fn test_car_colours_follow_seed() {
        let tuning = Tuning::default();
        let colours = |seed| {
            spawn_cars(&tuning, seed, &mut SlotCounter::default())
                .iter()
                .map(|c| c.kind)
                .collect::<Vec<_>>()
        };
        assert_eq!(colours(42), colours(42));
    }

    /// Lane motion for a class (0 car, 1 log, 2 turtle) and a lane index
    fn motion_for(class: u8, lane: u8) -> LaneMotion {
        let tuning = Tuning::default();
        match class {
            0 => car_motion(lane, &tuning),
            1 => log_motion(lane, &tuning),
            // Only two turtle lanes
            _ => turtle_motion(1 + (lane - 1) % 2, &tuning),
        }
    }

    #[test]
    fn test_turtle_lanes_wrap_at_their_own_edges() {
        let tuning = Tuning::default();
        let east = turtle_motion(1, &tuning);
        assert_eq!(east.range(), (13.15 - 13.8, 13.15));
        let x = east.step(13.14, 16.0);
        assert!(x < -0.6, "expected wrap to near edge, got {x}");

        let west = turtle_motion(2, &tuning);
        assert_eq!(west.range(), (-0.65, -0.65 + 13.8));
        let x = west.step(-0.64, 16.0);
        assert!(x > 13.1, "expected wrap to far edge, got {x}");
    }

    proptest! {
        #[test]
        fn wraparound_matches_unwrapped_travel(
            class in 0u8..3,
            lane in 1u8..=5,
            start in 0.0f32..1.0,
            dt in 1.0f32..40.0,
            frames in 1usize..2000,
        ) {
            let motion = motion_for(class, lane);
            let (lo, hi) = motion.range();
            let x0 = lo + start * (hi - lo);
            let mut x = x0;
            for _ in 0..frames {
                x = motion.step(x, dt);
                prop_assert!(x >= lo - 1e-3 && x <= hi + 1e-3, "x={} out of [{}, {}]", x, lo, hi);
            }
            // Same position modulo the wrap span as straight-line travel
            let expected = x0 + motion.velocity() * dt * frames as f32;
            let diff = (x - expected).rem_euclid(motion.wrap_span);
            let err = diff.min(motion.wrap_span - diff);
            prop_assert!(err < 0.05, "err={}", err);
        }
    }
}
