//! Cars, logs and turtles
//!
//! One tagged struct covers all three; the tag picks the footprint and
//! whether the dive cycle applies. Lane speed and wrap live in the
//! obstacle's [`LaneMotion`].

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::blast::Wreck;
use super::entity::{Frame, PositionedEntity};
use super::lane::{CAR_HALF, LOG_HALF, LaneMotion, TURTLE_HALF};
use super::turtle::is_above_water;

/// Cosmetic car paint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl CarColor {
    /// Pick a colour from a uniform roll in [0, 1)
    pub fn from_roll(r: f32) -> Self {
        if r < 0.25 {
            CarColor::Red
        } else if r < 0.5 {
            CarColor::Blue
        } else if r < 0.75 {
            CarColor::Green
        } else {
            CarColor::Yellow
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car { color: CarColor },
    Log,
    Turtle,
}

impl ObstacleKind {
    /// Footprint half-extents (x, z)
    pub fn half_extents(&self) -> Vec2 {
        match self {
            ObstacleKind::Car { .. } => CAR_HALF,
            ObstacleKind::Log => LOG_HALF,
            ObstacleKind::Turtle => TURTLE_HALF,
        }
    }
}

/// A lane-bound obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Stable slot, unchanged for the whole session
    pub index: u32,
    pub kind: ObstacleKind,
    /// 1-based lane within its obstacle class
    pub lane: u8,
    pub center: Vec3,
    pub motion: LaneMotion,
    /// Blast damage (cars only)
    #[serde(default)]
    pub wreck: Wreck,
}

impl Obstacle {
    pub fn new(index: u32, kind: ObstacleKind, lane: u8, center: Vec3, motion: LaneMotion) -> Self {
        Self {
            index,
            kind,
            lane,
            center,
            motion,
            wreck: Wreck::Intact,
        }
    }

    /// Lane row as a z position
    pub fn row(&self) -> f32 {
        self.center.z
    }

    /// Recomputed on demand from the current height
    pub fn above_water(&self) -> bool {
        is_above_water(self.center.y)
    }

    /// Whether this obstacle can still hit or carry the player
    pub fn is_solid(&self) -> bool {
        self.wreck == Wreck::Intact
    }

    /// Base yaw for rendering; cars heading toward -x are turned around
    pub fn yaw(&self) -> f32 {
        match (self.kind, self.motion.heading) {
            (ObstacleKind::Car { .. }, super::lane::Heading::NegX) => std::f32::consts::PI,
            _ => 0.0,
        }
    }
}

impl PositionedEntity for Obstacle {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn bounds(&self) -> Aabb {
        Aabb::around(self.center, self.kind.half_extents())
    }

    fn update_position(&mut self, frame: &Frame) {
        if let Wreck::Exploding { .. } = self.wreck {
            self.wreck = self.wreck.advance(&mut self.center, frame.dt_ms);
            return;
        }

        self.center.x = self.motion.step(self.center.x, frame.dt_ms);
        if self.kind == ObstacleKind::Turtle {
            self.center.y += frame.float_cycle.bob_offset(frame.dt_ms);
        }
    }
}
