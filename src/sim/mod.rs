//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only enters through the frame's `dt_ms`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod blast;
pub mod collision;
pub mod entity;
pub mod lane;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;
pub mod turtle;

pub use aabb::Aabb;
pub use blast::{BlastState, Wreck};
pub use collision::{Band, CollisionOutcome, DeathCause, check_collision};
pub use entity::{Frame, PositionedEntity};
pub use lane::{Heading, LaneMotion};
pub use obstacle::{CarColor, Obstacle, ObstacleKind};
pub use player::{Facing, Move, Player};
pub use state::{Countdown, GameEvent, GamePhase, GameState, HomeSlots, SpareMarker};
pub use tick::{TickInput, sanitize_dt, tick};
pub use turtle::FloatCycle;
