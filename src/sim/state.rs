//! Game state and progress bookkeeping
//!
//! Everything a frame reads or writes lives here, so a serialized
//! `GameState` plus the seed is enough to resume a run.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::blast::BlastState;
use super::collision::DeathCause;
use super::lane::{SlotCounter, spawn_cars, spawn_logs, spawn_turtles};
use super::obstacle::Obstacle;
use super::player::{Move, Player};
use super::turtle::FloatCycle;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (freeze and timeout are overlays on this phase)
    Playing,
    /// User pause, nothing advances
    Paused,
    /// All five homes filled
    Won,
    /// Out of lives
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Edges collaborators react to (audio, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Hopped,
    Died { cause: DeathCause, lives_left: u8 },
    Scored { slot: usize, home_count: u8 },
    Won,
    Lost,
    Blast { cars: u32 },
    Paused,
    Resumed,
    Reset,
}

/// Simulated-time countdown. Restarting replaces the remaining time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ms: f32,
}

impl Countdown {
    pub fn start(&mut self, ms: f32) {
        self.remaining_ms = ms.max(0.0);
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    /// Count down by `dt_ms`. Returns true only on the frame it runs out.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_ms = (self.remaining_ms - dt_ms).max(0.0);
        !self.is_active()
    }

    /// Remaining time as a fraction of `total_ms`
    pub fn fraction(&self, total_ms: f32) -> f32 {
        if total_ms <= 0.0 {
            0.0
        } else {
            (self.remaining_ms / total_ms).clamp(0.0, 1.0)
        }
    }
}

/// The five landing cells on the far bank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeSlots {
    pub filled: [bool; HOME_SLOTS],
    /// Slot the player is currently hopping into
    pending: Option<usize>,
}

impl HomeSlots {
    /// Reserve the free slot whose center is within tolerance of `x`
    pub fn claim_at(&mut self, x: f32) -> Option<usize> {
        if self.pending.is_some() {
            return None;
        }
        let slot = HOME_XS
            .iter()
            .enumerate()
            .position(|(i, &hx)| !self.filled[i] && (x - hx).abs() < HOME_TOLERANCE)?;
        self.pending = Some(slot);
        Some(slot)
    }

    /// Mark the reserved slot filled
    pub fn confirm(&mut self) -> Option<usize> {
        let slot = self.pending.take()?;
        self.filled[slot] = true;
        Some(slot)
    }

    /// Drop the reservation (the hop never landed)
    pub fn release(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    pub fn count(&self) -> u8 {
        self.filled.iter().filter(|&&f| f).count() as u8
    }
}

/// A copy of the player left sitting in a filled home
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpareMarker {
    pub center: Vec3,
    pub yaw: f32,
}

impl Default for SpareMarker {
    fn default() -> Self {
        Self {
            center: SPARE_PARK,
            yaw: 0.0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub lives: u8,
    pub homes: HomeSlots,
    /// Always equal to `homes.count()`
    pub home_count: u8,
    /// Death pause; the player stays where it died
    pub freeze: Countdown,
    /// Move lock after a score or death
    pub timeout: Countdown,
    pub float_cycle: FloatCycle,
    pub player: Player,
    /// Obstacles, each list in spawn order
    pub cars: Vec<Obstacle>,
    pub logs: Vec<Obstacle>,
    pub turtles: Vec<Obstacle>,
    pub spares: [SpareMarker; SPARE_COUNT],
    pub blast: BlastState,
    /// Simulated frames since the last reset
    pub frame: u64,
    /// Pending events, drained by the host each frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut slots = SlotCounter::default();
        let cars = spawn_cars(&tuning, seed, &mut slots);
        let logs = spawn_logs(&tuning, &mut slots);
        let turtles = spawn_turtles(&tuning, &mut slots);

        Self {
            seed,
            phase: GamePhase::Playing,
            lives: tuning.start_lives,
            homes: HomeSlots::default(),
            home_count: 0,
            freeze: Countdown::default(),
            timeout: Countdown::default(),
            float_cycle: FloatCycle::new(tuning.float_cycle_start),
            player: Player::new(&tuning),
            cars,
            logs,
            turtles,
            spares: [SpareMarker::default(); SPARE_COUNT],
            blast: BlastState::default(),
            frame: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Start over with the same seed and tuning. Blast mode stays as chosen.
    pub fn reset_game(&mut self) {
        let blast_enabled = self.blast.enabled;
        let events = std::mem::take(&mut self.events);
        *self = Self::with_tuning(self.seed, self.tuning.clone());
        self.blast.enabled = blast_enabled;
        self.events = events;
        self.events.push(GameEvent::Reset);
        log::info!("Game reset (seed {})", self.seed);
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze.is_active()
    }

    pub fn is_timed_out(&self) -> bool {
        self.timeout.is_active()
    }

    /// Every obstacle in stable order: cars, logs, turtles
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.cars.iter().chain(&self.logs).chain(&self.turtles)
    }

    /// Apply a hop command. Returns true if the target cell changed.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        if self.phase != GamePhase::Playing || self.is_frozen() || self.is_timed_out() {
            return false;
        }
        let moved = self.player.apply_move(mv, &mut self.homes);
        if moved {
            self.events.push(GameEvent::Hopped);
        }
        moved
    }

    /// Flip between playing and paused; terminal phases ignore it
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            GamePhase::Won | GamePhase::Lost => {}
        }
    }

    /// Score if the player has crossed into the home row. Returns true on a score.
    pub fn check_score(&mut self) -> bool {
        if self.player.center.z <= SCORE_Z {
            return false;
        }

        let slot = match self.homes.confirm() {
            Some(slot) => slot,
            None => {
                // Reached the bank without a reservation; claim whatever is underfoot
                let claimed = self.homes.claim_at(self.player.center.x);
                match claimed.and_then(|_| self.homes.confirm()) {
                    Some(slot) => slot,
                    None => {
                        log::warn!(
                            "Reached home row at x={} with no free slot",
                            self.player.center.x
                        );
                        let timed_out = self.is_timed_out();
                        self.player.reset_position(timed_out);
                        return false;
                    }
                }
            }
        };

        self.home_count = self.homes.count();
        self.events.push(GameEvent::Scored {
            slot,
            home_count: self.home_count,
        });
        log::info!("Home {} filled ({}/{})", slot, self.home_count, HOME_SLOTS);

        if usize::from(self.home_count) >= HOME_SLOTS {
            self.phase = GamePhase::Won;
            self.events.push(GameEvent::Won);
            log::info!("All homes filled, game won");
            return true;
        }

        let spare = SPARE_COUNT - usize::from(self.home_count);
        self.spares[spare] = SpareMarker {
            center: self.player.center,
            yaw: self.player.yaw,
        };
        self.timeout.start(self.tuning.timeout_ms);
        self.player.reset_position(true);
        true
    }

    /// Take a life. Freezes and locks input while lives remain, otherwise ends the run.
    pub fn death_reset(&mut self, cause: DeathCause) {
        self.lives = self.lives.saturating_sub(1);
        self.homes.release();
        self.player.drift = Vec3::ZERO;
        self.events.push(GameEvent::Died {
            cause,
            lives_left: self.lives,
        });
        log::info!("Player died ({cause:?}), {} lives left", self.lives);

        if self.lives > 0 {
            self.freeze.start(self.tuning.freeze_ms);
            self.timeout.start(self.tuning.timeout_ms);
        } else {
            self.phase = GamePhase::Lost;
            self.freeze.cancel();
            self.events.push(GameEvent::Lost);
            log::info!("Out of lives, game lost");
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
