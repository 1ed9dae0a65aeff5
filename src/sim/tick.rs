//! Per-frame simulation step
//!
//! Order within a frame: housekeeping (pause, timers), input, obstacles,
//! player, then scoring and collision. Obstacles move before the player,
//! so drift found this frame moves the target on the next one.

use super::blast::launch_cars;
use super::collision::{CollisionOutcome, check_collision};
use super::entity::{Frame, PositionedEntity};
use super::player::Move;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Hops in the order they were pressed
    pub moves: Vec<Move>,
    /// Pause toggle
    pub pause: bool,
    /// Start a fresh game with the same seed
    pub reset: bool,
    /// Fire the blast ability
    pub blast: bool,
    /// Flip blast mode on or off
    pub toggle_blast: bool,
}

/// Clamp a host-supplied frame time into something the integrators can use
pub fn sanitize_dt(dt_ms: f32, max_ms: f32) -> f32 {
    if !dt_ms.is_finite() || dt_ms < 0.0 {
        log::warn!("Ignoring invalid frame time {dt_ms}");
        0.0
    } else if dt_ms > max_ms {
        log::debug!("Clamping frame time {dt_ms} ms to {max_ms} ms");
        max_ms
    } else {
        dt_ms
    }
}

/// Advance the game by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let dt = sanitize_dt(dt_ms, state.tuning.max_frame_ms);

    if input.reset {
        state.reset_game();
        return;
    }

    if input.pause {
        state.toggle_pause();
    }

    // Paused, won and lost all stop the world
    if state.phase != GamePhase::Playing {
        return;
    }

    if state.timeout.tick(dt) {
        log::debug!("Input timeout expired");
    }

    if state.is_frozen() {
        if state.freeze.tick(dt) {
            let timed_out = state.is_timed_out();
            state.player.reset_position(timed_out);
            log::debug!("Freeze over, player back at start");
        }
        return;
    }

    for &mv in &input.moves {
        state.apply_move(mv);
    }

    if input.toggle_blast {
        state.blast.toggle();
    }
    if input.blast {
        trigger_blast(state);
    }

    let frame = Frame {
        dt_ms: dt,
        float_cycle: state.float_cycle,
    };
    for obstacle in state
        .cars
        .iter_mut()
        .chain(state.logs.iter_mut())
        .chain(state.turtles.iter_mut())
    {
        obstacle.update_position(&frame);
    }
    state.float_cycle.advance(dt, state.tuning.float_rate);
    state.blast.cooldown.tick(dt);

    state.player.update_position(&frame);
    state.frame += 1;

    if state.check_score() {
        return;
    }

    let outcome = check_collision(
        &state.player,
        &state.cars,
        &state.logs,
        &state.turtles,
        &state.tuning,
    );
    state.player.drift = outcome.drift();
    if let CollisionOutcome::Fatal(cause) = outcome {
        state.death_reset(cause);
    }
}

fn trigger_blast(state: &mut GameState) {
    if !state.blast.ready() || state.is_timed_out() {
        return;
    }
    let cars = launch_cars(&mut state.cars, state.player.center, state.tuning.blast_radius);
    state.blast.cooldown.start(state.tuning.blast_cooldown_ms);
    state.events.push(GameEvent::Blast { cars });
    log::debug!("Blast launched {cars} cars");
}
