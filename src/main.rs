//! Frogger 3D entry point
//!
//! On the web this exports a small game handle the page drives from
//! `requestAnimationFrame`. Natively it runs a headless demo so the
//! simulation can be watched through the log.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use frogger3d::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use frogger3d::{FollowCamera, KeyCommand, Tuning, collect_instances};

    /// Game handle owned by the page
    #[wasm_bindgen]
    pub struct FroggerGame {
        state: GameState,
        camera: FollowCamera,
        /// One-shot input gathered since the last frame
        input: TickInput,
        last_time: Option<f64>,
    }

    #[wasm_bindgen]
    impl FroggerGame {
        /// Create a game; `tuning_json` may be empty for defaults
        #[wasm_bindgen(constructor)]
        pub fn new(seed: f64, tuning_json: &str) -> FroggerGame {
            let tuning = if tuning_json.trim().is_empty() {
                Tuning::default()
            } else {
                Tuning::from_json_or_default(tuning_json)
            };
            let seed = seed as u64;
            log::info!("Game initialized with seed: {}", seed);
            FroggerGame {
                state: GameState::with_tuning(seed, tuning),
                camera: FollowCamera::new(),
                input: TickInput::default(),
                last_time: None,
            }
        }

        /// Advance to timestamp `now_ms` (from `requestAnimationFrame`)
        pub fn frame(&mut self, now_ms: f64) {
            let dt = match self.last_time {
                Some(last) => (now_ms - last) as f32,
                None => 0.0,
            };
            self.last_time = Some(now_ms);

            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, dt);
            if self.state.phase != GamePhase::Paused {
                self.camera.update(self.state.player.center.z);
            }
        }

        /// Feed a `keydown` event's `code` and `key`
        pub fn key_down(&mut self, code: &str, key: &str) -> bool {
            match KeyCommand::from_event(code, key) {
                Some(command) => {
                    command.apply(&mut self.input);
                    true
                }
                None => false,
            }
        }

        /// Pause when the tab is hidden
        pub fn blur(&mut self) {
            if self.state.phase == GamePhase::Playing {
                self.input.pause = true;
                log::info!("Auto-paused (window blur)");
            }
        }

        pub fn lives(&self) -> u8 {
            self.state.lives
        }

        pub fn home_count(&self) -> u8 {
            self.state.home_count
        }

        pub fn phase(&self) -> String {
            format!("{:?}", self.state.phase)
        }

        pub fn blast_enabled(&self) -> bool {
            self.state.blast.enabled
        }

        /// Remaining blast recharge, 1 right after firing
        pub fn blast_recharge(&self) -> f32 {
            self.state.blast.recharge_fraction(self.state.tuning.blast_cooldown_ms)
        }

        /// Packed `EntityInstance` records (80 bytes each)
        pub fn instance_bytes(&self) -> js_sys::Uint8Array {
            let instances = collect_instances(&self.state);
            js_sys::Uint8Array::from(bytemuck::cast_slice::<_, u8>(&instances))
        }

        /// Column-major view-projection matrix
        pub fn view_projection(&self, aspect: f32) -> js_sys::Float32Array {
            let m = self.camera.view_projection(aspect).to_cols_array();
            js_sys::Float32Array::from(&m[..])
        }

        pub fn eye_position(&self) -> js_sys::Float32Array {
            js_sys::Float32Array::from(&self.camera.eye.to_array()[..])
        }

        pub fn light_position(&self) -> js_sys::Float32Array {
            js_sys::Float32Array::from(&self.camera.light.to_array()[..])
        }

        /// Events since the last call, as a JSON array
        pub fn drain_events(&mut self) -> String {
            let events = self.state.drain_events();
            if events.contains(&GameEvent::Reset) {
                self.camera.reset();
            }
            serde_json::to_string(&events).unwrap_or_else(|e| {
                log::warn!("Event encode failed: {e}");
                String::from("[]")
            })
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }
        log::info!("Frogger 3D starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Frogger 3D (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => frogger3d::Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {path}: {e}; using defaults");
                frogger3d::Tuning::default()
            }
        },
        None => frogger3d::Tuning::default(),
    };

    headless_demo(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Hop forward on a fixed cadence for a minute of game time and report
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(seed: u64, tuning: frogger3d::Tuning) {
    use frogger3d::sim::{GameEvent, GameState, Move, TickInput, tick};
    use frogger3d::{FollowCamera, collect_instances};

    const FRAME_MS: f32 = 1000.0 / 60.0;
    const HOP_EVERY: u64 = 24;

    let mut state = GameState::with_tuning(seed, tuning);
    let mut camera = FollowCamera::new();
    log::info!("Headless run with seed: {}", seed);

    for frame in 0..3600u64 {
        let mut input = TickInput::default();
        if frame % HOP_EVERY == 0 {
            input.moves.push(Move::Forward);
        }
        tick(&mut state, &input, FRAME_MS);
        camera.update(state.player.center.z);

        for event in state.drain_events() {
            match event {
                GameEvent::Hopped => {}
                other => log::info!("frame {frame}: {other:?}"),
            }
        }
        if state.phase.is_terminal() {
            break;
        }
    }

    let instances = collect_instances(&state);
    println!(
        "phase {:?}, lives {}, homes {}/5, {} instances, eye z {:.2}",
        state.phase,
        state.lives,
        state.home_count,
        instances.len(),
        camera.eye.z
    );
}
