//! WebAssembly entry points
//!
//! The page script owns the canvas and DOM listeners; it forwards pointer
//! events and animation frames here and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{PointerIntent, TickInput, WalkerState, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Hooded Walker module loaded");
}

/// One walker run bound to a viewport
#[wasm_bindgen]
pub struct WebWalker {
    state: WalkerState,
    input: TickInput,
    last_time: f64,
    viewport_width: f32,
}

#[wasm_bindgen]
impl WebWalker {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebWalker {
        let tuning = Tuning::for_viewport(width, height);
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        log::info!(
            "Walker ready: leg {}px, ground y {}, seed {}",
            tuning.leg_length,
            tuning.ground_y,
            seed
        );
        WebWalker {
            state: WalkerState::new(seed, tuning, settings),
            input: TickInput::default(),
            last_time: 0.0,
            viewport_width: width,
        }
    }

    /// Replace tuning from a JSON override and start a fresh run
    pub fn configure(&mut self, tuning_json: &str) {
        let tuning = Tuning::from_json_or(tuning_json, self.state.tuning.clone());
        let seed = self.state.rng_state.seed;
        self.state = WalkerState::new(seed, tuning, self.state.settings.clone());
        self.input.clear();
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.input.push(PointerIntent::Down { x, y });
    }

    pub fn pointer_move(&mut self, x: f32) {
        self.input.push(PointerIntent::Move { x });
    }

    pub fn pointer_up(&mut self) {
        self.input.push(PointerIntent::Up);
    }

    /// Run one tick for an animation frame timestamp (ms)
    pub fn frame(&mut self, time: f64) {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            0.0
        };
        self.last_time = time;

        tick(&mut self.state, &self.input, dt);
        self.input.clear();
    }

    /// Start a new run on a freshly generated course
    pub fn reset(&mut self) {
        self.state.restart(js_sys::Date::now() as u64);
        self.input.clear();
    }

    /// Replay the current course from the start
    pub fn retry(&mut self) {
        self.state.reset();
        self.input.clear();
    }

    pub fn set_camera_mode(&mut self, mode: &str) {
        if let Some(mode) = crate::settings::CameraMode::from_str(mode) {
            self.state.settings.camera_mode = mode;
            self.state.settings.save();
        }
    }

    pub fn alive(&self) -> bool {
        self.state.is_alive()
    }

    pub fn distance(&self) -> f32 {
        self.state.body.distance
    }

    pub fn status_text(&self) -> String {
        self.state.status().text().to_string()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot(self.viewport_width)).unwrap_or_default()
    }
}
