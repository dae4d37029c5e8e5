//! Browser binding
//!
//! The page owns the canvas, toolbar and render loop. It calls `advance`
//! once per animation frame and reads `snapshot_json` to draw.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::controller::RunController;
use crate::persistence::LocalStorage;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Underwell Pit engine loaded");
}

/// Engine handle exposed to JavaScript
#[wasm_bindgen]
pub struct Pit {
    controller: RunController,
}

#[wasm_bindgen]
impl Pit {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Pit {
        let store = LocalStorage;
        // Each page load plays a different run stream
        let settings = Settings {
            arena_width: width,
            arena_height: height,
            seed: rand::random(),
            ..Settings::load(&store)
        };
        Pit {
            controller: RunController::new(settings, Box::new(store)),
        }
    }

    /// Drop a catalog item (`builder`, `barrier`, `conveyor`, `laser`, `shock`, `bomb`, `welder`)
    pub fn place(&mut self, kind: &str, x: f32, y: f32) {
        self.controller.place_by_name(kind, Vec2::new(x, y));
    }

    /// Tap with the welder tool
    pub fn weld(&mut self, x: f32, y: f32) {
        self.controller.weld(Vec2::new(x, y));
    }

    /// Pointer down with the select tool. Returns whether a block was picked up.
    pub fn grab(&mut self, x: f32, y: f32) -> bool {
        self.controller.grab(Vec2::new(x, y))
    }

    pub fn drag(&mut self, x: f32, y: f32) {
        self.controller.drag(Vec2::new(x, y));
    }

    pub fn release(&mut self) {
        self.controller.release();
    }

    /// Feed one animation frame's delta (seconds). Returns ticks run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.controller.advance(dt)
    }

    pub fn start(&mut self) {
        self.controller.start();
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn resume(&mut self) {
        self.controller.resume();
    }

    pub fn toggle(&mut self) {
        self.controller.toggle();
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn clear(&mut self) {
        self.controller.clear_player_structures();
    }

    /// Canvas resized; takes effect for clamping now and layout on next reset
    pub fn resize(&mut self, width: f32, height: f32) {
        self.controller.set_arena(width, height);
    }

    pub fn ended(&self) -> bool {
        self.controller.is_ended()
    }

    pub fn time(&self) -> f32 {
        self.controller.world().time
    }

    pub fn best_time(&self) -> f32 {
        self.controller.best().seconds
    }

    /// Full world view as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.controller.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            String::from("{}")
        })
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> String {
        let events = self.controller.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| String::from("[]"))
    }
}
